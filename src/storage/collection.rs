//! The local collection store.
//!
//! This is the authoritative in-app view of one remote collection: an
//! ordered, persisted sequence of records with load/add/update/delete/reset
//! operations. Its relationship to the remote source is
//! one-directional-on-read, best-effort-on-write: a bulk load seeds local
//! state once per session, and every mutation commits locally regardless of
//! what the network did.
//!
//! # Invariants
//!
//! - In-memory state and the durable slot never observably diverge: every
//!   mutating operation persists synchronously before returning.
//! - Insertion order is preserved (significant for display only).
//! - Identifier uniqueness is the *caller's* responsibility; `add` performs
//!   no duplicate check.

use serde::{Deserialize, Serialize};

use crate::domain::error::Result;
use crate::domain::resource::Resource;
use crate::remote::api::RemoteCollection;
use crate::storage::slot::JsonSlot;

/// Snapshot format persisted to the collection's durable slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CollectionSnapshot<R> {
    /// Version of the snapshot format for future migrations.
    version: u32,
    #[serde(default = "Vec::new")]
    records: Vec<R>,
}

impl<R> Default for CollectionSnapshot<R> {
    fn default() -> Self {
        Self {
            version: 1,
            records: Vec::new(),
        }
    }
}

/// Persisted, ordered store for one resource collection.
///
/// A store treats a non-empty collection as already "warm": [`load`] is a
/// no-op unless the collection is empty, and only [`reset`] forces a
/// re-fetch.
///
/// [`load`]: CollectionStore::load
/// [`reset`]: CollectionStore::reset
pub struct CollectionStore<R: Resource> {
    slot: JsonSlot,
    records: Vec<R>,
    loading: bool,
}

impl<R: Resource> CollectionStore<R> {
    /// Opens the store and hydrates it from its durable slot.
    ///
    /// The slot is named `{collection}-storage` (e.g. `users-storage`). An
    /// unwritten slot hydrates to an empty collection.
    ///
    /// # Errors
    ///
    /// Returns an error if the slot cannot be opened or holds a corrupt
    /// snapshot.
    pub fn open(data_dir: impl AsRef<std::path::Path>) -> Result<Self> {
        let slot = JsonSlot::open(data_dir, &format!("{}-storage", R::COLLECTION))?;
        let snapshot: CollectionSnapshot<R> = slot.read()?.unwrap_or_default();

        tracing::debug!(
            collection = R::COLLECTION,
            record_count = snapshot.records.len(),
            "collection store hydrated"
        );

        Ok(Self {
            slot,
            records: snapshot.records,
            loading: false,
        })
    }

    /// The records in insertion order.
    #[must_use]
    pub fn records(&self) -> &[R] {
        &self.records
    }

    /// True while a bulk fetch is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Looks up a record by identifier.
    #[must_use]
    pub fn get(&self, id: u64) -> Option<&R> {
        self.records.iter().find(|r| r.id() == id)
    }

    /// Seeds the collection from the remote source, once.
    ///
    /// No-op when the collection is already non-empty (warm). Otherwise sets
    /// the loading flag for the duration of the call, replaces the collection
    /// with the fetched records, and persists. A fetch failure leaves the
    /// collection unchanged, clears the flag, and is logged, never surfaced
    /// structurally.
    ///
    /// # Errors
    ///
    /// Returns an error only if persisting the fetched snapshot fails.
    pub fn load(&mut self, remote: &dyn RemoteCollection<R>) -> Result<()> {
        let _span = tracing::debug_span!("store_load", collection = R::COLLECTION).entered();

        if !self.records.is_empty() {
            tracing::debug!(record_count = self.records.len(), "collection warm, skipping fetch");
            return Ok(());
        }
        self.fetch_and_replace(remote)
    }

    /// Unconditionally re-fetches and replaces the collection.
    ///
    /// Bypasses the warm check in [`load`](CollectionStore::load). Fetch
    /// failures are swallowed and logged, like `load`.
    ///
    /// # Errors
    ///
    /// Returns an error only if persisting the fetched snapshot fails.
    pub fn reset(&mut self, remote: &dyn RemoteCollection<R>) -> Result<()> {
        let _span = tracing::debug_span!("store_reset", collection = R::COLLECTION).entered();
        self.fetch_and_replace(remote)
    }

    fn fetch_and_replace(&mut self, remote: &dyn RemoteCollection<R>) -> Result<()> {
        self.loading = true;
        let fetched = remote.fetch_all();
        self.loading = false;

        match fetched {
            Ok(records) => {
                tracing::debug!(record_count = records.len(), "collection replaced from remote");
                self.records = records;
                self.persist()
            }
            Err(e) => {
                tracing::warn!(collection = R::COLLECTION, error = %e, "bulk fetch failed, keeping local records");
                Ok(())
            }
        }
    }

    /// Appends a record and persists.
    ///
    /// No duplicate-identifier check is performed.
    ///
    /// # Errors
    ///
    /// Returns an error if persisting fails.
    pub fn add(&mut self, record: R) -> Result<()> {
        let _span =
            tracing::debug_span!("store_add", collection = R::COLLECTION, id = record.id())
                .entered();
        self.records.push(record);
        self.persist()
    }

    /// Shallow-merges a patch into the matching record and persists.
    ///
    /// No-op (and no persist) when no record has the given identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if persisting fails.
    pub fn update(&mut self, id: u64, patch: &R::Patch) -> Result<()> {
        let _span =
            tracing::debug_span!("store_update", collection = R::COLLECTION, id).entered();

        let Some(record) = self.records.iter_mut().find(|r| r.id() == id) else {
            tracing::debug!("no matching record, update is a no-op");
            return Ok(());
        };
        record.apply(patch);
        self.persist()
    }

    /// Swaps the matching record for `record` wholesale and persists.
    ///
    /// Unlike [`update`](CollectionStore::update) this is not a merge; the
    /// stored record is replaced by the given one, identifier included.
    /// No-op (and no persist) when no record has the given identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if persisting fails.
    pub fn replace(&mut self, id: u64, record: R) -> Result<()> {
        let _span =
            tracing::debug_span!("store_replace", collection = R::COLLECTION, id).entered();

        let Some(existing) = self.records.iter_mut().find(|r| r.id() == id) else {
            tracing::debug!("no matching record, replace is a no-op");
            return Ok(());
        };
        *existing = record;
        self.persist()
    }

    /// Removes the matching record and persists.
    ///
    /// No-op (and no persist) when no record has the given identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if persisting fails.
    pub fn delete(&mut self, id: u64) -> Result<()> {
        let _span =
            tracing::debug_span!("store_delete", collection = R::COLLECTION, id).entered();

        let before = self.records.len();
        self.records.retain(|r| r.id() != id);
        if self.records.len() == before {
            tracing::debug!("no matching record, delete is a no-op");
            return Ok(());
        }
        self.persist()
    }

    /// Re-persists the current snapshot unconditionally.
    ///
    /// Mutations persist on their own; this exists for the explicit flush at
    /// shutdown.
    ///
    /// # Errors
    ///
    /// Returns an error if persisting fails.
    pub fn flush(&self) -> Result<()> {
        self.persist()
    }

    fn persist(&self) -> Result<()> {
        let snapshot = CollectionSnapshot {
            version: 1,
            records: self.records.clone(),
        };
        self.slot.write(&snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{User, UserPatch};
    use crate::remote::fake::FakeRemote;
    use tempfile::TempDir;

    fn user(id: u64, name: &str) -> User {
        User {
            id,
            name: name.to_string(),
            username: name.to_lowercase(),
            email: format!("{}@example.com", name.to_lowercase()),
            phone: None,
            website: None,
            address: None,
            company: None,
        }
    }

    fn open_store(dir: &TempDir) -> CollectionStore<User> {
        CollectionStore::open(dir.path()).unwrap()
    }

    #[test]
    fn load_seeds_empty_store_from_remote() {
        let dir = TempDir::new().unwrap();
        let mut store = open_store(&dir);
        let remote = FakeRemote::with_records(vec![user(1, "A"), user(2, "B")]);

        store.load(&remote).unwrap();

        assert_eq!(store.records().len(), 2);
        assert_eq!(remote.fetch_calls.get(), 1);
        assert!(!store.is_loading());
    }

    #[test]
    fn load_is_a_noop_on_a_warm_store() {
        let dir = TempDir::new().unwrap();
        let mut store = open_store(&dir);
        let remote = FakeRemote::with_records(vec![user(1, "A")]);

        store.load(&remote).unwrap();
        store.load(&remote).unwrap();

        // At most one fetch: the second call sees a non-empty collection.
        assert_eq!(remote.fetch_calls.get(), 1);
    }

    #[test]
    fn load_failure_leaves_collection_unchanged_and_clears_flag() {
        let dir = TempDir::new().unwrap();
        let mut store = open_store(&dir);
        let remote = FakeRemote::<User>::unreachable();

        store.load(&remote).unwrap();

        assert!(store.records().is_empty());
        assert!(!store.is_loading());
    }

    #[test]
    fn reset_bypasses_the_warm_check() {
        let dir = TempDir::new().unwrap();
        let mut store = open_store(&dir);
        let remote = FakeRemote::with_records(vec![user(1, "A")]);

        store.load(&remote).unwrap();
        remote.records.borrow_mut().push(user(2, "B"));
        store.reset(&remote).unwrap();

        assert_eq!(store.records().len(), 2);
        assert_eq!(remote.fetch_calls.get(), 2);
    }

    #[test]
    fn load_after_reset_changes_nothing() {
        let dir = TempDir::new().unwrap();
        let mut store = open_store(&dir);
        let remote = FakeRemote::with_records(vec![user(1, "A"), user(2, "B")]);

        store.reset(&remote).unwrap();
        let after_reset = store.records().to_vec();
        store.load(&remote).unwrap();

        assert_eq!(store.records(), after_reset.as_slice());
    }

    #[test]
    fn update_merges_patch_into_matching_record() {
        let dir = TempDir::new().unwrap();
        let mut store = open_store(&dir);
        store.add(user(1, "A")).unwrap();

        store
            .update(1, &UserPatch { name: Some("B".to_string()), ..UserPatch::default() })
            .unwrap();

        assert_eq!(store.records()[0].name, "B");
        assert_eq!(store.records()[0].id, 1);
    }

    #[test]
    fn update_with_unknown_id_is_a_noop() {
        let dir = TempDir::new().unwrap();
        let mut store = open_store(&dir);
        store.add(user(1, "A")).unwrap();

        store
            .update(99, &UserPatch { name: Some("B".to_string()), ..UserPatch::default() })
            .unwrap();

        assert_eq!(store.records()[0].name, "A");
    }

    #[test]
    fn replace_swaps_the_record_wholesale() {
        let dir = TempDir::new().unwrap();
        let mut store = open_store(&dir);
        store.add(user(1, "A")).unwrap();

        let mut incoming = user(1, "B");
        incoming.username = String::new();
        store.replace(1, incoming).unwrap();

        // Not a merge: the old username is gone with the old record.
        assert_eq!(store.records()[0].name, "B");
        assert!(store.records()[0].username.is_empty());
    }

    #[test]
    fn replace_with_unknown_id_is_a_noop() {
        let dir = TempDir::new().unwrap();
        let mut store = open_store(&dir);
        store.add(user(1, "A")).unwrap();

        store.replace(99, user(99, "Z")).unwrap();

        assert_eq!(store.records().len(), 1);
        assert_eq!(store.records()[0].name, "A");
    }

    #[test]
    fn delete_removes_then_becomes_a_noop() {
        let dir = TempDir::new().unwrap();
        let mut store = open_store(&dir);
        store.add(user(1, "A")).unwrap();
        store.add(user(2, "B")).unwrap();

        store.delete(1).unwrap();
        assert_eq!(store.records(), &[user(2, "B")]);

        store.delete(1).unwrap();
        assert_eq!(store.records(), &[user(2, "B")]);
    }

    #[test]
    fn add_does_not_enforce_identifier_uniqueness() {
        // Known gap: uniqueness is the caller's invariant, not the store's.
        let dir = TempDir::new().unwrap();
        let mut store = open_store(&dir);
        store.add(user(1, "A")).unwrap();
        store.add(user(1, "A-again")).unwrap();

        assert_eq!(store.records().len(), 2);
    }

    #[test]
    fn mutations_survive_reopen() {
        let dir = TempDir::new().unwrap();
        {
            let mut store = open_store(&dir);
            store.add(user(1, "A")).unwrap();
            store.add(user(2, "B")).unwrap();
            store.delete(1).unwrap();
        }

        let reopened = open_store(&dir);
        assert_eq!(reopened.records(), &[user(2, "B")]);
    }

    #[test]
    fn warm_check_uses_hydrated_records() {
        let dir = TempDir::new().unwrap();
        {
            let mut store = open_store(&dir);
            store.add(user(1, "A")).unwrap();
        }

        let mut reopened = open_store(&dir);
        let remote = FakeRemote::with_records(vec![user(9, "Z")]);
        reopened.load(&remote).unwrap();

        // Hydrated store is warm, so no fetch happens.
        assert_eq!(remote.fetch_calls.get(), 0);
        assert_eq!(reopened.records()[0].id, 1);
    }
}
