//! The resource abstraction shared by all CRUD collections.
//!
//! Every domain entity (user, post, todo) implements [`Resource`], which ties
//! together the three things the rest of the crate needs to treat collections
//! generically: a unique integer identifier, a wire collection name, and a
//! patch type for partial updates.
//!
//! # Patch Semantics
//!
//! A patch is a record with every field optional. Applying a patch is a
//! shallow merge: `Some` fields replace the record's fields, `None` fields
//! leave them untouched. Patches double as create drafts; when a remote
//! create fails, the local fallback materializes a full record from the
//! draft with [`Resource::from_patch`] and a synthesized identifier.

use serde::de::DeserializeOwned;
use serde::Serialize;

/// A domain entity stored in one CRUD collection.
///
/// Identifier uniqueness within a collection is an invariant the *caller*
/// preserves on add; the store itself performs no duplicate check.
pub trait Resource: Clone + Serialize + DeserializeOwned + std::fmt::Debug {
    /// The partial-record type used for updates and create drafts.
    type Patch: Clone + Serialize + std::fmt::Debug;

    /// Wire collection name, used both as the remote base path segment
    /// (`/users`) and as the durable slot name prefix (`users-storage`).
    const COLLECTION: &'static str;

    /// Returns the record's identifier, unique within its collection.
    fn id(&self) -> u64;

    /// Replaces the record's identifier.
    ///
    /// Used by the create fallback to tag a locally materialized record with
    /// a synthesized identifier.
    fn set_id(&mut self, id: u64);

    /// Shallow-merges the patch into this record.
    ///
    /// `Some` fields replace, `None` fields are left untouched. The
    /// identifier is never part of a patch and is always preserved.
    fn apply(&mut self, patch: &Self::Patch);

    /// Materializes a full record from a create draft.
    ///
    /// Fields absent from the draft take their defaults (empty strings,
    /// `false`, `None`). The identifier is set to 0 and must be replaced by
    /// the caller via [`Resource::set_id`].
    fn from_patch(patch: Self::Patch) -> Self;
}

/// Returns the identifier a locally created record should receive.
///
/// Strictly greater than the current maximum: `max(existing ids, or 0) + 1`.
/// Matches the create fallback contract; with `[{id:1},{id:3}]` the next
/// local record gets id 4.
///
/// # Examples
///
/// ```
/// use opsdeck::domain::{next_local_id, Todo};
///
/// let todos = vec![
///     Todo { id: 1, user_id: 1, title: "a".into(), completed: false },
///     Todo { id: 3, user_id: 1, title: "b".into(), completed: true },
/// ];
/// assert_eq!(next_local_id(&todos), 4);
/// assert_eq!(next_local_id::<Todo>(&[]), 1);
/// ```
#[must_use]
pub fn next_local_id<R: Resource>(records: &[R]) -> u64 {
    records.iter().map(Resource::id).max().unwrap_or(0) + 1
}
