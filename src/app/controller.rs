//! The view controller: user-initiated mutations and their reconciliation.
//!
//! Every mutation attempts the remote call first and then reconciles the
//! local collection store according to an explicit policy, so the UI never
//! blocks on network success. The original behavior is
//! [`ReconcilePolicy::LocalWinsOnFailure`]: a failed remote create
//! materializes the draft locally under a synthesized identifier, and a
//! failed remote update still commits the patch locally.
//!
//! Deletes carry their own policy because the source behavior left the
//! failure case unspecified: [`DeletePolicy::LocalWinsOnFailure`] (the
//! default, consistent with create/update) removes the record regardless of
//! the remote outcome, while [`DeletePolicy::AbortOnFailure`] propagates the
//! error and keeps the record.
//!
//! The confirmation gate for deletes lives here too: an unconfirmed delete
//! is a no-op that reports `false`.

use crate::domain::error::{OpsdeckError, Result};
use crate::domain::resource::{next_local_id, Resource};
use crate::remote::api::RemoteCollection;
use crate::storage::collection::CollectionStore;

/// How local state is updated relative to remote call outcomes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReconcilePolicy {
    /// Commit locally even when the remote call fails (the original
    /// behavior). Failures are logged, never surfaced.
    #[default]
    LocalWinsOnFailure,
    /// Commit locally only when the remote call succeeds; failures
    /// propagate as network errors.
    RemoteWinsAlways,
    /// Never resolve a remote failure automatically; surface it as a
    /// [`OpsdeckError::Conflict`] and commit nothing.
    ManualConflict,
}

impl ReconcilePolicy {
    /// Parses a policy name from configuration.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "local-wins" => Some(Self::LocalWinsOnFailure),
            "remote-wins" => Some(Self::RemoteWinsAlways),
            "manual" => Some(Self::ManualConflict),
            _ => None,
        }
    }
}

/// Fallback behavior for delete, separate from create/update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DeletePolicy {
    /// Remove the record locally regardless of the remote outcome.
    #[default]
    LocalWinsOnFailure,
    /// Keep the record and propagate the error when the remote delete fails.
    AbortOnFailure,
}

impl DeletePolicy {
    /// Parses a policy name from configuration.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "local-wins" => Some(Self::LocalWinsOnFailure),
            "abort" => Some(Self::AbortOnFailure),
            _ => None,
        }
    }
}

/// Orchestrates mutations for one collection: remote attempt, then local
/// reconciliation per policy.
pub struct ViewController<R: Resource, C: RemoteCollection<R>> {
    store: CollectionStore<R>,
    remote: C,
    policy: ReconcilePolicy,
    delete_policy: DeletePolicy,
}

impl<R: Resource, C: RemoteCollection<R>> ViewController<R, C> {
    /// Wraps a hydrated store and a remote client with the default policies.
    pub fn new(store: CollectionStore<R>, remote: C) -> Self {
        Self {
            store,
            remote,
            policy: ReconcilePolicy::default(),
            delete_policy: DeletePolicy::default(),
        }
    }

    /// Replaces both reconciliation policies.
    #[must_use]
    pub fn with_policies(mut self, policy: ReconcilePolicy, delete_policy: DeletePolicy) -> Self {
        self.policy = policy;
        self.delete_policy = delete_policy;
        self
    }

    /// Read access to the underlying store.
    #[must_use]
    pub fn store(&self) -> &CollectionStore<R> {
        &self.store
    }

    /// Read access to the remote client.
    #[must_use]
    pub fn remote(&self) -> &C {
        &self.remote
    }

    /// Seeds the store from the remote source (no-op when warm).
    ///
    /// # Errors
    ///
    /// Returns an error only if persisting fails; fetch failures are logged.
    pub fn load(&mut self) -> Result<()> {
        self.store.load(&self.remote)
    }

    /// Unconditionally re-fetches and replaces the store.
    ///
    /// # Errors
    ///
    /// Returns an error only if persisting fails; fetch failures are logged.
    pub fn reset(&mut self) -> Result<()> {
        self.store.reset(&self.remote)
    }

    /// Submits a create draft and returns the committed identifier.
    ///
    /// On remote success the server-assigned record is added. On failure,
    /// per policy: `LocalWinsOnFailure` synthesizes an identifier strictly
    /// greater than the current maximum and adds the draft;
    /// `RemoteWinsAlways` propagates the error; `ManualConflict` surfaces a
    /// conflict. Callers close the form on return either way.
    ///
    /// # Errors
    ///
    /// Returns an error when persisting fails, or per the active policy.
    pub fn submit_create(&mut self, draft: R::Patch) -> Result<u64> {
        let _span =
            tracing::debug_span!("submit_create", collection = R::COLLECTION).entered();

        match self.remote.create(&draft) {
            Ok(record) => {
                let id = record.id();
                tracing::debug!(id, "remote create succeeded");
                self.store.add(record)?;
                Ok(id)
            }
            Err(e) => match self.policy {
                ReconcilePolicy::LocalWinsOnFailure => {
                    tracing::warn!(error = %e, "remote create failed, creating locally");
                    let id = next_local_id(self.store.records());
                    let mut record = R::from_patch(draft);
                    record.set_id(id);
                    self.store.add(record)?;
                    Ok(id)
                }
                ReconcilePolicy::RemoteWinsAlways => Err(e),
                ReconcilePolicy::ManualConflict => {
                    Err(OpsdeckError::Conflict(format!("create failed remotely: {e}")))
                }
            },
        }
    }

    /// Submits an update for an existing record, preserving its identifier.
    ///
    /// The remote attempt is for side effect and logging only under
    /// `LocalWinsOnFailure`; the draft is merged locally regardless of its
    /// outcome. Under `RemoteWinsAlways` the remote is authoritative: a
    /// success commits the server-returned record wholesale and a failure
    /// prevents the local commit, as it does under `ManualConflict`.
    ///
    /// # Errors
    ///
    /// Returns an error when persisting fails, or per the active policy.
    pub fn submit_update(&mut self, id: u64, draft: R::Patch) -> Result<()> {
        let _span =
            tracing::debug_span!("submit_update", collection = R::COLLECTION, id).entered();

        match self.remote.update(id, &draft) {
            Ok(server) => {
                tracing::debug!("remote update succeeded");
                if self.policy == ReconcilePolicy::RemoteWinsAlways {
                    self.store.replace(id, server)
                } else {
                    self.store.update(id, &draft)
                }
            }
            Err(e) => match self.policy {
                ReconcilePolicy::LocalWinsOnFailure => {
                    tracing::warn!(error = %e, "remote update failed, committing locally");
                    self.store.update(id, &draft)
                }
                ReconcilePolicy::RemoteWinsAlways => Err(e),
                ReconcilePolicy::ManualConflict => {
                    Err(OpsdeckError::Conflict(format!("update failed remotely: {e}")))
                }
            },
        }
    }

    /// Deletes a record behind an explicit confirmation gate.
    ///
    /// Returns `Ok(false)` without touching anything when `confirmed` is
    /// false. Otherwise attempts the remote delete and reconciles per the
    /// delete policy.
    ///
    /// # Errors
    ///
    /// Returns an error when persisting fails, or the remote error under
    /// [`DeletePolicy::AbortOnFailure`].
    pub fn delete(&mut self, id: u64, confirmed: bool) -> Result<bool> {
        let _span = tracing::debug_span!("delete", collection = R::COLLECTION, id).entered();

        if !confirmed {
            tracing::debug!("delete not confirmed, skipping");
            return Ok(false);
        }

        match self.remote.delete(id) {
            Ok(()) => {
                self.store.delete(id)?;
                Ok(true)
            }
            Err(e) => match self.delete_policy {
                DeletePolicy::LocalWinsOnFailure => {
                    tracing::warn!(error = %e, "remote delete failed, removing locally");
                    self.store.delete(id)?;
                    Ok(true)
                }
                DeletePolicy::AbortOnFailure => Err(e),
            },
        }
    }
}
