//! Remote collection abstraction.
//!
//! This module defines the [`RemoteCollection`] trait that abstracts over the
//! network boundary for one resource collection. The production
//! implementation is [`HttpCollection`](crate::remote::HttpCollection);
//! tests substitute in-memory fakes so store and controller behavior can be
//! exercised without a network.
//!
//! The trait is deliberately minimal: the CRUD verbs plus the `?userId=`
//! filter the posts view uses. No retries and no error subtypes; any failure
//! is a single `Network` error the caller downgrades or logs.

use crate::domain::error::Result;
use crate::domain::resource::Resource;

/// Abstraction over remote access to a single resource collection.
pub trait RemoteCollection<R: Resource> {
    /// Fetches every record in the collection.
    ///
    /// # Errors
    ///
    /// Returns [`OpsdeckError::Network`](crate::domain::OpsdeckError::Network)
    /// when the transport fails or the remote returns a non-success status.
    fn fetch_all(&self) -> Result<Vec<R>>;

    /// Fetches a single record by identifier.
    ///
    /// # Errors
    ///
    /// Returns a network error on transport failure or non-success status,
    /// including "not found".
    fn fetch_by_id(&self, id: u64) -> Result<R>;

    /// Fetches the records belonging to one user (`GET ?userId=`).
    ///
    /// # Errors
    ///
    /// Returns a network error on transport failure or non-success status.
    fn fetch_by_user(&self, user_id: u64) -> Result<Vec<R>>;

    /// Creates a record from a draft. The server assigns the identifier.
    ///
    /// # Errors
    ///
    /// Returns a network error on transport failure or non-success status.
    fn create(&self, draft: &R::Patch) -> Result<R>;

    /// Replaces the fields of an existing record (`PUT`).
    ///
    /// # Errors
    ///
    /// Returns a network error on transport failure or non-success status.
    fn update(&self, id: u64, draft: &R::Patch) -> Result<R>;

    /// Deletes a record by identifier.
    ///
    /// # Errors
    ///
    /// Returns a network error on transport failure or non-success status.
    fn delete(&self, id: u64) -> Result<()>;
}
