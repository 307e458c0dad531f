//! HTTP implementation of the remote collection contract.
//!
//! A thin, stateless wrapper around a blocking `reqwest` client. One
//! instance serves one collection (`/users`, `/posts`, or `/todos`); the
//! base path segment comes from [`Resource::COLLECTION`].
//!
//! Every failure (connection, status, or body decoding) collapses into the
//! single `Network` error variant. This layer does not retry, does not
//! distinguish error subtypes, and enforces no timeout of its own.

use std::marker::PhantomData;

use crate::domain::error::{OpsdeckError, Result};
use crate::domain::resource::Resource;
use crate::remote::api::RemoteCollection;

/// Blocking HTTP client for one resource collection.
///
/// # Examples
///
/// ```no_run
/// use opsdeck::domain::User;
/// use opsdeck::remote::{HttpCollection, RemoteCollection};
///
/// let users: HttpCollection<User> =
///     HttpCollection::new("https://jsonplaceholder.typicode.com");
/// let all = users.fetch_all()?;
/// # Ok::<(), opsdeck::domain::OpsdeckError>(())
/// ```
pub struct HttpCollection<R: Resource> {
    base_url: String,
    client: reqwest::blocking::Client,
    _marker: PhantomData<R>,
}

impl<R: Resource> HttpCollection<R> {
    /// Creates a client for `{base_url}/{collection}`.
    ///
    /// A trailing slash on `base_url` is tolerated.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            client: reqwest::blocking::Client::new(),
            _marker: PhantomData,
        }
    }

    fn collection_url(&self) -> String {
        format!("{}/{}", self.base_url, R::COLLECTION)
    }

    fn record_url(&self, id: u64) -> String {
        format!("{}/{}/{id}", self.base_url, R::COLLECTION)
    }

    fn network_err(context: &str, err: impl std::fmt::Display) -> OpsdeckError {
        OpsdeckError::Network(format!("{context} {}: {err}", R::COLLECTION))
    }
}

impl<R: Resource> RemoteCollection<R> for HttpCollection<R> {
    fn fetch_all(&self) -> Result<Vec<R>> {
        let _span = tracing::debug_span!("http_fetch_all", collection = R::COLLECTION).entered();

        self.client
            .get(self.collection_url())
            .send()
            .and_then(reqwest::blocking::Response::error_for_status)
            .map_err(|e| Self::network_err("failed to fetch", e))?
            .json::<Vec<R>>()
            .map_err(|e| Self::network_err("failed to decode", e))
    }

    fn fetch_by_id(&self, id: u64) -> Result<R> {
        let _span =
            tracing::debug_span!("http_fetch_by_id", collection = R::COLLECTION, id).entered();

        self.client
            .get(self.record_url(id))
            .send()
            .and_then(reqwest::blocking::Response::error_for_status)
            .map_err(|e| Self::network_err("failed to fetch", e))?
            .json::<R>()
            .map_err(|e| Self::network_err("failed to decode", e))
    }

    fn fetch_by_user(&self, user_id: u64) -> Result<Vec<R>> {
        let _span =
            tracing::debug_span!("http_fetch_by_user", collection = R::COLLECTION, user_id)
                .entered();

        self.client
            .get(self.collection_url())
            .query(&[("userId", user_id)])
            .send()
            .and_then(reqwest::blocking::Response::error_for_status)
            .map_err(|e| Self::network_err("failed to fetch", e))?
            .json::<Vec<R>>()
            .map_err(|e| Self::network_err("failed to decode", e))
    }

    fn create(&self, draft: &R::Patch) -> Result<R> {
        let _span = tracing::debug_span!("http_create", collection = R::COLLECTION).entered();

        self.client
            .post(self.collection_url())
            .json(draft)
            .send()
            .and_then(reqwest::blocking::Response::error_for_status)
            .map_err(|e| Self::network_err("failed to create in", e))?
            .json::<R>()
            .map_err(|e| Self::network_err("failed to decode", e))
    }

    fn update(&self, id: u64, draft: &R::Patch) -> Result<R> {
        let _span = tracing::debug_span!("http_update", collection = R::COLLECTION, id).entered();

        self.client
            .put(self.record_url(id))
            .json(draft)
            .send()
            .and_then(reqwest::blocking::Response::error_for_status)
            .map_err(|e| Self::network_err("failed to update in", e))?
            .json::<R>()
            .map_err(|e| Self::network_err("failed to decode", e))
    }

    fn delete(&self, id: u64) -> Result<()> {
        let _span = tracing::debug_span!("http_delete", collection = R::COLLECTION, id).entered();

        self.client
            .delete(self.record_url(id))
            .send()
            .and_then(reqwest::blocking::Response::error_for_status)
            .map(|_| ())
            .map_err(|e| Self::network_err("failed to delete from", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::User;

    #[test]
    fn urls_are_built_from_collection_name() {
        let client: HttpCollection<User> =
            HttpCollection::new("https://jsonplaceholder.typicode.com/");
        assert_eq!(
            client.collection_url(),
            "https://jsonplaceholder.typicode.com/users"
        );
        assert_eq!(
            client.record_url(7),
            "https://jsonplaceholder.typicode.com/users/7"
        );
    }
}
