//! Remote access layer: the network boundary of the crate.
//!
//! The remote demo API is treated as an opaque collaborator. This layer
//! performs plain request/response calls and holds no state of its own; all
//! authoritative in-app state lives in [`crate::storage`].
//!
//! # Modules
//!
//! - [`api`]: The [`RemoteCollection`] trait the store and controller depend on
//! - [`http`]: Blocking `reqwest` implementation, one instance per collection

pub mod api;
pub mod http;

pub use api::RemoteCollection;
pub use http::HttpCollection;

#[cfg(test)]
pub(crate) mod fake {
    //! In-memory remote used by store and controller tests.

    use std::cell::{Cell, RefCell};

    use crate::domain::error::{OpsdeckError, Result};
    use crate::domain::resource::Resource;
    use crate::remote::api::RemoteCollection;

    /// A canned remote collection with per-call counters and a failure switch.
    pub struct FakeRemote<R: Resource> {
        pub records: RefCell<Vec<R>>,
        /// When set, every operation fails with a network error.
        pub unreachable: Cell<bool>,
        /// Identifier the next `create` assigns, mimicking the server counter.
        pub next_id: Cell<u64>,
        pub fetch_calls: Cell<usize>,
        pub fetch_by_id_calls: Cell<usize>,
        pub fetch_by_user_calls: Cell<usize>,
        pub create_calls: Cell<usize>,
        pub update_calls: Cell<usize>,
        pub delete_calls: Cell<usize>,
    }

    impl<R: Resource> FakeRemote<R> {
        pub fn with_records(records: Vec<R>) -> Self {
            Self {
                records: RefCell::new(records),
                unreachable: Cell::new(false),
                next_id: Cell::new(101),
                fetch_calls: Cell::new(0),
                fetch_by_id_calls: Cell::new(0),
                fetch_by_user_calls: Cell::new(0),
                create_calls: Cell::new(0),
                update_calls: Cell::new(0),
                delete_calls: Cell::new(0),
            }
        }

        pub fn unreachable() -> Self {
            let remote = Self::with_records(vec![]);
            remote.unreachable.set(true);
            remote
        }

        fn check(&self) -> Result<()> {
            if self.unreachable.get() {
                Err(OpsdeckError::Network("connection refused".to_string()))
            } else {
                Ok(())
            }
        }
    }

    impl<R: Resource> RemoteCollection<R> for FakeRemote<R> {
        fn fetch_all(&self) -> Result<Vec<R>> {
            self.fetch_calls.set(self.fetch_calls.get() + 1);
            self.check()?;
            Ok(self.records.borrow().clone())
        }

        fn fetch_by_id(&self, id: u64) -> Result<R> {
            self.fetch_by_id_calls.set(self.fetch_by_id_calls.get() + 1);
            self.check()?;
            self.records
                .borrow()
                .iter()
                .find(|r| r.id() == id)
                .cloned()
                .ok_or_else(|| OpsdeckError::Network(format!("404 for id {id}")))
        }

        fn fetch_by_user(&self, _user_id: u64) -> Result<Vec<R>> {
            self.fetch_by_user_calls.set(self.fetch_by_user_calls.get() + 1);
            self.check()?;
            Ok(self.records.borrow().clone())
        }

        fn create(&self, draft: &R::Patch) -> Result<R> {
            self.create_calls.set(self.create_calls.get() + 1);
            self.check()?;
            let mut record = R::from_patch(draft.clone());
            record.set_id(self.next_id.get());
            self.next_id.set(self.next_id.get() + 1);
            Ok(record)
        }

        fn update(&self, id: u64, draft: &R::Patch) -> Result<R> {
            self.update_calls.set(self.update_calls.get() + 1);
            self.check()?;
            let mut record = R::from_patch(draft.clone());
            record.set_id(id);
            Ok(record)
        }

        fn delete(&self, _id: u64) -> Result<()> {
            self.delete_calls.set(self.delete_calls.get() + 1);
            self.check()
        }
    }
}
