//! Application context and two-phase startup.
//!
//! All persisted state is owned by one [`AppContext`] built at startup and
//! injected into whatever drives the app (the CLI shim here). Hydration is
//! explicit and complete before `initialize` returns: every slot has been
//! read, so no caller can observe a "not yet hydrated" transient state.

use crate::app::controller::{DeletePolicy, ReconcilePolicy, ViewController};
use crate::domain::error::{OpsdeckError, Result};
use crate::domain::{Post, Todo, User};
use crate::infrastructure::paths;
use crate::remote::HttpCollection;
use crate::storage::{CollectionStore, SessionStore, ThemeStore};
use crate::Config;

/// Owner of all stores and clients for one running client.
pub struct AppContext {
    pub session: SessionStore,
    pub theme: ThemeStore,
    /// The local-first users view: persisted store plus reconciling controller.
    pub users: ViewController<User, HttpCollection<User>>,
    /// Read-only clients for the dashboard's remote collections.
    pub posts: HttpCollection<Post>,
    pub todos: HttpCollection<Todo>,
}

impl AppContext {
    /// Builds the context: resolves the data directory, hydrates every
    /// persisted store, and wires the remote clients and policies.
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory is unusable, a snapshot is
    /// corrupt, or a configured policy name is unknown.
    pub fn initialize(config: &Config) -> Result<Self> {
        let data_dir = config
            .data_dir
            .clone()
            .unwrap_or_else(paths::default_data_dir);
        tracing::debug!(data_dir = ?data_dir, "initializing app context");

        let policy = match config.reconcile_policy.as_deref() {
            None => ReconcilePolicy::default(),
            Some(name) => ReconcilePolicy::from_name(name).ok_or_else(|| {
                OpsdeckError::Config(format!("unknown reconcile policy: {name}"))
            })?,
        };
        let delete_policy = match config.delete_policy.as_deref() {
            None => DeletePolicy::default(),
            Some(name) => DeletePolicy::from_name(name).ok_or_else(|| {
                OpsdeckError::Config(format!("unknown delete policy: {name}"))
            })?,
        };

        let session = SessionStore::open(&data_dir)?;
        let theme = ThemeStore::open(&data_dir)?;
        let users_store: CollectionStore<User> = CollectionStore::open(&data_dir)?;
        let users = ViewController::new(users_store, HttpCollection::new(&config.api_base_url))
            .with_policies(policy, delete_policy);

        Ok(Self {
            session,
            theme,
            users,
            posts: HttpCollection::new(&config.api_base_url),
            todos: HttpCollection::new(&config.api_base_url),
        })
    }

    /// Re-persists every store. Mutations already persist on their own;
    /// this is the explicit flush at shutdown.
    ///
    /// # Errors
    ///
    /// Returns the first persist failure.
    pub fn flush(&self) -> Result<()> {
        self.session.flush()?;
        self.users.store().flush()
    }
}
