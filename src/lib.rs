//! Opsdeck: a local-first admin client for the jsonplaceholder demo API.
//!
//! Opsdeck keeps authoritative application state in persisted local
//! collections and treats the remote REST API as a best-effort collaborator:
//! reads seed local state once per session, writes attempt remote
//! propagation but always commit locally under the default policy. The
//! result is a client whose UI never blocks on network success.
//!
//! # Architecture
//!
//! The crate follows a layered architecture pattern:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  CLI Shim (main.rs)                                 │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← Context & controller
//! │  - Two-phase startup (hydrate, then dispatch)       │
//! │  - Mutation reconciliation policies                 │
//! │  - View state (sort/filter/modal), dashboard series │
//! └─────────────────────────────────────────────────────┘
//!         │                              │
//! ┌───────────────────┐        ┌───────────────────┐
//! │ Storage Layer     │        │ Remote Layer      │
//! │ (storage/)        │        │ (remote/)         │
//! │ - JSON slots      │        │ - CRUD trait      │
//! │ - Collection      │        │ - Blocking HTTP   │
//! │ - Session, theme  │        │   client          │
//! └───────────────────┘        └───────────────────┘
//!         │                              │
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure & Domain Layers                     │
//! │  - Data directory resolution (infrastructure/)      │
//! │  - Records, patches, session, errors (domain/)      │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: Application context, view controller, view state, dashboard
//! - [`domain`]: Record and patch types, session, errors
//! - [`infrastructure`]: Data directory resolution
//! - [`remote`]: The network boundary (trait + blocking HTTP client)
//! - [`storage`]: Durable JSON slots and the persisted stores
//! - [`observability`]: Tracing subscriber setup
//!
//! # Key Design Decisions
//!
//! ## Local-First Reconciliation
//!
//! Every mutation runs remote-attempt-then-local-commit. Under the default
//! `LocalWinsOnFailure` policy a failed remote create materializes the draft
//! locally with a synthesized identifier (max existing id + 1), and failed
//! updates/deletes still commit locally. Alternative policies
//! (`remote-wins`, `manual`) are selectable in configuration.
//!
//! ## Warm Stores
//!
//! A non-empty collection is "warm": `load` fetches from the network at most
//! once per store lifetime, and only `reset` forces a re-fetch. Combined
//! with persisted snapshots this makes restarts cheap and offline-tolerant.
//!
//! ## Explicit Hydration
//!
//! All persisted state is hydrated inside [`app::AppContext::initialize`]
//! before any command runs, so there is no transient not-yet-hydrated state
//! to race against.
//!
//! # Configuration
//!
//! Configuration is a TOML file (path via `OPSDECK_CONFIG`, defaulting to
//! `config.toml` inside the data directory):
//!
//! ```toml
//! api_base_url = "https://jsonplaceholder.typicode.com"
//! trace_level = "debug"
//! reconcile_policy = "local-wins"
//! delete_policy = "local-wins"
//! ```
//!
//! # Examples
//!
//! ```no_run
//! use opsdeck::app::AppContext;
//! use opsdeck::Config;
//!
//! let config = Config::default();
//! let mut ctx = AppContext::initialize(&config)?;
//!
//! if ctx.session.login("test@example.com", "password123")? {
//!     ctx.users.load()?;
//!     println!("{} users", ctx.users.store().records().len());
//! }
//! # Ok::<(), opsdeck::domain::OpsdeckError>(())
//! ```

pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod remote;
pub mod storage;

pub use app::{AppContext, DeletePolicy, ReconcilePolicy, ViewController};
pub use domain::{OpsdeckError, Result};
pub use storage::{CollectionStore, SessionStore, Theme, ThemeStore};

use std::path::PathBuf;

use serde::Deserialize;

/// Base URL of the public demo API.
pub const DEFAULT_API_BASE_URL: &str = "https://jsonplaceholder.typicode.com";

/// Client configuration, loadable from a TOML file.
///
/// Every field has a default, so an absent or empty file yields a working
/// configuration.
///
/// # Examples
///
/// ```
/// use opsdeck::Config;
///
/// let config = Config::from_toml_str(
///     "api_base_url = \"http://localhost:3000\"\ntrace_level = \"debug\"",
/// ).unwrap();
/// assert_eq!(config.api_base_url, "http://localhost:3000");
/// assert_eq!(config.trace_level.as_deref(), Some("debug"));
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the remote collection service.
    pub api_base_url: String,

    /// Directory holding the durable storage slots.
    ///
    /// Defaults to `$OPSDECK_DATA_DIR`, then `~/.local/share/opsdeck`.
    pub data_dir: Option<PathBuf>,

    /// Tracing level (`trace`, `debug`, `info`, `warn`, `error`).
    /// `RUST_LOG` takes precedence when set. Default: `info`.
    pub trace_level: Option<String>,

    /// Reconcile policy for create/update: `local-wins` (default),
    /// `remote-wins`, or `manual`.
    pub reconcile_policy: Option<String>,

    /// Delete fallback policy: `local-wins` (default) or `abort`.
    pub delete_policy: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            data_dir: None,
            trace_level: None,
            reconcile_policy: None,
            delete_policy: None,
        }
    }
}

impl Config {
    /// Parses a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the TOML is malformed.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text)
            .map_err(|e| OpsdeckError::Config(format!("invalid config: {e}")))
    }

    /// Loads the configuration file at `path`, falling back to defaults when
    /// the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error when the file exists but cannot be read or parsed.
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!(path = ?path, "no config file, using defaults");
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_is_all_defaults() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert!(config.data_dir.is_none());
        assert!(config.reconcile_policy.is_none());
    }

    #[test]
    fn malformed_config_is_a_config_error() {
        assert!(Config::from_toml_str("api_base_url = [").is_err());
    }

    #[test]
    fn missing_file_loads_defaults() {
        let config = Config::load("/nonexistent/opsdeck/config.toml").unwrap();
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
    }
}
