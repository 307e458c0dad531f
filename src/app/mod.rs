//! Application layer coordinating stores, remote clients, and view state.
//!
//! This layer sits between the CLI shim (`main.rs`) and the domain, storage,
//! and remote layers. The data flow for a user-initiated mutation is:
//!
//! ```text
//! command -> ViewController -> remote attempt -> local store commit -> projection
//! ```
//!
//! The remote attempt never blocks the local commit under the default
//! policy; see [`controller`] for the policy catalogue.
//!
//! # Modules
//!
//! - [`context`]: Context-owned state with explicit two-phase startup
//! - [`controller`]: Mutation orchestration and reconcile policies
//! - [`dashboard`]: Derived aggregate series
//! - [`modes`]: Modal and sort state machine types
//! - [`posts`]: Read-only posts browsing (list and detail)
//! - [`state`]: Users-view sorting, filtering, and projection
//! - [`todos`]: Todos-view completion filter and sorting

pub mod context;
pub mod controller;
pub mod dashboard;
pub mod modes;
pub mod posts;
pub mod state;
pub mod todos;

pub use context::AppContext;
pub use controller::{DeletePolicy, ReconcilePolicy, ViewController};
pub use modes::{FormMode, ModalState, SortDirection};
pub use state::{SortField, UsersViewState};
pub use todos::{TodoFilter, TodoSortField, TodosViewState};
