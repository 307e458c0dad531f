//! Storage layer: persisted local state.
//!
//! Each store owns one durable slot: a named JSON snapshot file read once
//! at startup (hydration) and overwritten synchronously on every mutation.
//! This is the crate's source of truth; the remote API only seeds it.
//!
//! # Modules
//!
//! - [`slot`]: Atomic JSON snapshot files, one per store
//! - [`collection`]: The generic local collection store (the local-first core)
//! - [`session`]: The authenticated-session singleton
//! - [`theme`]: The theme preference singleton

pub mod collection;
pub mod session;
pub mod slot;
pub mod theme;

pub use collection::CollectionStore;
pub use session::SessionStore;
pub use slot::JsonSlot;
pub use theme::{Theme, ThemeStore};
