//! Domain layer for opsdeck.
//!
//! This module contains the core domain types, independent of HTTP,
//! filesystem, or CLI concerns: the record shapes for the three demo API
//! collections, the [`Resource`] abstraction the generic store and controller
//! are written against, the session singleton, and the crate-wide error type.
//!
//! # Organization
//!
//! - [`error`]: Error types and result alias
//! - [`resource`]: The [`Resource`] trait and identifier synthesis
//! - [`records`]: User, post, and todo record and patch types
//! - [`session`]: Session singleton and identity

pub mod error;
pub mod records;
pub mod resource;
pub mod session;

pub use error::{OpsdeckError, Result};
pub use records::{Address, Company, Post, PostPatch, Todo, TodoPatch, User, UserPatch};
pub use resource::{next_local_id, Resource};
pub use session::{Identity, Session};
