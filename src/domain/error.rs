//! Error types for opsdeck.
//!
//! This module defines the centralized error type [`OpsdeckError`] and a type alias
//! [`Result`] for convenient error handling throughout the crate. All errors are
//! implemented using the `thiserror` crate for automatic `Error` trait implementation.

use thiserror::Error;

/// The main error type for opsdeck operations.
///
/// This enum consolidates all error conditions that can occur, from remote API
/// failures to storage and configuration issues. Network errors from mutating
/// operations are usually downgraded at the controller layer (best-effort
/// reconciliation) rather than propagated to the caller; see
/// [`crate::app::controller`].
///
/// # Examples
///
/// ```
/// use opsdeck::domain::OpsdeckError;
///
/// fn validate_login(email: &str) -> Result<(), OpsdeckError> {
///     if email.is_empty() {
///         return Err(OpsdeckError::Validation("email is required".to_string()));
///     }
///     Ok(())
/// }
///
/// assert!(validate_login("").is_err());
/// ```
#[derive(Debug, Error)]
pub enum OpsdeckError {
    /// A remote API call failed.
    ///
    /// Covers both transport failures and non-success HTTP statuses. The client
    /// does not retry and does not distinguish error subtypes beyond "failed";
    /// the string carries the underlying description for logging.
    #[error("Network error: {0}")]
    Network(String),

    /// Storage operation failed.
    ///
    /// Occurs when reading from or writing to a durable slot fails, including
    /// JSON (de)serialization of a snapshot.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    ///
    /// Wraps errors from standard library I/O operations. Automatically converts
    /// from `std::io::Error` using the `#[from]` attribute.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A required form field is missing at an input boundary.
    ///
    /// Only checked at the login boundary (email and password must be
    /// non-empty) and for malformed CLI input.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A remote failure that the active reconcile policy refuses to resolve.
    ///
    /// Only produced under `ManualConflict`
    /// (see [`crate::app::controller::ReconcilePolicy`]); the local collection
    /// is left untouched and the caller must decide.
    #[error("Unresolved conflict: {0}")]
    Conflict(String),
}

/// A specialized `Result` type for opsdeck operations.
///
/// This is a type alias for `std::result::Result<T, OpsdeckError>` that simplifies
/// function signatures throughout the codebase.
pub type Result<T> = std::result::Result<T, OpsdeckError>;
