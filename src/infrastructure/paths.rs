//! Data directory resolution.
//!
//! Storage slots live in one data directory. Resolution order: the
//! `OPSDECK_DATA_DIR` environment variable, then the XDG-style default under
//! the home directory, then a dot directory in the working directory for
//! environments without a home.

use std::path::PathBuf;

/// Returns the default data directory for opsdeck storage.
///
/// # Examples
///
/// ```no_run
/// use opsdeck::infrastructure::default_data_dir;
///
/// let dir = default_data_dir();
/// ```
#[must_use]
pub fn default_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("OPSDECK_DATA_DIR") {
        return PathBuf::from(dir);
    }
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".local/share/opsdeck");
    }
    PathBuf::from(".opsdeck")
}
