//! Infrastructure layer: platform-specific utilities.

pub mod paths;

pub use paths::default_data_dir;
