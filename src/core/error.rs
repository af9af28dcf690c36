//! Error types for reading and querying spec files

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by [`crate::core::config::ConfigStore`].
///
/// Malformed values are never errors; they decode to a default instead.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A lookup in strict mode found no entry. `key` is the name exactly as
    /// the caller asked for it.
    #[error("config key '{key}' not found")]
    KeyNotFound { key: String },

    #[error("Can't open {}", path.display())]
    FileOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, ConfigError>;
