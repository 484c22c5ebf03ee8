//! Error types for the crate's fallible surfaces
//!
//! Move selection and analysis never fail; errors only come from loading
//! configuration and parsing text boards.

use std::path::PathBuf;

use thiserror::Error;

pub use crate::board::BoardParseError;

/// Failure to load or validate an [`EngineConfig`](crate::config::EngineConfig).
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid value for `{field}`: {message}")]
    Invalid { field: &'static str, message: String },
}

impl ConfigError {
    pub(crate) fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        ConfigError::Invalid {
            field,
            message: message.into(),
        }
    }
}
