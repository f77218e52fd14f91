//! Error types for tree path resolution and data loading.

use crate::selection::View;
use thiserror::Error;

/// Resolution and fetch errors.
///
/// `NotFound` and `FetchFailed` are deliberately distinct: the former means
/// every candidate path was probed without success, the latter means a path
/// probed successfully but the follow-up fetch no longer returned readable
/// content (probe and fetch are two separate requests).
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("Missing `{field}` parameter for {view} view")]
    MissingParameter { view: View, field: &'static str },

    #[error("Could not find tree file for {view} view")]
    NotFound { view: View },

    #[error("Failed to load tree data from {path}: {reason}")]
    FetchFailed { path: String, reason: String },

    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<config::ConfigError> for ResolveError {
    fn from(err: config::ConfigError) -> Self {
        ResolveError::Config(err.to_string())
    }
}
