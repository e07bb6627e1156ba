//! Error types for the lookup client, CLI inputs and server bootstrap
use thiserror::Error;

/// Errors raised outside the rendering paths.
///
/// Renderers and the configurator never fail; they degrade to reduced markup.
#[derive(Debug, Error)]
pub enum VmAwsError {
    /// Transport failure while calling the remote lookup endpoint
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The remote endpoint answered with a non-success status
    #[error("Remote endpoint returned {status} for {url}")]
    Status { status: u16, url: String },

    /// Invalid JSON in a subscription file or a response body
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Missing or malformed configuration value
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Template render error: {0}")]
    Template(#[from] askama::Error),
}

pub type Result<T> = std::result::Result<T, VmAwsError>;
