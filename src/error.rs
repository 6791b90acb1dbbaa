//! Error types for the Williamsburg guide application

use thiserror::Error;

/// Typed errors the guide can actually surface.
///
/// Upstream failures never appear here: the adapters absorb network, status,
/// and parse errors at their boundary and fall back to static or empty data,
/// so configuration is the only thing that can fail past startup plumbing.
#[derive(Error, Debug)]
pub enum GuideError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl GuideError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}
