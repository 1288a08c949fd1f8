//! Error types for request dispatch.

use thiserror::Error;

/// A dispatch request that cannot be run as given.
///
/// Raised before any engine runs, so there are never partial results.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidRequestError {
    /// The method name is not one of the dispatchable strategies
    #[error("Unknown recommendation method '{0}' (expected popularity, content or collaborative)")]
    UnknownMethod(String),

    /// One or more parameters the method needs were not supplied
    #[error("Missing required parameters for {method}: {}", missing.join(", "))]
    MissingParameters {
        method: &'static str,
        missing: Vec<&'static str>,
    },

    /// A parameter was supplied with an unusable value
    #[error("Invalid value for '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, InvalidRequestError>;
