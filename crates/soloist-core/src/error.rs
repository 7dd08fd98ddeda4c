//! Error types for Soloist Core

use thiserror::Error;

/// Result type alias for coordinator operations
pub type Result<T> = std::result::Result<T, Error>;

/// Coordinator error types
#[derive(Error, Debug)]
pub enum Error {
    // Document errors
    #[error("document error: {0}")]
    Dom(#[from] soloist_dom::DomError),

    // Upgrade errors
    #[error("invalid playback phase transition: {from} -> {to}")]
    InvalidPhaseTransition { from: String, to: String },

    #[error("element {0} has no upgrade record")]
    NotUpgraded(soloist_dom::NodeId),
}

impl Error {
    /// Returns the error code for diagnostics
    pub fn error_code(&self) -> &'static str {
        match self {
            Error::Dom(_) => "DOM",
            Error::InvalidPhaseTransition { .. } => "INVALID_PHASE",
            Error::NotUpgraded(_) => "NOT_UPGRADED",
        }
    }
}
