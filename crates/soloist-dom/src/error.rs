//! Error types for document access

use crate::types::NodeId;
use thiserror::Error;

/// Result type alias for document operations
pub type Result<T> = std::result::Result<T, DomError>;

/// Document operation errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomError {
    #[error("unknown node: {0}")]
    UnknownNode(NodeId),

    #[error("node {0} is not a media element")]
    NotMedia(NodeId),

    #[error("node {0} is not an anchor")]
    NotAnchor(NodeId),

    #[error("node {0} is not attached to the document")]
    Detached(NodeId),

    #[error("node {0} is already attached to the document")]
    AlreadyAttached(NodeId),
}

impl DomError {
    /// Returns the error code for diagnostics
    pub fn error_code(&self) -> &'static str {
        match self {
            DomError::UnknownNode(_) => "UNKNOWN_NODE",
            DomError::NotMedia(_) => "NOT_MEDIA",
            DomError::NotAnchor(_) => "NOT_ANCHOR",
            DomError::Detached(_) => "DETACHED",
            DomError::AlreadyAttached(_) => "ALREADY_ATTACHED",
        }
    }
}
