//! Document error types

use thiserror::Error;

/// Errors raised while building or querying a document
#[derive(Error, Debug)]
pub enum DomError {
    /// Selector text could not be parsed
    #[error("invalid selector '{selector}': {message}")]
    InvalidSelector { selector: String, message: String },

    /// Markup JSON could not be decoded
    #[error("invalid markup: {0}")]
    Markup(#[from] serde_json::Error),

    /// A node handle does not refer to a live node
    #[error("unknown node")]
    UnknownNode,
}

/// Result type for document operations
pub type Result<T> = std::result::Result<T, DomError>;
