//! Error types for content operations

use thiserror::Error;

/// Errors that can occur during content operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContentError {
    /// A value does not satisfy a content format rule
    #[error("Content validation failed: {0}")]
    Validation(String),

    /// An uploaded document is not in a format the importer accepts
    #[error("Unsupported document format: {0}")]
    UnsupportedFormat(String),
}
