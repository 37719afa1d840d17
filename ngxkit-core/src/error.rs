//! Error types for the ngxkit model

use thiserror::Error;

/// Result type for model operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the model layer
#[derive(Error, Debug)]
pub enum Error {
    /// An upstream with this name already exists in the parse unit
    #[error("Duplicate upstream name: {name}")]
    DuplicateUpstream { name: String },

    /// Status code outside 300..=599 and not `*`
    #[error("Invalid status code: {value}")]
    InvalidStatus { value: String },

    /// An error page must name at least one status code
    #[error("error_page for {uri} has no status codes")]
    EmptyErrorPage { uri: String },

    /// A serialized model document could not be decoded
    #[error("Model document error: {0}")]
    Document(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
