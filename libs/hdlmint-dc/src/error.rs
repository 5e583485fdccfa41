//! Error types for Dublin Core editing

use thiserror::Error;

/// Result type alias for Dublin Core operations
pub type Result<T> = std::result::Result<T, DcError>;

/// Errors that can occur while reading or writing a Dublin Core document
#[derive(Error, Debug)]
pub enum DcError {
    /// The datastream content is not well-formed XML
    #[error("Malformed Dublin Core document: {0}")]
    Parse(#[from] xmltree::ParseError),

    /// The edited tree could not be serialized back to bytes
    #[error("Failed to serialize Dublin Core document: {0}")]
    Serialize(#[from] xmltree::Error),
}
