//! Domain errors for handle reconciliation
//!
//! These are the errors collaborator ports report back to the reconciler.
//! They abstract away infrastructure details (no HTTP client or repository
//! SDK error types here) and never escape a public reconciler operation:
//! the service folds every one of them into a failed [`Outcome`] message.
//!
//! [`Outcome`]: crate::reconcile::report::Outcome

use hdlmint_dc::DcError;
use thiserror::Error;

/// Errors reported by collaborator ports during reconciliation
#[derive(Error, Debug)]
pub enum ReconcileError {
    /// The handle registry could not be reached or answered out of protocol
    #[error("Handle registry request failed: {0}")]
    Registry(String),

    /// The content repository could not be reached or refused the operation
    #[error("Repository access failed: {0}")]
    Repository(String),

    /// A datastream expected on the object is missing
    #[error("Datastream {dsid} not found on {pid}")]
    DatastreamMissing { pid: String, dsid: String },

    /// The DC datastream could not be parsed or serialized
    #[error("Dublin Core processing failed: {0}")]
    Metadata(#[from] DcError),

    /// The external attachment step failed outright
    #[error("Handle attachment failed: {0}")]
    Attachment(String),
}

impl ReconcileError {
    /// Create a registry error with a message
    pub fn registry(msg: impl Into<String>) -> Self {
        Self::Registry(msg.into())
    }

    /// Create a repository error with a message
    pub fn repository(msg: impl Into<String>) -> Self {
        Self::Repository(msg.into())
    }

    /// Create a missing-datastream error
    pub fn datastream_missing(pid: impl Into<String>, dsid: impl Into<String>) -> Self {
        Self::DatastreamMissing {
            pid: pid.into(),
            dsid: dsid.into(),
        }
    }

    /// Create an attachment error with a message
    pub fn attachment(msg: impl Into<String>) -> Self {
        Self::Attachment(msg.into())
    }
}

/// Result type alias for reconciliation port operations
pub type Result<T> = std::result::Result<T, ReconcileError>;
