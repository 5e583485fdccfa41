//! Ports (trait definitions) for external dependencies
//!
//! This module defines the contracts the reconciler needs from the outside
//! world. Following hexagonal architecture, the domain declares what it
//! needs and infrastructure adapters (or the host pipeline) provide
//! implementations: a handle registry client, the association configuration,
//! the repository object abstraction, and the attachment step.
//!
//! ## Static Dispatch
//!
//! Methods that cross the network use native `impl Future` return types
//! instead of `async_trait`, so the compiler monomorphizes each
//! implementation and no trait objects are involved. Cheap local lookups
//! (association config, canonical URL construction, datastream membership)
//! stay synchronous.

use std::future::Future;

use crate::reconcile::{
    entity::Association,
    error::ReconcileError,
    ids::{Dsid, Pid},
    report::AttachReport,
};

/// Raw outcome of a registry create/delete call
///
/// The registry reports a response code and, on rejection, whatever error
/// detail it produced. Interpretation of the codes (201 created; 204 or 500
/// acceptable on delete) belongs to the reconciler, not the adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryResponse {
    /// Response code reported by the registry
    pub code: u16,
    /// Error detail reported alongside a rejection, when the registry sent one
    pub error: Option<String>,
}

impl RegistryResponse {
    /// A response carrying only a code
    pub fn ok(code: u16) -> Self {
        Self { code, error: None }
    }

    /// A response carrying a code and error detail
    pub fn with_error(code: u16, error: impl Into<String>) -> Self {
        Self {
            code,
            error: Some(error.into()),
        }
    }

    /// Error detail for reporting, falling back to the bare response code
    pub fn error_detail(&self) -> String {
        self.error
            .clone()
            .unwrap_or_else(|| format!("unexpected response code {}", self.code))
    }
}

/// Port for the handle registry (the identifier-resolution service)
///
/// Implementations must convert their transport errors into
/// [`ReconcileError::Registry`] and must not apply any response-code policy
/// themselves: an unexpected code is returned, not mapped to an error.
pub trait HandleRegistry: Send + Sync {
    /// Check whether a handle exists for the pid
    ///
    /// # Errors
    ///
    /// Returns `ReconcileError::Registry` if the registry cannot be queried
    fn exists(&self, pid: &Pid) -> impl Future<Output = Result<bool, ReconcileError>> + Send;

    /// Request creation of a handle for the pid
    ///
    /// Returns the registry's raw response; creation succeeded iff the
    /// reconciler finds the expected code in it.
    ///
    /// # Errors
    ///
    /// Returns `ReconcileError::Registry` if the request cannot be delivered
    fn create(
        &self,
        pid: &Pid,
    ) -> impl Future<Output = Result<RegistryResponse, ReconcileError>> + Send;

    /// Request deletion of the pid's handle
    ///
    /// # Errors
    ///
    /// Returns `ReconcileError::Registry` if the request cannot be delivered
    fn delete(
        &self,
        pid: &Pid,
    ) -> impl Future<Output = Result<RegistryResponse, ReconcileError>> + Send;

    /// The canonical resolvable URL for the pid's handle
    ///
    /// Deterministic string construction of the fixed
    /// `http://hdl.handle.net/<prefix>/<pid>` form; performs no network call.
    fn canonical_url(&self, pid: &Pid) -> String;
}

/// Port for the association configuration
pub trait AssociationStore: Send + Sync {
    /// Associations applying to the given content models
    ///
    /// The result preserves the store's configured order within each model
    /// and the caller's order across models; the reconciler commits to the
    /// first match in that order.
    fn associations_for(&self, models: &[String]) -> Vec<Association>;
}

/// Port for the digital object abstraction
///
/// The reconciler only reads and writes through this interface; it never
/// creates or destroys objects. Datastream content access is async because
/// real implementations talk to a remote repository; membership and metadata
/// are served from the object's profile and stay synchronous.
pub trait RepositoryObject: Send + Sync {
    /// The object's persistent identifier
    fn pid(&self) -> &Pid;

    /// The object's content models, in repository order
    fn models(&self) -> Vec<String>;

    /// Whether the object currently carries the datastream
    fn has_datastream(&self, dsid: &Dsid) -> bool;

    /// Read the datastream's content
    ///
    /// # Errors
    ///
    /// Returns `ReconcileError::DatastreamMissing` if the datastream is not
    /// present, or `ReconcileError::Repository` if the repository fails
    fn read_datastream(
        &self,
        dsid: &Dsid,
    ) -> impl Future<Output = Result<Vec<u8>, ReconcileError>> + Send;

    /// Replace the datastream's content
    ///
    /// # Errors
    ///
    /// Returns `ReconcileError::Repository` if the repository rejects the write
    fn write_datastream(
        &self,
        dsid: &Dsid,
        content: Vec<u8>,
    ) -> impl Future<Output = Result<(), ReconcileError>> + Send;
}

/// Port for the external attachment step
///
/// Applies the association's transform to the datastream and embeds the
/// handle reference. The work itself is out of scope for the reconciler; it
/// only accumulates the report.
pub trait HandleAttacher: Send + Sync {
    /// Apply the handle to the object's datastream
    ///
    /// # Errors
    ///
    /// Returns `ReconcileError::Attachment` if the step fails before it can
    /// produce a report
    fn attach<O>(
        &self,
        object: &O,
        dsid: &Dsid,
        transform: &str,
    ) -> impl Future<Output = Result<AttachReport, ReconcileError>> + Send
    where
        O: RepositoryObject;
}
