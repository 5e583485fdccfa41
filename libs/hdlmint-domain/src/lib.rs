//! # HdlMint Domain Layer
//!
//! This crate contains the pure reconciliation logic for minting and
//! maintaining persistent handle identifiers over repository objects. It
//! follows hexagonal architecture principles:
//!
//! - **Entities**: Core domain models (Association, DerivativeHook) and
//!   identifier newtypes (Pid, Dsid)
//! - **Ports**: Trait definitions for external dependencies (HandleRegistry,
//!   AssociationStore, RepositoryObject, HandleAttacher)
//! - **Service**: The HandleReconciler orchestrating the create / sync /
//!   retract policy
//!
//! ## Architecture
//!
//! This layer has NO dependencies on infrastructure concerns (HTTP clients,
//! repository SDKs, etc.). All external dependencies are expressed as traits
//! (ports) implemented by adapter layers; every public operation reports
//! through the structured [`reconcile::Outcome`] rather than raising errors.
//!
//! ## Example
//!
//! ```rust
//! use hdlmint_domain::ports::{AssociationStore, HandleAttacher, HandleRegistry, RepositoryObject};
//! use hdlmint_domain::reconcile::{DerivativeHook, HandleReconciler};
//!
//! // The reconciler is generic over any port implementations
//! async fn example<R, A, B, O>(reconciler: HandleReconciler<R, A, B>, object: O)
//! where
//!     R: HandleRegistry,
//!     A: AssociationStore,
//!     B: HandleAttacher,
//!     O: RepositoryObject,
//! {
//!     let hook = DerivativeHook::new("OBJ");
//!     let outcome = reconciler.ensure_and_attach(&object, &hook).await;
//!     println!("handle reconciled: {}", outcome.success());
//! }
//! ```

pub mod ports;
pub mod reconcile;

// Re-export commonly used types
pub use hdlmint_dc::HANDLE_RESOLVER_BASE;
pub use ports::{
    AssociationStore, HandleAttacher, HandleRegistry, RegistryResponse, RepositoryObject,
};
pub use reconcile::{
    Association, AttachReport, Channel, DerivativeHook, Dsid, HandleReconciler, Message, Outcome,
    Pid, ReconcileError, Severity,
};
