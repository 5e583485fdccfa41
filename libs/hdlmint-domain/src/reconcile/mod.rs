//! Handle reconciliation domain module
//!
//! This module contains the core business logic for minting and maintaining
//! persistent handle identifiers: which objects get one, how the canonical
//! URL is reflected into Dublin Core, and when both are retracted.

pub mod entity;
pub mod error;
pub mod ids;
pub mod report;
pub mod service;

pub use entity::{Association, DerivativeHook};
pub use error::{ReconcileError, Result};
pub use ids::{Dsid, Pid};
pub use report::{AttachReport, Channel, Message, Outcome, Severity};
pub use service::HandleReconciler;
