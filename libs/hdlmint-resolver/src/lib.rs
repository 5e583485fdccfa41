//! # HdlMint Resolver Adapter
//!
//! Infrastructure crate implementing the domain's
//! [`HandleRegistry`](hdlmint_domain::ports::HandleRegistry) port against a
//! Handle.net-compatible resolver's administrative REST API. The domain
//! layer stays free of HTTP concerns; this adapter owns request delivery,
//! error-body extraction, and the translation of transport failures into
//! domain errors.

pub mod infrastructure;

pub use infrastructure::RestHandleRegistry;
