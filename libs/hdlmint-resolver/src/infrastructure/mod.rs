//! Infrastructure implementations of the domain ports

mod rest_registry;

pub use rest_registry::RestHandleRegistry;
