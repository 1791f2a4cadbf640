//! Domain layer for the Shibboleth `AuthN` adapter.

pub mod client;
pub mod environment;
pub mod service;

pub use environment::Environment;
pub use service::Service;
