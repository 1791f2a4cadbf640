//! Domain layer for the fake `AuthN` adapter.

pub mod client;
pub mod service;

pub use service::Service;
