//! Shibboleth `AuthN` SDK
//!
//! This crate provides the shared contract for the authentication adapters:
//!
//! - [`AuthNAdapter`] - Adapter trait implemented by the Shibboleth and fake adapters
//! - [`AuthenticationResult`] - Two-outcome authentication result
//! - [`Attributes`] / [`AttributeValue`] - Ordered attribute mapping carried on success
//! - [`FailureCode`] - Closed set of failure reasons
//! - [`AuthNError`] - Construction-time errors
//!
//! ## Usage
//!
//! ```ignore
//! use shib_authn_sdk::AuthNAdapter;
//!
//! let result = adapter.authenticate();
//! if let Some(attrs) = result.attributes() {
//!     let uid = attrs.get("uid");
//! }
//! ```
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod api;
pub mod error;
pub mod models;

// Re-export main types at crate root
pub use api::AuthNAdapter;
pub use error::AuthNError;
pub use models::{
    AttributeValue, Attributes, AuthenticationFailure, AuthenticationResult, ENV_GROUP,
    FailureCode, MULTIPLE_ID_ATTR_VALUE, NO_IDENTITY, NO_SESSION,
};
