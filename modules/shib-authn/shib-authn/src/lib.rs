//! Shibboleth `AuthN` Resolver
//!
//! Loads the adapter configuration and selects the adapter implementation
//! based on `mode`:
//!
//! - **`shibboleth`** (default): reads the attributes injected by the
//!   Shibboleth web-server module.
//! - **`fake`**: returns a canned result, for development and tests.
//!
//! The resolver itself implements [`AuthNAdapter`](shib_authn_sdk::AuthNAdapter),
//! so callers hold one `ShibAuthN` regardless of the selected mode.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod config;
pub mod resolver;

pub use config::{AdapterMode, ShibAuthNConfig};
pub use resolver::{ShibAuthN, build_adapter};
