#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Fake `AuthN` Adapter
//!
//! Stands in for the Shibboleth adapter during development and testing. It
//! never looks at the environment: the outcome is a pure function of the
//! configuration.
//!
//! ## Configuration
//!
//! ```yaml
//! fail: false
//! fail_code: generic_failure   # or identity_not_found, identity_ambiguous, 0, -1, -2
//! fail_message: "auth error"
//! user_attrs:
//!   uid: "tester"
//!   cn: "Test User"
//!   email: "test@example.com"
//! ```

pub mod config;
pub mod domain;

pub use config::FakeAuthNConfig;
pub use domain::Service as FakeAuthN;
