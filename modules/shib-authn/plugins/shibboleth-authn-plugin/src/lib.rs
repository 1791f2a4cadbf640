#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Shibboleth `AuthN` Adapter
//!
//! Reads the identity attributes the Shibboleth web-server module injects into
//! the request environment after a successful SAML exchange. The handshake
//! itself and session validation happen in the web server; this adapter only
//! interprets their output.
//!
//! ## Flow
//!
//! 1. No `Shib-Session-ID` (after prefixing): generic failure, `no_session`.
//! 2. Each `attr_map` entry is looked up and split on `attr_value_separator`.
//! 3. The raw system variables are optionally added under `env`.
//! 4. The identity attribute must be present (`no_identity`) and single-valued
//!    (`multiple_id_attr_value`).
//!
//! ## Configuration
//!
//! ```yaml
//! attr_prefix: ""
//! attr_value_separator: ";"
//! session_id_var: "Shib-Session-ID"
//! identity_var: "uid"
//! system_vars_in_result: true
//! attr_map:
//!   eppn: uid
//!   cn: cn
//!   mail: email
//! ```

pub mod config;
pub mod domain;

pub use config::{AttributeMap, AttributeMapping, ShibbolethAuthNConfig};
pub use domain::{Environment, Service as ShibbolethAuthN};
