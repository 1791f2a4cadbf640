//! Configuration for the fake `AuthN` adapter.

use serde::Deserialize;
use shib_authn_sdk::{Attributes, FailureCode};

/// Adapter configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FakeAuthNConfig {
    /// Return a failure instead of the canned user.
    pub fail: bool,

    /// Failure code returned when `fail` is set.
    pub fail_code: FailureCode,

    /// Single failure message returned when `fail` is set.
    pub fail_message: String,

    /// Attributes returned verbatim on success.
    pub user_attrs: Attributes,
}

impl Default for FakeAuthNConfig {
    fn default() -> Self {
        Self {
            fail: false,
            fail_code: FailureCode::GenericFailure,
            fail_message: "auth error".to_owned(),
            user_attrs: default_user(),
        }
    }
}

fn default_user() -> Attributes {
    [
        ("uid", "tester"),
        ("cn", "Test User"),
        ("email", "test@example.com"),
    ]
    .into_iter()
    .collect()
}
