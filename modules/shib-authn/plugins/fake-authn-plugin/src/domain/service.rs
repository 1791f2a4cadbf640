//! Service implementation for the fake `AuthN` adapter.

use shib_authn_sdk::AuthenticationResult;

use crate::config::FakeAuthNConfig;

/// Fake `AuthN` service.
///
/// Returns either the configured failure or the configured user, without
/// inspecting any environment.
#[derive(Debug, Clone)]
pub struct Service {
    config: FakeAuthNConfig,
}

impl Service {
    /// Create a service from adapter configuration.
    #[must_use]
    pub fn new(config: FakeAuthNConfig) -> Self {
        tracing::warn!(
            "Fake AuthN adapter is active: every request gets a canned \
             result without a Shibboleth session. Do NOT use this adapter in production."
        );

        tracing::info!(
            fail = config.fail,
            fail_code = %config.fail_code,
            attribute_count = config.user_attrs.len(),
            "Loaded fake adapter configuration"
        );

        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &FakeAuthNConfig {
        &self.config
    }

    /// Return the configured outcome.
    #[must_use]
    pub fn authenticate(&self) -> AuthenticationResult {
        if self.config.fail {
            return AuthenticationResult::failure(
                self.config.fail_code,
                vec![self.config.fail_message.clone()],
            );
        }
        AuthenticationResult::success(self.config.user_attrs.clone())
    }
}
