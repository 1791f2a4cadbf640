//! Adapter selection.

use std::path::Path;
use std::sync::Arc;

use fake_authn_plugin::FakeAuthN;
use shib_authn_sdk::{AuthNAdapter, AuthNError, AuthenticationResult};
use shibboleth_authn_plugin::{Environment, ShibbolethAuthN};
use tracing::{debug, info};

use crate::config::{AdapterMode, ShibAuthNConfig};

/// Build the adapter selected by `config.mode`.
///
/// The Shibboleth adapter reads `env` when given and otherwise captures the
/// process environment; the fake adapter ignores `env`.
///
/// # Errors
///
/// Returns `InvalidConfig` if the Shibboleth adapter configuration is invalid.
pub fn build_adapter(
    config: &ShibAuthNConfig,
    env: Option<Environment>,
) -> Result<Arc<dyn AuthNAdapter>, AuthNError> {
    info!(mode = ?config.mode, "Building authn adapter");

    let adapter: Arc<dyn AuthNAdapter> = match config.mode {
        AdapterMode::Shibboleth => {
            let env = env.unwrap_or_else(Environment::capture);
            Arc::new(ShibbolethAuthN::new(config.shibboleth.clone(), env)?)
        }
        AdapterMode::Fake => Arc::new(FakeAuthN::new(config.fake.clone())),
    };
    Ok(adapter)
}

/// Resolver wrapping the selected adapter.
#[derive(Clone)]
pub struct ShibAuthN {
    mode: AdapterMode,
    adapter: Arc<dyn AuthNAdapter>,
}

impl std::fmt::Debug for ShibAuthN {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShibAuthN")
            .field("mode", &self.mode)
            .finish_non_exhaustive()
    }
}

impl ShibAuthN {
    /// Build the resolver from configuration.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the selected adapter rejects its settings.
    pub fn from_config(
        config: &ShibAuthNConfig,
        env: Option<Environment>,
    ) -> Result<Self, AuthNError> {
        Ok(Self {
            mode: config.mode,
            adapter: build_adapter(config, env)?,
        })
    }

    /// Load configuration (see [`ShibAuthNConfig::load`]) and build the
    /// resolver over the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or adapter construction fails.
    pub fn from_config_file(path: Option<&Path>) -> anyhow::Result<Self> {
        let config = ShibAuthNConfig::load(path)?;
        Ok(Self::from_config(&config, None)?)
    }

    #[must_use]
    pub fn mode(&self) -> AdapterMode {
        self.mode
    }
}

impl AuthNAdapter for ShibAuthN {
    fn authenticate(&self) -> AuthenticationResult {
        let result = self.adapter.authenticate();
        if let Some(failure) = result.failure_details() {
            debug!(
                mode = ?self.mode,
                code = %failure.code,
                messages = ?failure.messages,
                "authentication failed"
            );
        }
        result
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use fake_authn_plugin::FakeAuthNConfig;
    use shib_authn_sdk::{AttributeValue, FailureCode};
    use shibboleth_authn_plugin::ShibbolethAuthNConfig;
    use tracing_test::traced_test;

    use super::*;

    fn env(vars: &[(&str, &str)]) -> Option<Environment> {
        Some(vars.iter().copied().collect())
    }

    #[test]
    fn default_mode_uses_shibboleth_adapter() {
        let resolver = ShibAuthN::from_config(
            &ShibAuthNConfig::default(),
            env(&[("Shib-Session-ID", "abc123"), ("eppn", "jdoe")]),
        )
        .unwrap();

        assert_eq!(resolver.mode(), AdapterMode::Shibboleth);
        let result = resolver.authenticate();
        assert_eq!(
            result
                .attributes()
                .and_then(|a| a.get("uid"))
                .and_then(AttributeValue::as_single),
            Some("jdoe")
        );
    }

    #[test]
    fn fake_mode_ignores_environment() {
        let cfg = ShibAuthNConfig {
            mode: AdapterMode::Fake,
            ..ShibAuthNConfig::default()
        };
        let resolver = ShibAuthN::from_config(&cfg, env(&[])).unwrap();

        let result = resolver.authenticate();
        assert_eq!(
            result
                .attributes()
                .and_then(|a| a.get("uid"))
                .and_then(AttributeValue::as_single),
            Some("tester")
        );
    }

    #[test]
    fn fake_mode_failure_passes_through() {
        let cfg = ShibAuthNConfig {
            mode: AdapterMode::Fake,
            fake: FakeAuthNConfig {
                fail: true,
                fail_message: "boom".to_owned(),
                ..FakeAuthNConfig::default()
            },
            ..ShibAuthNConfig::default()
        };
        let adapter = build_adapter(&cfg, None).unwrap();

        let result = adapter.authenticate();
        assert_eq!(result.code(), Some(FailureCode::GenericFailure));
        assert_eq!(result.messages(), &["boom"]);
    }

    #[test]
    fn invalid_shibboleth_config_is_rejected() {
        let cfg = ShibAuthNConfig {
            shibboleth: ShibbolethAuthNConfig {
                session_id_var: String::new(),
                ..ShibbolethAuthNConfig::default()
            },
            ..ShibAuthNConfig::default()
        };

        assert!(matches!(
            build_adapter(&cfg, env(&[])),
            Err(AuthNError::InvalidConfig(_))
        ));
    }

    #[test]
    fn invalid_shibboleth_config_ignored_in_fake_mode() {
        let cfg = ShibAuthNConfig {
            mode: AdapterMode::Fake,
            shibboleth: ShibbolethAuthNConfig {
                attr_value_separator: String::new(),
                ..ShibbolethAuthNConfig::default()
            },
            ..ShibAuthNConfig::default()
        };

        assert!(build_adapter(&cfg, None).is_ok());
    }

    #[test]
    #[traced_test]
    fn failures_are_logged_with_mode() {
        let resolver = ShibAuthN::from_config(&ShibAuthNConfig::default(), env(&[])).unwrap();

        let result = resolver.authenticate();
        assert!(!result.is_success());
        assert!(logs_contain("authentication failed"));
        assert!(logs_contain("no_session"));
    }
}
