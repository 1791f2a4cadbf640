//! Service implementation for the Shibboleth `AuthN` adapter.

use shib_authn_sdk::{
    AttributeValue, Attributes, AuthNError, AuthenticationResult, ENV_GROUP, FailureCode,
    MULTIPLE_ID_ATTR_VALUE, NO_IDENTITY, NO_SESSION,
};
use tracing::{debug, info, trace};

use super::environment::Environment;
use crate::config::ShibbolethAuthNConfig;

/// Shibboleth `AuthN` service.
///
/// Reads the attributes released by the identity provider from the
/// environment snapshot taken at construction:
/// - no session variable: generic failure
/// - identity attribute missing: `IdentityNotFound`
/// - identity attribute multi-valued: `IdentityAmbiguous`
#[derive(Debug, Clone)]
pub struct Service {
    config: ShibbolethAuthNConfig,
    env: Environment,
}

impl Service {
    /// Create a service over an explicit environment.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the configuration fails validation.
    pub fn new(config: ShibbolethAuthNConfig, env: Environment) -> Result<Self, AuthNError> {
        config.validate()?;

        info!(
            attr_prefix = %config.attr_prefix,
            separator = %config.attr_value_separator,
            identity_var = %config.identity_var,
            mapping_count = config.attr_map.len(),
            env_size = env.len(),
            "Shibboleth authn adapter configured"
        );

        Ok(Self { config, env })
    }

    /// Create a service over a snapshot of the current process environment.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the configuration fails validation.
    pub fn from_process_env(config: ShibbolethAuthNConfig) -> Result<Self, AuthNError> {
        Self::new(config, Environment::capture())
    }

    #[must_use]
    pub fn config(&self) -> &ShibbolethAuthNConfig {
        &self.config
    }

    /// Check the session and extract the mapped attributes.
    #[must_use]
    pub fn authenticate(&self) -> AuthenticationResult {
        if self.lookup(&self.config.session_id_var).is_none() {
            debug!(
                session_id_var = %self.config.session_id_var,
                "No Shibboleth session in environment"
            );
            return failure(FailureCode::GenericFailure, NO_SESSION);
        }

        let mut attrs = self.extract_attributes();

        if self.config.system_vars_in_result {
            let system = self.extract_system_vars();
            if !system.is_empty() {
                attrs.insert(ENV_GROUP, system);
            }
        }

        let Some(identity) = attrs.get(&self.config.identity_var) else {
            debug!(
                identity_var = %self.config.identity_var,
                "Identity attribute not released"
            );
            return failure(FailureCode::IdentityNotFound, NO_IDENTITY);
        };

        if identity.as_single().is_none() {
            debug!(
                identity_var = %self.config.identity_var,
                "Identity attribute has multiple values"
            );
            return failure(FailureCode::IdentityAmbiguous, MULTIPLE_ID_ATTR_VALUE);
        }

        debug!(attribute_count = attrs.len(), "Shibboleth authentication succeeded");
        AuthenticationResult::success(attrs)
    }

    fn lookup(&self, name: &str) -> Option<&str> {
        self.env.get(&format!("{}{name}", self.config.attr_prefix))
    }

    fn extract_attributes(&self) -> Attributes {
        let mut attrs = Attributes::new();
        for mapping in &self.config.attr_map {
            if let Some(raw) = self.lookup(&mapping.source) {
                attrs.insert(
                    mapping.destination.as_str(),
                    split_value(raw, &self.config.attr_value_separator),
                );
            } else {
                trace!(source = %mapping.source, "Attribute not present");
            }
        }
        attrs
    }

    // Keyed by the configured environment-variable name, not the option name.
    fn extract_system_vars(&self) -> Attributes {
        self.config
            .system_vars()
            .into_iter()
            .filter_map(|name| self.lookup(name).map(|value| (name, value)))
            .collect()
    }
}

fn split_value(raw: &str, separator: &str) -> AttributeValue {
    let parts: Vec<String> = raw.split(separator).map(str::to_owned).collect();
    if parts.len() == 1 {
        AttributeValue::Single(raw.to_owned())
    } else {
        AttributeValue::Multi(parts)
    }
}

fn failure(code: FailureCode, message: &str) -> AuthenticationResult {
    AuthenticationResult::failure(code, vec![message.to_owned()])
}
