//! Configuration for the Shibboleth `AuthN` resolver.

use std::path::Path;

use anyhow::Context;
use fake_authn_plugin::FakeAuthNConfig;
use figment::Figment;
use figment::providers::{Env, Format, Yaml};
use figment::value::Value;
use serde::Deserialize;
use shibboleth_authn_plugin::ShibbolethAuthNConfig;

/// Prefix of environment variables overriding file configuration.
///
/// Nested keys are separated by `__`, e.g. `SHIB_AUTHN__SHIBBOLETH__ATTR_PREFIX`.
pub const ENV_PREFIX: &str = "SHIB_AUTHN__";

/// Configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShibAuthNConfig {
    /// Which adapter to build.
    pub mode: AdapterMode,

    /// Settings of the Shibboleth adapter.
    pub shibboleth: ShibbolethAuthNConfig,

    /// Settings of the fake adapter.
    pub fake: FakeAuthNConfig,
}

/// Adapter selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdapterMode {
    /// Read attributes from the Shibboleth environment.
    #[default]
    Shibboleth,
    /// Return the canned result of the fake adapter.
    Fake,
}

impl ShibAuthNConfig {
    /// Load configuration: defaults, then the YAML file (if any), then
    /// `SHIB_AUTHN__*` environment variables.
    ///
    /// The file is read from exactly `path` (relative to the working
    /// directory); parent directories are not searched.
    ///
    /// Maps in the YAML file are merged key-sorted, so `attr_map` must use the
    /// list form when lookup order matters. A map-form `attr_map` is accepted
    /// with a warning.
    ///
    /// # Errors
    ///
    /// Returns an error if `path` is not an existing file, the file cannot be
    /// parsed, or a value has the wrong type or an unknown key.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut figment = Figment::new();
        if let Some(path) = path {
            if !path.is_file() {
                anyhow::bail!("shib-authn configuration file {} not found", path.display());
            }
            figment = figment.merge(Yaml::file_exact(path));
        }
        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

        if let Ok(Value::Dict(..)) = figment.find_value("shibboleth.attr_map") {
            tracing::warn!(
                file = ?path,
                "shibboleth.attr_map is a map and is applied in key-sorted order; \
                 use a list of {{source, destination}} entries to keep declaration order"
            );
        }

        let cfg: Self = figment
            .extract()
            .context("failed to load shib-authn configuration")?;

        tracing::debug!(
            mode = ?cfg.mode,
            file = ?path,
            "Loaded shib-authn configuration"
        );
        Ok(cfg)
    }
}
