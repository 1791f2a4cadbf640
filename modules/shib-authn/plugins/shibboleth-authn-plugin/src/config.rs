//! Configuration for the Shibboleth `AuthN` adapter.

use std::fmt;

use serde::Deserialize;
use serde::de::{Deserializer, MapAccess, SeqAccess, Visitor};
use shib_authn_sdk::AuthNError;

/// Adapter configuration.
///
/// Every field falls back to its default when absent; unknown keys are
/// rejected.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShibbolethAuthNConfig {
    /// Prepended to every environment key before lookup.
    pub attr_prefix: String,

    /// Delimiter between the values of a multi-valued attribute.
    pub attr_value_separator: String,

    /// Environment key whose presence indicates a live session.
    pub session_id_var: String,

    /// Environment key of the identity provider entity ID.
    pub idp_var: String,

    /// Environment key of the application ID.
    pub app_id_var: String,

    /// Environment key of the authentication timestamp.
    pub auth_instant_var: String,

    /// Environment key of the authentication context declaration.
    pub auth_context_var: String,

    /// Result attribute that must hold exactly one value for success.
    pub identity_var: String,

    /// Whether to add the raw system variables under the `env` group.
    pub system_vars_in_result: bool,

    /// Source environment attribute to result attribute mapping.
    pub attr_map: AttributeMap,
}

impl Default for ShibbolethAuthNConfig {
    fn default() -> Self {
        Self {
            attr_prefix: String::new(),
            attr_value_separator: ";".to_owned(),
            session_id_var: "Shib-Session-ID".to_owned(),
            idp_var: "Shib-Identity-Provider".to_owned(),
            app_id_var: "Shib-Application-ID".to_owned(),
            auth_instant_var: "Shib-Authentication-Instant".to_owned(),
            auth_context_var: "Shib-AuthnContext-Decl".to_owned(),
            identity_var: "uid".to_owned(),
            system_vars_in_result: true,
            attr_map: AttributeMap::default(),
        }
    }
}

impl ShibbolethAuthNConfig {
    /// Names of the system variables, in the order they appear in results.
    #[must_use]
    pub fn system_vars(&self) -> [&str; 4] {
        [
            self.idp_var.as_str(),
            self.app_id_var.as_str(),
            self.auth_instant_var.as_str(),
            self.auth_context_var.as_str(),
        ]
    }

    /// Reject settings the adapter cannot work with.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the separator, the session variable or the
    /// identity attribute is empty.
    pub fn validate(&self) -> Result<(), AuthNError> {
        if self.attr_value_separator.is_empty() {
            return Err(AuthNError::invalid_config(
                "attr_value_separator must not be empty",
            ));
        }
        if self.session_id_var.is_empty() {
            return Err(AuthNError::invalid_config("session_id_var must not be empty"));
        }
        if self.identity_var.is_empty() {
            return Err(AuthNError::invalid_config("identity_var must not be empty"));
        }
        Ok(())
    }
}

/// Maps one environment attribute to one result attribute.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AttributeMapping {
    /// Environment attribute name (without prefix).
    pub source: String,
    /// Attribute name in the result.
    pub destination: String,
}

/// Ordered attribute mapping.
///
/// Deserializes from a map (`{eppn: uid}`, document order kept) or from a
/// list of `{source, destination}` entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeMap(Vec<AttributeMapping>);

impl AttributeMap {
    pub fn iter(&self) -> std::slice::Iter<'_, AttributeMapping> {
        self.0.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for AttributeMap {
    fn default() -> Self {
        [("eppn", "uid"), ("cn", "cn"), ("mail", "email")]
            .into_iter()
            .collect()
    }
}

impl<S, D> FromIterator<(S, D)> for AttributeMap
where
    S: Into<String>,
    D: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (S, D)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(source, destination)| AttributeMapping {
                    source: source.into(),
                    destination: destination.into(),
                })
                .collect(),
        )
    }
}

impl<'a> IntoIterator for &'a AttributeMap {
    type Item = &'a AttributeMapping;
    type IntoIter = std::slice::Iter<'a, AttributeMapping>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<'de> Deserialize<'de> for AttributeMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct AttributeMapVisitor;

        impl<'de> Visitor<'de> for AttributeMapVisitor {
            type Value = AttributeMap;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of source to destination names or a list of mappings")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<AttributeMap, A::Error> {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((source, destination)) = access.next_entry::<String, String>()? {
                    entries.push(AttributeMapping {
                        source,
                        destination,
                    });
                }
                Ok(AttributeMap(entries))
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut access: A) -> Result<AttributeMap, A::Error> {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some(mapping) = access.next_element::<AttributeMapping>()? {
                    entries.push(mapping);
                }
                Ok(AttributeMap(entries))
            }
        }

        deserializer.deserialize_any(AttributeMapVisitor)
    }
}
