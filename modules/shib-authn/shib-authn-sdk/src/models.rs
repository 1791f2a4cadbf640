//! Domain models for the Shibboleth `AuthN` adapters.

use std::fmt;
use std::str::FromStr;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::AuthNError;

/// Failure message: no session indicator in the environment.
pub const NO_SESSION: &str = "no_session";

/// Failure message: no value mapped to the identity attribute.
pub const NO_IDENTITY: &str = "no_identity";

/// Failure message: the identity attribute carried more than one value.
pub const MULTIPLE_ID_ATTR_VALUE: &str = "multiple_id_attr_value";

/// Result key of the nested group holding raw system variables.
pub const ENV_GROUP: &str = "env";

/// Reason an authentication attempt did not succeed.
///
/// Configuration accepts either the `snake_case` name (`identity_not_found`),
/// the upper-case enumeration name (`IDENTITY_NOT_FOUND`) or the numeric
/// code (`-1`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "FailureCodeRepr")]
pub enum FailureCode {
    /// Unspecified failure, also used when no session is present.
    #[default]
    GenericFailure,
    /// A session exists but no identity attribute was released.
    IdentityNotFound,
    /// The identity attribute resolved to several values.
    IdentityAmbiguous,
}

impl FailureCode {
    /// Numeric code for frameworks that expect integer result codes.
    #[must_use]
    pub fn code(self) -> i64 {
        match self {
            Self::GenericFailure => 0,
            Self::IdentityNotFound => -1,
            Self::IdentityAmbiguous => -2,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::GenericFailure => "generic_failure",
            Self::IdentityNotFound => "identity_not_found",
            Self::IdentityAmbiguous => "identity_ambiguous",
        }
    }
}

impl fmt::Display for FailureCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<i64> for FailureCode {
    type Error = AuthNError;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::GenericFailure),
            -1 => Ok(Self::IdentityNotFound),
            -2 => Ok(Self::IdentityAmbiguous),
            other => Err(AuthNError::UnknownFailureCode(other)),
        }
    }
}

impl FromStr for FailureCode {
    type Err = AuthNError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [
            Self::GenericFailure,
            Self::IdentityNotFound,
            Self::IdentityAmbiguous,
        ]
        .into_iter()
        .find(|c| c.as_str().eq_ignore_ascii_case(s))
        .ok_or_else(|| AuthNError::invalid_config(format!("unknown failure code name '{s}'")))
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum FailureCodeRepr {
    Code(i64),
    Name(String),
}

impl TryFrom<FailureCodeRepr> for FailureCode {
    type Error = AuthNError;

    fn try_from(repr: FailureCodeRepr) -> Result<Self, Self::Error> {
        match repr {
            FailureCodeRepr::Code(code) => Self::try_from(code),
            FailureCodeRepr::Name(name) => name.parse(),
        }
    }
}

/// Value of a single attribute in a successful result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    /// Attribute released with exactly one value.
    Single(String),
    /// Multi-valued attribute, in the order the values were released.
    Multi(Vec<String>),
    /// Nested group, used for the raw system variables under `"env"`.
    Group(Attributes),
}

impl AttributeValue {
    #[must_use]
    pub fn as_single(&self) -> Option<&str> {
        match self {
            Self::Single(v) => Some(v),
            Self::Multi(_) | Self::Group(_) => None,
        }
    }

    #[must_use]
    pub fn as_multi(&self) -> Option<&[String]> {
        match self {
            Self::Multi(v) => Some(v),
            Self::Single(_) | Self::Group(_) => None,
        }
    }

    #[must_use]
    pub fn as_group(&self) -> Option<&Attributes> {
        match self {
            Self::Group(g) => Some(g),
            Self::Single(_) | Self::Multi(_) => None,
        }
    }
}

impl From<String> for AttributeValue {
    fn from(v: String) -> Self {
        Self::Single(v)
    }
}

impl From<&str> for AttributeValue {
    fn from(v: &str) -> Self {
        Self::Single(v.to_owned())
    }
}

impl From<Vec<String>> for AttributeValue {
    fn from(v: Vec<String>) -> Self {
        Self::Multi(v)
    }
}

impl From<Attributes> for AttributeValue {
    fn from(v: Attributes) -> Self {
        Self::Group(v)
    }
}

/// Insertion-ordered attribute mapping.
///
/// Keeps the order attributes were added in, so results built from the
/// same configuration always iterate (and serialize) identically.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    entries: Vec<(String, AttributeValue)>,
}

impl Attributes {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an attribute, replacing (in place) any previous value under the
    /// same name. Returns the replaced value.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        value: impl Into<AttributeValue>,
    ) -> Option<AttributeValue> {
        let name = name.into();
        let value = value.into();
        if let Some((_, slot)) = self.entries.iter_mut().find(|(k, _)| *k == name) {
            return Some(std::mem::replace(slot, value));
        }
        self.entries.push((name, value));
        None
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&AttributeValue> {
        self.entries
            .iter()
            .find_map(|(k, v)| (k == name).then_some(v))
    }

    #[must_use]
    pub fn contains_key(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttributeValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K, V> FromIterator<(K, V)> for Attributes
where
    K: Into<String>,
    V: Into<AttributeValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attrs = Self::new();
        for (k, v) in iter {
            attrs.insert(k, v);
        }
        attrs
    }
}

impl<'a> IntoIterator for &'a Attributes {
    type Item = &'a (String, AttributeValue);
    type IntoIter = std::slice::Iter<'a, (String, AttributeValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl Serialize for Attributes {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Attributes {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct AttributesVisitor;

        impl<'de> Visitor<'de> for AttributesVisitor {
            type Value = Attributes;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of attribute names to values")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Attributes, A::Error> {
                let mut attrs = Attributes::new();
                while let Some((k, v)) = access.next_entry::<String, AttributeValue>()? {
                    attrs.insert(k, v);
                }
                Ok(attrs)
            }
        }

        deserializer.deserialize_map(AttributesVisitor)
    }
}

/// Details of a failed authentication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthenticationFailure {
    pub code: FailureCode,
    pub messages: Vec<String>,
}

/// Outcome of an authentication attempt.
///
/// Exactly one of success (with attributes) or failure (with a reason code
/// and messages). Serializes as
/// `{"status": "success", "attributes": {...}}` or
/// `{"status": "failure", "code": "...", "messages": [...]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AuthenticationResult {
    Success { attributes: Attributes },
    Failure(AuthenticationFailure),
}

impl AuthenticationResult {
    #[must_use]
    pub fn success(attributes: Attributes) -> Self {
        Self::Success { attributes }
    }

    #[must_use]
    pub fn failure(code: FailureCode, messages: Vec<String>) -> Self {
        Self::Failure(AuthenticationFailure { code, messages })
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Attributes of a successful result.
    #[must_use]
    pub fn attributes(&self) -> Option<&Attributes> {
        match self {
            Self::Success { attributes } => Some(attributes),
            Self::Failure(_) => None,
        }
    }

    #[must_use]
    pub fn failure_details(&self) -> Option<&AuthenticationFailure> {
        match self {
            Self::Success { .. } => None,
            Self::Failure(f) => Some(f),
        }
    }

    /// Failure code, `None` on success.
    #[must_use]
    pub fn code(&self) -> Option<FailureCode> {
        self.failure_details().map(|f| f.code)
    }

    /// Failure messages; empty on success.
    #[must_use]
    pub fn messages(&self) -> &[String] {
        self.failure_details()
            .map(|f| f.messages.as_slice())
            .unwrap_or_default()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn insert_replaces_in_place() {
        let mut attrs = Attributes::new();
        attrs.insert("uid", "a");
        attrs.insert("cn", "b");
        let old = attrs.insert("uid", "c");

        assert_eq!(old, Some(AttributeValue::from("a")));
        assert_eq!(attrs.keys().collect::<Vec<_>>(), ["uid", "cn"]);
        assert_eq!(attrs.get("uid").and_then(AttributeValue::as_single), Some("c"));
    }

    #[test]
    fn attributes_serialize_in_insertion_order() {
        let attrs: Attributes = [("z", "1"), ("a", "2"), ("m", "3")].into_iter().collect();
        let s = serde_json::to_string(&attrs).unwrap();
        assert_eq!(s, r#"{"z":"1","a":"2","m":"3"}"#);
    }

    #[test]
    fn attributes_deserialize_keeps_document_order_and_shapes() {
        let attrs: Attributes = serde_json::from_str(
            r#"{"uid":"jdoe","affiliation":["staff","member"],"env":{"Shib-Identity-Provider":"idp"}}"#,
        )
        .unwrap();

        assert_eq!(attrs.keys().collect::<Vec<_>>(), ["uid", "affiliation", "env"]);
        assert_eq!(
            attrs.get("affiliation").and_then(AttributeValue::as_multi),
            Some(["staff".to_owned(), "member".to_owned()].as_slice())
        );
        let env = attrs.get("env").and_then(AttributeValue::as_group).unwrap();
        assert_eq!(
            env.get("Shib-Identity-Provider")
                .and_then(AttributeValue::as_single),
            Some("idp")
        );
    }

    #[test]
    fn success_result_accessors() {
        let result = AuthenticationResult::success([("uid", "jdoe")].into_iter().collect());
        assert!(result.is_success());
        assert!(result.code().is_none());
        assert!(result.messages().is_empty());
        assert!(result.attributes().unwrap().contains_key("uid"));
    }

    #[test]
    fn failure_result_accessors() {
        let result =
            AuthenticationResult::failure(FailureCode::IdentityNotFound, vec![NO_IDENTITY.to_owned()]);
        assert!(!result.is_success());
        assert!(result.attributes().is_none());
        assert_eq!(result.code(), Some(FailureCode::IdentityNotFound));
        assert_eq!(result.messages(), &["no_identity"]);
    }

    #[test]
    fn result_json_shape() {
        let ok = AuthenticationResult::success([("uid", "jdoe")].into_iter().collect());
        assert_eq!(
            serde_json::to_value(&ok).unwrap(),
            json!({"status": "success", "attributes": {"uid": "jdoe"}})
        );

        let failed = AuthenticationResult::failure(
            FailureCode::IdentityAmbiguous,
            vec![MULTIPLE_ID_ATTR_VALUE.to_owned()],
        );
        assert_eq!(
            serde_json::to_value(&failed).unwrap(),
            json!({
                "status": "failure",
                "code": "identity_ambiguous",
                "messages": ["multiple_id_attr_value"]
            })
        );
    }

    #[test]
    fn failure_code_numeric_mapping() {
        for code in [
            FailureCode::GenericFailure,
            FailureCode::IdentityNotFound,
            FailureCode::IdentityAmbiguous,
        ] {
            assert_eq!(FailureCode::try_from(code.code()), Ok(code));
        }
        assert_eq!(
            FailureCode::try_from(-3_i64),
            Err(AuthNError::UnknownFailureCode(-3))
        );
    }

    #[test]
    fn failure_code_deserializes_from_name_or_number() {
        let by_name: FailureCode = serde_json::from_value(json!("identity_ambiguous")).unwrap();
        let by_enum_name: FailureCode = serde_json::from_value(json!("IDENTITY_NOT_FOUND")).unwrap();
        let by_code: FailureCode = serde_json::from_value(json!(-1)).unwrap();

        assert_eq!(by_name, FailureCode::IdentityAmbiguous);
        assert_eq!(by_enum_name, FailureCode::IdentityNotFound);
        assert_eq!(by_code, FailureCode::IdentityNotFound);

        assert!(serde_json::from_value::<FailureCode>(json!(7)).is_err());
        assert!(serde_json::from_value::<FailureCode>(json!("nope")).is_err());
    }
}
