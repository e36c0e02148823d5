//! Client configuration types
//!
//! A configuration document has exactly two top-level fields:
//!
//! ```json
//! { "customer_id": "12345", "auth": { "api_key": "zqt_..." } }
//! ```
//!
//! The `auth` block is an untagged union. It is resolved by strictly
//! decoding it against every known shape and accepting only a unique match,
//! see [`resolve_auth`].

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::constants::{DEFAULT_BASE_URL, DEFAULT_REQUEST_TIMEOUT_SECS};
use crate::errors::{ConfigShapeError, Result, VectaraError};

const CONFIG_CONTEXT: &str = "config";
const AUTH_CONTEXT: &str = "auth";
const CUSTOMER_ID_FIELD: &str = "customer_id";
const AUTH_FIELD: &str = "auth";

/// Static API key credentials
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApiKeyAuthConfig {
    pub api_key: String,
}

impl fmt::Debug for ApiKeyAuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiKeyAuthConfig").field("api_key", &"<redacted>").finish()
    }
}

/// OAuth2 client-credentials application
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OAuth2AuthConfig {
    pub app_client_id: String,
    pub app_client_secret: String,
    /// Token endpoint; derived from the customer id when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_url: Option<String>,
}

impl fmt::Debug for OAuth2AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OAuth2AuthConfig")
            .field("app_client_id", &self.app_client_id)
            .field("app_client_secret", &"<redacted>")
            .field("auth_url", &self.auth_url)
            .finish()
    }
}

/// Credentials for one account, either an API key or an OAuth2 application
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum AuthConfig {
    ApiKey(ApiKeyAuthConfig),
    OAuth2(OAuth2AuthConfig),
}

impl AuthConfig {
    /// Name of the resolved variant, `"ApiKey"` or `"OAuth2"`
    pub fn auth_type(&self) -> &'static str {
        match self {
            Self::ApiKey(_) => "ApiKey",
            Self::OAuth2(_) => "OAuth2",
        }
    }
}

impl<'de> Deserialize<'de> for AuthConfig {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        resolve_auth(&value).map_err(serde::de::Error::custom)
    }
}

/// Resolve a raw `auth` block into exactly one [`AuthConfig`] variant.
///
/// Each candidate shape is decoded with unknown fields forbidden. Exactly
/// one success is required; when none succeed the error carries both
/// decode failures.
pub fn resolve_auth(value: &Value) -> std::result::Result<AuthConfig, ConfigShapeError> {
    if !value.is_object() {
        return Err(ConfigShapeError::NotAnObject { context: AUTH_CONTEXT.to_string() });
    }

    let oauth2 = OAuth2AuthConfig::deserialize(value);
    let api_key = ApiKeyAuthConfig::deserialize(value);

    match (oauth2, api_key) {
        (Ok(oauth2), Err(_)) => Ok(AuthConfig::OAuth2(oauth2)),
        (Err(_), Ok(api_key)) => Ok(AuthConfig::ApiKey(api_key)),
        (Ok(_), Ok(_)) => Err(ConfigShapeError::AmbiguousAuth),
        (Err(oauth2), Err(api_key)) => Err(ConfigShapeError::UnresolvedAuth {
            oauth2: oauth2.to_string(),
            api_key: api_key.to_string(),
        }),
    }
}

/// Configuration for a single account
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientConfig {
    pub customer_id: String,
    pub auth: AuthConfig,
}

impl ClientConfig {
    pub fn new(customer_id: impl Into<String>, auth: AuthConfig) -> Self {
        Self { customer_id: customer_id.into(), auth }
    }

    /// Decode a configuration object, rejecting unknown top-level fields.
    pub fn from_value(value: &Value) -> std::result::Result<Self, ConfigShapeError> {
        let object = value
            .as_object()
            .ok_or_else(|| ConfigShapeError::NotAnObject { context: CONFIG_CONTEXT.to_string() })?;

        if let Some(field) =
            object.keys().find(|key| key.as_str() != CUSTOMER_ID_FIELD && key.as_str() != AUTH_FIELD)
        {
            return Err(ConfigShapeError::UnknownField {
                context: CONFIG_CONTEXT.to_string(),
                field: field.clone(),
            });
        }

        let customer_id = match object.get(CUSTOMER_ID_FIELD) {
            Some(Value::String(id)) => id.clone(),
            Some(_) => {
                return Err(ConfigShapeError::InvalidFieldType {
                    context: CONFIG_CONTEXT.to_string(),
                    field: CUSTOMER_ID_FIELD.to_string(),
                    expected: "string".to_string(),
                })
            }
            None => return Err(missing(CUSTOMER_ID_FIELD)),
        };

        let auth = object.get(AUTH_FIELD).ok_or_else(|| missing(AUTH_FIELD))?;
        let auth = resolve_auth(auth)?;

        Ok(Self { customer_id, auth })
    }

    /// Semantic checks run after decoding. Returns every problem found.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.customer_id.trim().is_empty() {
            errors.push("customer_id must not be empty".to_string());
        }
        errors
    }

    /// [`ClientConfig::validate`] as a `Result`
    pub fn ensure_valid(&self) -> Result<()> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(VectaraError::ConfigValidation(errors))
        }
    }
}

impl<'de> Deserialize<'de> for ClientConfig {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(&value).map_err(serde::de::Error::custom)
    }
}

fn missing(field: &str) -> ConfigShapeError {
    ConfigShapeError::MissingField { context: CONFIG_CONTEXT.to_string(), field: field.to_string() }
}

/// Transport settings that are not part of the account configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    /// Base URL every operation name is appended to
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}

impl ClientSettings {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_api_key_shape_resolves() {
        let config = ClientConfig::from_value(&json!({
            "customer_id": "12344",
            "auth": { "api_key": "BLAH_KEY" }
        }))
        .unwrap();

        assert_eq!(config.auth.auth_type(), "ApiKey");
        match config.auth {
            AuthConfig::ApiKey(ref key) => assert_eq!(key.api_key, "BLAH_KEY"),
            AuthConfig::OAuth2(_) => panic!("expected api key"),
        }
    }

    #[test]
    fn test_oauth2_shape_resolves_with_optional_url() {
        let auth = resolve_auth(&json!({
            "app_client_id": "X",
            "app_client_secret": "Y"
        }))
        .unwrap();
        assert_eq!(auth.auth_type(), "OAuth2");

        let auth = resolve_auth(&json!({
            "app_client_id": "X",
            "app_client_secret": "Y",
            "auth_url": "https://auth.example.com/token"
        }))
        .unwrap();
        match auth {
            AuthConfig::OAuth2(oauth2) => {
                assert_eq!(oauth2.auth_url.as_deref(), Some("https://auth.example.com/token"));
            }
            AuthConfig::ApiKey(_) => panic!("expected oauth2"),
        }
    }

    #[test]
    fn test_extra_auth_field_fails_both_shapes() {
        let err = resolve_auth(&json!({
            "app_client_id": "X",
            "app_client_secret": "Y",
            "what_the": "z"
        }))
        .unwrap_err();

        match err {
            ConfigShapeError::UnresolvedAuth { oauth2, api_key } => {
                assert!(oauth2.contains("what_the"));
                assert!(api_key.contains("app_client_id"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_mixed_fields_match_neither_shape() {
        let err = resolve_auth(&json!({
            "api_key": "K",
            "app_client_id": "X",
            "app_client_secret": "Y"
        }))
        .unwrap_err();
        assert!(matches!(err, ConfigShapeError::UnresolvedAuth { .. }));

        let err = resolve_auth(&json!({})).unwrap_err();
        assert!(matches!(err, ConfigShapeError::UnresolvedAuth { .. }));
    }

    #[test]
    fn test_auth_must_be_object() {
        let err = resolve_auth(&json!("api-key")).unwrap_err();
        assert_eq!(err, ConfigShapeError::NotAnObject { context: "auth".into() });
    }

    #[test]
    fn test_unknown_top_level_field_is_named() {
        let err = ClientConfig::from_value(&json!({
            "customer_id": "1",
            "auth": { "api_key": "K" },
            "extra_field": true
        }))
        .unwrap_err();

        assert_eq!(
            err,
            ConfigShapeError::UnknownField { context: "config".into(), field: "extra_field".into() }
        );
        assert!(err.to_string().contains("extra_field"));
    }

    #[test]
    fn test_missing_and_mistyped_customer_id() {
        let err = ClientConfig::from_value(&json!({ "auth": { "api_key": "K" } })).unwrap_err();
        assert!(matches!(err, ConfigShapeError::MissingField { ref field, .. } if field == "customer_id"));

        let err = ClientConfig::from_value(&json!({ "customer_id": 1, "auth": { "api_key": "K" } }))
            .unwrap_err();
        assert!(matches!(err, ConfigShapeError::InvalidFieldType { .. }));
    }

    #[test]
    fn test_validation_is_separate_from_decoding() {
        let config: ClientConfig =
            serde_json::from_str(r#"{"customer_id":"","auth":{"api_key":"K"}}"#).unwrap();
        assert_eq!(config.validate(), vec!["customer_id must not be empty".to_string()]);
        assert!(matches!(config.ensure_valid(), Err(VectaraError::ConfigValidation(_))));
    }

    #[test]
    fn test_serialization_is_untagged() {
        let config = ClientConfig::new(
            "7",
            AuthConfig::OAuth2(OAuth2AuthConfig {
                app_client_id: "X".into(),
                app_client_secret: "Y".into(),
                auth_url: None,
            }),
        );
        let value = serde_json::to_value(&config).unwrap();
        assert_eq!(
            value,
            json!({ "customer_id": "7", "auth": { "app_client_id": "X", "app_client_secret": "Y" } })
        );
        assert_eq!(ClientConfig::from_value(&value).unwrap(), config);
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let auth = AuthConfig::ApiKey(ApiKeyAuthConfig { api_key: "super-secret".into() });
        assert!(!format!("{auth:?}").contains("super-secret"));
    }

    #[test]
    fn test_default_settings() {
        let settings = ClientSettings::default();
        assert_eq!(settings.base_url, "https://api.vectara.io/v1");
        assert_eq!(settings.timeout, Duration::from_secs(30));
    }
}
