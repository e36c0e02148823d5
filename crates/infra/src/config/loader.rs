//! Configuration loader
//!
//! Resolves a [`ClientConfig`] from one of several sources.
//!
//! ## Sources
//! - A literal JSON string
//! - A JSON file at an explicit path
//! - `~/.vectara_config` in the user's home directory
//! - Environment variables
//!
//! ## Profiles
//! A document is either a single config object or a map of profile name to
//! config object. A requested profile must exist in the map. With no profile
//! requested a single config object is used as is, otherwise the `default`
//! profile is selected.
//!
//! ## Environment Variables
//! - `VECTARA_CUSTOMER_ID`: Customer id (required)
//! - `VECTARA_API_KEY`: API key
//! - `VECTARA_APP_CLIENT_ID` / `VECTARA_APP_CLIENT_SECRET`: OAuth2 application
//! - `VECTARA_AUTH_URL`: OAuth2 token endpoint (optional)
//!
//! Every source goes through the same stages, each with its own error kind:
//! parse ([`VectaraError::ConfigDecode`]), shape
//! ([`VectaraError::ConfigShape`]) and validation
//! ([`VectaraError::ConfigValidation`]).

use std::path::PathBuf;

use serde_json::{Map, Value};
use vectara_domain::constants::{DEFAULT_PROFILE, HOME_CONFIG_FILE_NAME};
use vectara_domain::{ClientConfig, ConfigShapeError, Result, VectaraError};

use crate::errors::conversions::io_error;

const ENV_CUSTOMER_ID: &str = "VECTARA_CUSTOMER_ID";
const ENV_API_KEY: &str = "VECTARA_API_KEY";
const ENV_APP_CLIENT_ID: &str = "VECTARA_APP_CLIENT_ID";
const ENV_APP_CLIENT_SECRET: &str = "VECTARA_APP_CLIENT_SECRET";
const ENV_AUTH_URL: &str = "VECTARA_AUTH_URL";
const ENV_CONTEXT: &str = "environment";

/// Where to read the client configuration from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigLoader {
    Json { json: String, profile: Option<String> },
    Path { path: PathBuf, profile: Option<String> },
    Home { profile: Option<String> },
    Environment,
}

impl ConfigLoader {
    pub fn json(json: impl Into<String>, profile: Option<&str>) -> Self {
        Self::Json { json: json.into(), profile: profile.map(str::to_string) }
    }

    pub fn path(path: impl Into<PathBuf>, profile: Option<&str>) -> Self {
        Self::Path { path: path.into(), profile: profile.map(str::to_string) }
    }

    pub fn home(profile: Option<&str>) -> Self {
        Self::Home { profile: profile.map(str::to_string) }
    }

    /// Load, resolve and validate the configuration.
    ///
    /// # Errors
    /// - [`VectaraError::Io`] if a config file cannot be read
    /// - [`VectaraError::ConfigDecode`] if the text is not JSON
    /// - [`VectaraError::ConfigShape`] on unknown or missing fields, an
    ///   unresolvable auth block or a missing profile
    /// - [`VectaraError::ConfigValidation`] if the decoded config is invalid
    pub fn load(&self) -> Result<ClientConfig> {
        let config = match self {
            Self::Json { json, profile } => {
                tracing::info!(profile = ?profile, "Loading configuration from JSON string");
                from_document(json, profile.as_deref())?
            }
            Self::Path { path, profile } => from_file(path.clone(), profile.as_deref())?,
            Self::Home { profile } => from_file(home_config_path()?, profile.as_deref())?,
            Self::Environment => load_from_env()?,
        };

        config.ensure_valid()?;
        tracing::info!(
            customer_id = %config.customer_id,
            auth_type = config.auth.auth_type(),
            "Configuration loaded"
        );
        Ok(config)
    }

    /// Try the environment first, then the home directory file.
    ///
    /// # Errors
    /// Returns the home file error when neither source yields a config.
    pub fn load_default() -> Result<ClientConfig> {
        match Self::Environment.load() {
            Ok(config) => {
                tracing::info!("Configuration loaded from environment variables");
                Ok(config)
            }
            Err(e) => {
                tracing::debug!(error = %e, "Failed to load from environment, trying home file");
                Self::home(None).load()
            }
        }
    }
}

/// Path of the per-user configuration file
pub fn home_config_path() -> Result<PathBuf> {
    dirs::home_dir().map(|home| home.join(HOME_CONFIG_FILE_NAME)).ok_or_else(|| VectaraError::Io {
        path: HOME_CONFIG_FILE_NAME.to_string(),
        message: "home directory could not be determined".to_string(),
    })
}

/// Build a config from environment variables.
///
/// The variables are assembled into an `auth` block and resolved with the
/// same strict rules as a file, so setting both an API key and an OAuth2
/// application is rejected.
pub fn load_from_env() -> Result<ClientConfig> {
    let customer_id = env_var(ENV_CUSTOMER_ID)?;

    let mut auth = Map::new();
    for (key, field) in [
        (ENV_API_KEY, "api_key"),
        (ENV_APP_CLIENT_ID, "app_client_id"),
        (ENV_APP_CLIENT_SECRET, "app_client_secret"),
        (ENV_AUTH_URL, "auth_url"),
    ] {
        if let Ok(value) = std::env::var(key) {
            auth.insert(field.to_string(), Value::String(value));
        }
    }

    let document = serde_json::json!({ "customer_id": customer_id, "auth": auth });
    Ok(ClientConfig::from_value(&document)?)
}

fn from_file(path: PathBuf, profile: Option<&str>) -> Result<ClientConfig> {
    tracing::info!(path = %path.display(), profile = ?profile, "Loading configuration from file");

    let contents = std::fs::read_to_string(&path).map_err(|e| io_error(&path, &e))?;
    from_document(&contents, profile)
}

fn from_document(contents: &str, profile: Option<&str>) -> Result<ClientConfig> {
    let document: Value = serde_json::from_str(contents)
        .map_err(|e| VectaraError::ConfigDecode(format!("Invalid JSON format: {e}")))?;

    let selected = select_profile(&document, profile)?;
    Ok(ClientConfig::from_value(selected)?)
}

/// Pick the config object for `profile` out of a parsed document
fn select_profile<'a>(
    document: &'a Value,
    profile: Option<&str>,
) -> std::result::Result<&'a Value, ConfigShapeError> {
    let Some(object) = document.as_object() else {
        return Err(ConfigShapeError::NotAnObject { context: "config".to_string() });
    };

    match profile {
        Some(name) => object
            .get(name)
            .filter(|value| value.is_object())
            .ok_or_else(|| ConfigShapeError::ProfileNotFound { profile: name.to_string() }),
        None if is_single_config(object) => Ok(document),
        None => Ok(object.get(DEFAULT_PROFILE).unwrap_or(document)),
    }
}

fn is_single_config(object: &Map<String, Value>) -> bool {
    object.contains_key("customer_id") || object.contains_key("auth")
}

/// Get required environment variable
fn env_var(key: &str) -> Result<String> {
    std::env::var(key).map_err(|_| {
        ConfigShapeError::MissingField { context: ENV_CONTEXT.to_string(), field: key.to_string() }
            .into()
    })
}
