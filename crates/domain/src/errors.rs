//! Error types used throughout the SDK

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reasons a configuration document failed to match a known schema.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason")]
pub enum ConfigShapeError {
    #[error("expected a JSON object for [{context}]")]
    NotAnObject { context: String },

    #[error("unknown field \"{field}\" in [{context}]")]
    UnknownField { context: String, field: String },

    #[error("missing required field \"{field}\" in [{context}]")]
    MissingField { context: String, field: String },

    #[error("field \"{field}\" in [{context}] must be a {expected}")]
    InvalidFieldType { context: String, field: String, expected: String },

    #[error(
        "could not resolve auth as either OAuth2 or API Key config \
         (OAuth2: {oauth2}; API Key: {api_key})"
    )]
    UnresolvedAuth { oauth2: String, api_key: String },

    #[error("auth block matches both OAuth2 and API Key config")]
    AmbiguousAuth,

    #[error("profile \"{profile}\" not found in configuration")]
    ProfileNotFound { profile: String },
}

/// Main error type for the SDK
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "detail")]
pub enum VectaraError {
    #[error("Configuration is not valid JSON: {0}")]
    ConfigDecode(String),

    #[error("Configuration shape error: {0}")]
    ConfigShape(#[from] ConfigShapeError),

    #[error("Client configuration is not valid: {}", .0.join("; "))]
    ConfigValidation(Vec<String>),

    #[error("Authentication configuration error: {0}")]
    AuthConfiguration(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("API returned status {status}: {body}")]
    Api { status: u16, body: String },

    #[error("API rejected credentials with status {status}: {body}")]
    Authorization { status: u16, body: String },

    #[error("Unable to decode response for [{operation}]: {message}")]
    ResponseDecode { operation: String, message: String },

    #[error("Unable to generate summary: {0}")]
    Summary(String),

    #[error("{failed} of {total} documents failed to index")]
    PartialBatchFailure { failed: usize, total: usize },

    #[error("Unexpected status from [{operation}]: {status}")]
    UnexpectedStatus { operation: String, status: String },

    #[error("No corpus found with name [{0}]")]
    CorpusNotFound(String),

    #[error("Corpus name [{0}] is not unique")]
    DuplicateCorpus(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("I/O error on [{path}]: {message}")]
    Io { path: String, message: String },

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Coarse classification of [`VectaraError`] variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// Raw configuration text could not be parsed
    ConfigDecode,
    /// Configuration fields do not match any known schema
    ConfigShape,
    /// Configuration is well formed but semantically invalid
    ConfigValidation,
    /// Credentials are missing or contradictory
    AuthConfiguration,
    /// Network failure reaching the API host
    Transport,
    /// Non-success HTTP status
    Api,
    /// HTTP 401 or 403
    Authorization,
    /// HTTP 200 with a body that does not match the expected shape
    ResponseDecode,
    /// Summary missing or failed
    Summary,
    /// Some documents of a batch failed
    PartialBatchFailure,
    /// Platform reported a non-OK status inside a successful response
    UnexpectedStatus,
    /// Corpus lookups by name
    Corpus,
    /// Caller supplied an unusable argument
    InvalidArgument,
    /// Local file access
    Io,
    /// Local SQLite mirror
    Database,
    /// Anything else
    Internal,
}

impl VectaraError {
    /// Get the classification of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ConfigDecode(_) => ErrorKind::ConfigDecode,
            Self::ConfigShape(_) => ErrorKind::ConfigShape,
            Self::ConfigValidation(_) => ErrorKind::ConfigValidation,
            Self::AuthConfiguration(_) => ErrorKind::AuthConfiguration,
            Self::Transport(_) => ErrorKind::Transport,
            Self::Api { .. } => ErrorKind::Api,
            Self::Authorization { .. } => ErrorKind::Authorization,
            Self::ResponseDecode { .. } => ErrorKind::ResponseDecode,
            Self::Summary(_) => ErrorKind::Summary,
            Self::PartialBatchFailure { .. } => ErrorKind::PartialBatchFailure,
            Self::UnexpectedStatus { .. } => ErrorKind::UnexpectedStatus,
            Self::CorpusNotFound(_) | Self::DuplicateCorpus(_) => ErrorKind::Corpus,
            Self::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Self::Io { .. } => ErrorKind::Io,
            Self::Database(_) => ErrorKind::Database,
            Self::Internal(_) => ErrorKind::Internal,
        }
    }

    /// Build the error for a non-success HTTP response.
    ///
    /// 401 and 403 become [`VectaraError::Authorization`], everything else
    /// [`VectaraError::Api`].
    pub fn from_status(status: u16, body: impl Into<String>) -> Self {
        let body = body.into();
        if status == 401 || status == 403 {
            Self::Authorization { status, body }
        } else {
            Self::Api { status, body }
        }
    }

    /// HTTP status carried by API errors, if any
    pub fn http_status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } | Self::Authorization { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether this error was raised while loading configuration
    pub fn is_config_error(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::ConfigDecode | ErrorKind::ConfigShape | ErrorKind::ConfigValidation
        )
    }
}

/// Result type alias for SDK operations
pub type Result<T> = std::result::Result<T, VectaraError>;
