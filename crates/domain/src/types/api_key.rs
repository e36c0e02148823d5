//! API key administration payloads

use serde::{Deserialize, Serialize};

use super::status::Status;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiKeyType {
    Undefined,
    /// Query access only
    Serving,
    /// Query and indexing access
    ServingIndexing,
}

crate::impl_wire_enum_conversions!(ApiKeyType {
    Undefined => "API_KEY_TYPE__UNDEFINED",
    Serving => "API_KEY_TYPE__SERVING",
    ServingIndexing => "API_KEY_TYPE__SERVING_INDEXING",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiKeyStatus {
    Unknown,
    Enabled,
    Disabled,
    Deleted,
}

crate::impl_wire_enum_conversions!(ApiKeyStatus {
    Unknown => "UNKNOWN",
    Enabled => "ENABLED",
    Disabled => "DISABLED",
    Deleted => "DELETED",
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiKey {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub key_type: ApiKeyType,
    #[serde(default)]
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ts_start: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ts_end: Option<String>,
    pub status: ApiKeyStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusShort {
    pub id: u64,
    #[serde(default)]
    pub name: String,
}

/// An API key and the corpora it grants access to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyData {
    pub api_key: ApiKey,
    #[serde(default)]
    pub corpus: Vec<CorpusShort>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListApiKeysRequest {
    pub num_results: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_key: Option<String>,
    pub read_corpora_info: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListApiKeysResponse {
    #[serde(default)]
    pub key_data: Vec<KeyData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiKeyData {
    pub corpus_id: Vec<u64>,
    pub api_key_type: ApiKeyType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateApiKeyRequest {
    pub api_key_data: Vec<ApiKeyData>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateApiKeyResult {
    #[serde(default)]
    pub key_id: String,
    #[serde(default)]
    pub status: Status,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CreateApiKeyResponse {
    #[serde(default)]
    pub response: Vec<CreateApiKeyResult>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteApiKeysRequest {
    pub key_id: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyEnablement {
    pub key_id: String,
    pub enable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnableApiKeyRequest {
    pub key_enablement: Vec<KeyEnablement>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ModifyApiKeyResponse {
    #[serde(default)]
    pub status: Vec<Status>,
}

/// Client-side filter applied after all key pages are fetched.
///
/// Every populated criterion must match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ApiKeyFilter {
    pub corpus_id: Option<u64>,
    pub enabled: Option<bool>,
    pub key_type: Option<ApiKeyType>,
    pub key_status: Option<ApiKeyStatus>,
}

impl ApiKeyFilter {
    pub fn matches(&self, key: &KeyData) -> bool {
        if let Some(corpus_id) = self.corpus_id {
            if !key.corpus.iter().any(|corpus| corpus.id == corpus_id) {
                return false;
            }
        }
        self.enabled.map_or(true, |enabled| key.api_key.enabled == enabled)
            && self.key_type.map_or(true, |key_type| key.api_key.key_type == key_type)
            && self.key_status.map_or(true, |status| key.api_key.status == status)
    }
}
