//! Indexing, upload and document listing payloads

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::status::Status;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomDimension {
    pub name: String,
    pub value: f64,
}

/// A section of a structured document. Sections nest.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DocumentSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata_json: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub custom_dims: Vec<CustomDimension>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub section: Vec<DocumentSection>,
}

impl DocumentSection {
    pub fn text(text: impl Into<String>) -> Self {
        Self { text: Some(text.into()), ..Self::default() }
    }
}

/// Structured document accepted by the `index` operation
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct IndexDocument {
    pub document_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata_json: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub custom_dims: Vec<CustomDimension>,
    #[serde(default)]
    pub section: Vec<DocumentSection>,
}

impl IndexDocument {
    pub fn new(document_id: impl Into<String>) -> Self {
        Self { document_id: document_id.into(), ..Self::default() }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_metadata(mut self, metadata: &serde_json::Value) -> Self {
        self.metadata_json = Some(metadata.to_string());
        self
    }

    pub fn with_section(mut self, section: DocumentSection) -> Self {
        self.section.push(section);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndexDocumentRequest<'a> {
    pub customer_id: u64,
    pub corpus_id: u64,
    pub document: &'a IndexDocument,
}

/// Characters consumed from the account quota. Encoded as strings.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageQuota {
    #[serde(default)]
    pub num_chars: String,
    #[serde(default)]
    pub num_metadata_chars: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexDocumentResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quota_consumed: Option<StorageQuota>,
}

impl IndexDocumentResponse {
    /// A missing status, or one without a code, counts as success
    pub fn is_ok(&self) -> bool {
        self.status.as_ref().map_or(true, Status::is_ok)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeleteDocumentRequest<'a> {
    pub customer_id: u64,
    pub corpus_id: u64,
    pub document_id: &'a str,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DeleteDocumentResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
}

/// Options for a file upload
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UploadOptions {
    /// Ask the platform to return the extracted document
    pub return_extracted: bool,
    /// Document-level metadata, sent JSON-encoded
    pub metadata: Option<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata_json: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub custom_dims: Vec<CustomDimension>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub section: Vec<ExtractedSection>,
}

/// Document as extracted by the platform from an uploaded file
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedDocument {
    pub document_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata_json: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub custom_dims: Vec<CustomDimension>,
    #[serde(default)]
    pub section: Vec<ExtractedSection>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quota_consumed: Option<StorageQuota>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UploadDocumentResponse {
    #[serde(default)]
    pub response: UploadResult,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document: Option<ExtractedDocument>,
}

impl UploadDocumentResponse {
    pub fn is_ok(&self) -> bool {
        self.response.status.as_ref().map_or(true, Status::is_ok)
    }
}

/// Name/value metadata pair as returned by listing and query operations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub name: String,
    #[serde(default)]
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListDocumentsRequest {
    pub corpus_id: u64,
    pub num_results: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata_filter: Option<String>,
    #[serde(rename = "pageKey", skip_serializing_if = "Option::is_none")]
    pub page_key: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListDocumentItem {
    pub id: String,
    #[serde(default)]
    pub metadata: Vec<Attribute>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListDocumentsResponse {
    #[serde(default)]
    pub document: Vec<ListDocumentItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_page_key: Option<String>,
}

/// A listed document with its metadata flattened into a map
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentDto {
    pub id: String,
    pub metadata: BTreeMap<String, String>,
}

impl From<ListDocumentItem> for DocumentDto {
    fn from(item: ListDocumentItem) -> Self {
        Self {
            id: item.id,
            metadata: item.metadata.into_iter().map(|attr| (attr.name, attr.value)).collect(),
        }
    }
}
