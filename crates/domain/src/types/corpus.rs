//! Corpus administration payloads

use serde::{Deserialize, Serialize};

use super::api_key::ApiKey;
use super::status::Status;
use crate::errors::{Result, VectaraError};

/// Value type of a filter attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterAttributeType {
    Undefined,
    Integer,
    IntegerList,
    Real,
    RealList,
    Text,
    TextList,
    Boolean,
}

crate::impl_wire_enum_conversions!(FilterAttributeType {
    Undefined => "FILTER_ATTRIBUTE_TYPE__UNDEFINED",
    Integer => "FILTER_ATTRIBUTE_TYPE__INTEGER",
    IntegerList => "FILTER_ATTRIBUTE_TYPE__INTEGER_LIST",
    Real => "FILTER_ATTRIBUTE_TYPE__REAL",
    RealList => "FILTER_ATTRIBUTE_TYPE__REAL_LIST",
    Text => "FILTER_ATTRIBUTE_TYPE__TEXT",
    TextList => "FILTER_ATTRIBUTE_TYPE__TEXT_LIST",
    Boolean => "FILTER_ATTRIBUTE_TYPE__BOOLEAN",
});

impl FilterAttributeType {
    pub const ALL: [Self; 8] = [
        Self::Undefined,
        Self::Integer,
        Self::IntegerList,
        Self::Real,
        Self::RealList,
        Self::Text,
        Self::TextList,
        Self::Boolean,
    ];

    /// Look a type up by the part of its wire name after `__`, ignoring
    /// case: `"text"`, `"integer_list"`, `"BOOLEAN"`.
    pub fn from_suffix(suffix: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|candidate| {
            candidate
                .as_str()
                .split_once("__")
                .is_some_and(|(_, end)| end.eq_ignore_ascii_case(suffix))
        })
    }
}

/// Whether a filter attribute applies to whole documents or to parts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterAttributeLevel {
    Undefined,
    Document,
    DocumentPart,
}

crate::impl_wire_enum_conversions!(FilterAttributeLevel {
    Undefined => "FILTER_ATTRIBUTE_LEVEL__UNDEFINED",
    Document => "FILTER_ATTRIBUTE_LEVEL__DOCUMENT",
    DocumentPart => "FILTER_ATTRIBUTE_LEVEL__DOCUMENT_PART",
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dimension {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub serving_default: f64,
    #[serde(default)]
    pub indexing_default: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterAttribute {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub indexed: bool,
    #[serde(rename = "type")]
    pub attribute_type: FilterAttributeType,
    pub level: FilterAttributeLevel,
}

/// A corpus definition as accepted by `create-corpus` and returned by
/// `list-corpora` / `read-corpus`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Corpus {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dt_provision: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub swap_qenc: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub swap_ienc: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub textless: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encrypted: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encoder_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata_max_bytes: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub faiss_index_type: Option<String>,
    #[serde(default)]
    pub custom_dimensions: Vec<Dimension>,
    #[serde(default)]
    pub filter_attributes: Vec<FilterAttribute>,
}

impl Corpus {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Self::default() }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListCorporaRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_results: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_key: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListCorporaResponse {
    #[serde(default)]
    pub corpus: Vec<Corpus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
}

/// Selects which parts of a corpus `read-corpus` returns
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReadCorpusRequest {
    pub corpus_id: Vec<u64>,
    pub read_basic_info: bool,
    pub read_size: bool,
    pub read_recall: bool,
    pub read_api_keys: bool,
    pub read_custom_dimensions: bool,
    pub read_filter_attributes: bool,
}

impl ReadCorpusRequest {
    /// Request every section for one corpus
    pub fn everything(corpus_id: u64) -> Self {
        Self {
            corpus_id: vec![corpus_id],
            read_basic_info: true,
            read_size: true,
            read_recall: true,
            read_api_keys: true,
            read_custom_dimensions: true,
            read_filter_attributes: true,
        }
    }
}

/// Corpus size; the platform encodes both numbers as strings
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorpusSize {
    #[serde(default)]
    pub epoch_secs: String,
    #[serde(default)]
    pub size: String,
}

impl CorpusSize {
    pub fn size_bytes(&self) -> Option<u64> {
        self.size.parse().ok()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorpusRecall {
    #[serde(default)]
    pub epoch_secs: String,
    #[serde(default)]
    pub recall: String,
    #[serde(default)]
    pub sample_size: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorpusInfo {
    pub corpus: Corpus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corpus_status: Option<Status>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<CorpusSize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_status: Option<Status>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recall: Option<CorpusRecall>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recall_status: Option<Status>,
    #[serde(default)]
    pub api_key: Vec<ApiKey>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key_status: Option<Status>,
    #[serde(default)]
    pub custom_dimension: Vec<Dimension>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_dimension_status: Option<Status>,
    #[serde(default)]
    pub filter_attribute: Vec<FilterAttribute>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter_attribute_status: Option<Status>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ReadCorpusResponse {
    #[serde(default)]
    pub corpora: Vec<CorpusInfo>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateCorpusRequest<'a> {
    pub corpus: &'a Corpus,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCorpusResponse {
    #[serde(default)]
    pub corpus_id: u64,
    #[serde(default)]
    pub status: Status,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteCorpusRequest {
    pub customer_id: u64,
    pub corpus_id: u64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DeleteCorpusResponse {
    #[serde(default)]
    pub status: Status,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CorpusSizeRequest {
    pub customer_id: u64,
    pub corpus_id: u64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CorpusSizeResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<CorpusSize>,
    #[serde(default)]
    pub status: Status,
}

/// Fluent construction of a [`Corpus`]
#[derive(Debug, Clone)]
pub struct CorpusBuilder {
    corpus: Corpus,
}

impl CorpusBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self { corpus: Corpus::new(name) }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.corpus.name = name.into();
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.corpus.description = Some(description.into());
        self
    }

    /// Add a filter attribute.
    ///
    /// `attribute_type` is the suffix of a [`FilterAttributeType`] wire name
    /// (`"text"`, `"integer"`, `"real_list"`, ...). `document_level` selects
    /// between document and document-part level.
    ///
    /// # Errors
    ///
    /// Returns [`VectaraError::InvalidArgument`] for an unknown type suffix.
    pub fn add_attribute(
        mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        indexed: bool,
        attribute_type: &str,
        document_level: bool,
    ) -> Result<Self> {
        let attribute_type = FilterAttributeType::from_suffix(attribute_type).ok_or_else(|| {
            VectaraError::InvalidArgument(format!("Unknown FilterAttributeType [{attribute_type}]"))
        })?;
        let level = if document_level {
            FilterAttributeLevel::Document
        } else {
            FilterAttributeLevel::DocumentPart
        };

        self.corpus.filter_attributes.push(FilterAttribute {
            name: name.into(),
            description: Some(description.into()),
            indexed,
            attribute_type,
            level,
        });
        Ok(self)
    }

    pub fn add_custom_dimension(mut self, dimension: Dimension) -> Self {
        self.corpus.custom_dimensions.push(dimension);
        self
    }

    pub fn build(self) -> Corpus {
        self.corpus
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_type_from_suffix() {
        assert_eq!(FilterAttributeType::from_suffix("text"), Some(FilterAttributeType::Text));
        assert_eq!(
            FilterAttributeType::from_suffix("INTEGER_LIST"),
            Some(FilterAttributeType::IntegerList)
        );
        assert_eq!(FilterAttributeType::from_suffix("date"), None);
    }

    #[test]
    fn test_builder_adds_attributes() {
        let corpus = CorpusBuilder::new("docs")
            .description("Product docs")
            .add_attribute("lang", "Language", true, "text", true)
            .unwrap()
            .add_attribute("page", "Page number", false, "integer", false)
            .unwrap()
            .build();

        assert_eq!(corpus.name, "docs");
        assert_eq!(corpus.filter_attributes.len(), 2);
        assert_eq!(corpus.filter_attributes[1].level, FilterAttributeLevel::DocumentPart);

        let value = serde_json::to_value(&corpus).unwrap();
        assert_eq!(value["filterAttributes"][0]["type"], "FILTER_ATTRIBUTE_TYPE__TEXT");
        assert_eq!(value["filterAttributes"][0]["level"], "FILTER_ATTRIBUTE_LEVEL__DOCUMENT");
        assert!(value.get("id").is_none());
    }

    #[test]
    fn test_builder_rejects_unknown_type() {
        let err = CorpusBuilder::new("docs").add_attribute("x", "x", true, "date", true).unwrap_err();
        assert!(err.to_string().contains("date"));
    }

    #[test]
    fn test_list_response_tolerates_missing_fields() {
        let response: ListCorporaResponse = serde_json::from_value(json!({
            "corpus": [{ "id": 5, "name": "b", "swapQenc": true }, { "id": 3, "name": "a" }],
            "status": {}
        }))
        .unwrap();

        assert_eq!(response.corpus.len(), 2);
        assert_eq!(response.corpus[0].swap_qenc, Some(true));
        assert!(response.status.unwrap().is_ok());
        assert!(response.page_key.is_none());
    }

    #[test]
    fn test_corpus_size_parses_string_numbers() {
        let size: CorpusSize =
            serde_json::from_value(json!({ "epochSecs": "1700000000", "size": "4096" })).unwrap();
        assert_eq!(size.size_bytes(), Some(4096));
    }
}
