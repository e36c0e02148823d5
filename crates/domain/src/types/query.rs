//! Query and summarization payloads

use serde::{Deserialize, Serialize};

use super::document::Attribute;
use super::status::Status;
use crate::constants::{
    DEFAULT_LEXICAL_LAMBDA, DEFAULT_PAGE_SIZE, DEFAULT_RESPONSE_LANG, DEFAULT_SUMMARIZER,
    DEFAULT_SUMMARY_RESULT_COUNT,
};

/// How the query text is encoded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Semantics {
    #[default]
    Default,
    Query,
    Response,
}

crate::impl_wire_enum_conversions!(Semantics {
    Default => "DEFAULT",
    Query => "QUERY",
    Response => "RESPONSE",
});

/// Amount of surrounding text returned with each match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chars_before: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chars_after: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentences_before: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentences_after: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_tag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_tag: Option<String>,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            chars_before: Some(30),
            chars_after: Some(30),
            sentences_before: Some(2),
            sentences_after: Some(2),
            start_tag: Some("<b>".to_string()),
            end_tag: Some("</b>".to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryDim {
    pub name: String,
    pub weight: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LexicalInterpolation {
    pub lambda: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorpusKey {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<u64>,
    #[serde(default)]
    pub corpus_id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub semantics: Option<Semantics>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dim: Vec<QueryDim>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata_filter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lexical_interpolation_config: Option<LexicalInterpolation>,
}

/// Maximal marginal relevance reranking.
///
/// A diversity bias of 1 ignores relevance entirely, 0 ignores diversity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MmrConfig {
    pub diversity_bias: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RerankingConfig {
    pub reranker_id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mmr_config: Option<MmrConfig>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    /// 0.0 to 1.0; higher values discourage repeated words
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency_penalty: Option<f64>,
    /// 0.0 to 1.0; higher values encourage new topics
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub presence_penalty: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummarizerRequest {
    pub summarizer_prompt_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt_text: Option<String>,
    pub response_lang: String,
    pub max_summarized_results: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chat: Option<ChatRequest>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_params: Option<ModelParams>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryBody {
    pub query: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_context: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_results: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_config: Option<ContextConfig>,
    #[serde(default)]
    pub corpus_key: Vec<CorpusKey>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reranking_config: Option<RerankingConfig>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub summary: Vec<SummarizerRequest>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchQueryRequest {
    pub query: Vec<QueryBody>,
}

/// Tuning knobs for a single query. Defaults match the platform console.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryOptions {
    /// Result offset; only sent when no summary is requested
    pub start: u32,
    pub page_size: u32,
    pub summary: bool,
    pub response_lang: String,
    pub context_config: ContextConfig,
    pub semantics: Semantics,
    pub prompt_text: Option<String>,
    pub metadata_filter: Option<String>,
    pub summarizer: String,
    pub summary_result_count: u32,
    /// Apply MMR reranking
    pub rerank: bool,
    pub custom_dimensions: Vec<QueryDim>,
    pub lexical_lambda: f64,
    pub temperature: Option<f64>,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            start: 0,
            page_size: DEFAULT_PAGE_SIZE,
            summary: true,
            response_lang: DEFAULT_RESPONSE_LANG.to_string(),
            context_config: ContextConfig::default(),
            semantics: Semantics::Default,
            prompt_text: None,
            metadata_filter: None,
            summarizer: DEFAULT_SUMMARIZER.to_string(),
            summary_result_count: DEFAULT_SUMMARY_RESULT_COUNT,
            rerank: false,
            custom_dimensions: Vec::new(),
            lexical_lambda: DEFAULT_LEXICAL_LAMBDA,
            temperature: None,
        }
    }
}

/// One matching passage
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResult {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub score: f64,
    #[serde(default)]
    pub metadata: Vec<Attribute>,
    #[serde(default)]
    pub document_index: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corpus_key: Option<CorpusKey>,
    #[serde(default)]
    pub result_offset: u32,
    #[serde(default)]
    pub result_length: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ResponseDocument {
    pub id: String,
    #[serde(default)]
    pub metadata: Vec<Attribute>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    #[serde(default)]
    pub conversation_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub turn_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rephrased_query: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SummaryResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    #[serde(default)]
    pub status: Vec<Status>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chat: Option<ChatResponse>,
}

/// Results for one query of a batch
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ResponseSet {
    #[serde(default)]
    pub response: Vec<QueryResult>,
    #[serde(default)]
    pub status: Vec<Status>,
    #[serde(default)]
    pub document: Vec<ResponseDocument>,
    #[serde(default)]
    pub summary: Vec<SummaryResponse>,
}

impl ResponseSet {
    /// Document a result points at
    pub fn document_for(&self, result: &QueryResult) -> Option<&ResponseDocument> {
        self.document.get(result.document_index)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchQueryResponse {
    #[serde(default)]
    pub response_set: Vec<ResponseSet>,
    #[serde(default)]
    pub status: Vec<Status>,
    /// Timing breakdown, passed through untouched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metrics: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_corpus_key_serializes_lambda() {
        let key = CorpusKey {
            customer_id: Some(1),
            corpus_id: 2,
            semantics: Some(Semantics::Default),
            lexical_interpolation_config: Some(LexicalInterpolation { lambda: 0.025 }),
            ..CorpusKey::default()
        };
        assert_eq!(
            serde_json::to_value(&key).unwrap(),
            json!({
                "customerId": 1,
                "corpusId": 2,
                "semantics": "DEFAULT",
                "lexicalInterpolationConfig": { "lambda": 0.025 }
            })
        );
    }

    #[test]
    fn test_response_decodes_and_reencodes_unchanged() {
        let raw = json!({
            "responseSet": [{
                "response": [{
                    "text": "Rust is fast",
                    "score": 0.5,
                    "metadata": [{ "name": "lang", "value": "en" }],
                    "documentIndex": 0,
                    "corpusKey": { "customerId": 1, "corpusId": 2, "semantics": "QUERY" },
                    "resultOffset": 10,
                    "resultLength": 12
                }],
                "status": [],
                "document": [{ "id": "doc-1", "metadata": [] }],
                "summary": [{
                    "text": "Rust is fast [1]",
                    "lang": "en",
                    "status": [{ "code": "QRY__SMRY__PARTIAL_SUMMARY", "statusDetail": "partial" }]
                }]
            }],
            "status": [],
            "metrics": { "queryEncodeMs": "3" }
        });

        let decoded: BatchQueryResponse = serde_json::from_value(raw.clone()).unwrap();
        let set = &decoded.response_set[0];
        assert_eq!(set.document_for(&set.response[0]).map(|d| d.id.as_str()), Some("doc-1"));
        assert_eq!(serde_json::to_value(&decoded).unwrap(), raw);
    }

    #[test]
    fn test_default_options() {
        let options = QueryOptions::default();
        assert_eq!(options.page_size, 10);
        assert!(options.summary);
        assert_eq!(options.summarizer, "vectara-summary-ext-v1.2.0");
        assert_eq!(options.context_config.start_tag.as_deref(), Some("<b>"));
    }
}
