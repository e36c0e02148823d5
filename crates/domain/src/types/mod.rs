//! Wire types for the platform's REST operations

pub mod api_key;
pub mod auth;
pub mod corpus;
pub mod document;
pub mod query;
pub mod status;

pub use api_key::{
    ApiKey, ApiKeyData, ApiKeyFilter, ApiKeyStatus, ApiKeyType, CorpusShort, CreateApiKeyRequest,
    CreateApiKeyResponse, CreateApiKeyResult, DeleteApiKeysRequest, EnableApiKeyRequest,
    KeyData, KeyEnablement, ListApiKeysRequest, ListApiKeysResponse, ModifyApiKeyResponse,
};
pub use auth::AuthSession;
pub use corpus::{
    Corpus, CorpusBuilder, CorpusInfo, CorpusRecall, CorpusSize, CorpusSizeRequest,
    CorpusSizeResponse, CreateCorpusRequest, CreateCorpusResponse, DeleteCorpusRequest,
    DeleteCorpusResponse, Dimension, FilterAttribute, FilterAttributeLevel, FilterAttributeType,
    ListCorporaRequest, ListCorporaResponse, ReadCorpusRequest, ReadCorpusResponse,
};
pub use document::{
    Attribute, CustomDimension, DeleteDocumentRequest, DeleteDocumentResponse, DocumentDto,
    DocumentSection, ExtractedDocument, ExtractedSection, IndexDocument, IndexDocumentRequest,
    IndexDocumentResponse, ListDocumentItem, ListDocumentsRequest, ListDocumentsResponse,
    StorageQuota, UploadDocumentResponse, UploadOptions, UploadResult,
};
pub use query::{
    BatchQueryRequest, BatchQueryResponse, ChatRequest, ChatResponse, ContextConfig, CorpusKey,
    LexicalInterpolation, MmrConfig, ModelParams, QueryBody, QueryDim, QueryOptions, QueryResult,
    RerankingConfig, ResponseDocument, ResponseSet, Semantics, SummarizerRequest, SummaryResponse,
};
pub use status::{Status, StatusCode};
