//! Platform status codes and the `Status` record
//!
//! Every response embeds one or more `Status` objects. Codes arrive as
//! strings and are mapped onto [`StatusCode`] through a single table; codes
//! the SDK has no name for are preserved verbatim in
//! [`StatusCode::Other`].

use serde::{Deserialize, Serialize};

/// Status code reported by the platform
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StatusCode {
    Ok,
    Failure,
    Unknown,
    InvalidArgument,
    DeadlineExceeded,
    AlreadyExists,
    PermissionDenied,
    ResourceExhausted,
    FailedPrecondition,
    Aborted,
    OutOfRange,
    Unimplemented,
    Internal,
    Unavailable,
    DataLoss,
    Unauthenticated,
    BadRequest,
    Unauthorized,
    Forbidden,
    NotFound,
    MethodNotAllowed,
    Conflict,
    UnsupportedMediaType,
    TooManyRequests,
    InternalServerError,
    NotImplemented,
    ServiceUnavailable,
    InsufficientStorage,
    UnparseableResponse,
    DisabledCustomer,
    InvalidCustomerId,
    DisabledCorpus,
    InvalidCorpusId,
    DisabledApiKey,
    ExpiredApiKey,
    InvalidApiKey,
    CmkInaccessible,
    QryDisabledCorpus,
    QryDocumentDbFailure,
    QryEncoderFailure,
    QryInterrupted,
    QryInvalidCorpus,
    QryInvalidStart,
    QryInvalidNumResults,
    QryMissingQuery,
    QryMissingCorpus,
    QryTimeout,
    QryTooManyCorpora,
    QryTooManyQueries,
    QryVectorIndexFailure,
    QryInvalidDimension,
    QryInvalidClientkey,
    QryDecryptionFailure,
    QryInvalidReranker,
    QryPartialRerank,
    QryRerankFailure,
    QryTooManyResultRows,
    QrySmryInvalidSummarizerPrompt,
    QrySmryInvalidSummaryLang,
    QrySmryUnsupportedSummaryLang,
    QrySmryPartialSummary,
    QrySmryNoQueryResults,
    QryGenNoQueryResults,
    QryGenUnparseableModelParams,
    AdmInvalidCustomerId,
    AdmInvalidCorpusId,
    AdmInvalidEncoderId,
    AdmCorpusLimitReached,
    IdxTransientPartialDeletionFailure,
    IdxPermanentPartialDeletionFailure,
    /// A code without a name in this SDK, kept as sent
    Other(String),
}

crate::impl_wire_enum_conversions!(StatusCode {
    Ok => "OK",
    Failure => "FAILURE",
    Unknown => "UNKNOWN",
    InvalidArgument => "INVALID_ARGUMENT",
    DeadlineExceeded => "DEADLINE_EXCEEDED",
    AlreadyExists => "ALREADY_EXISTS",
    PermissionDenied => "PERMISSION_DENIED",
    ResourceExhausted => "RESOURCE_EXHAUSTED",
    FailedPrecondition => "FAILED_PRECONDITION",
    Aborted => "ABORTED",
    OutOfRange => "OUT_OF_RANGE",
    Unimplemented => "UNIMPLEMENTED",
    Internal => "INTERNAL",
    Unavailable => "UNAVAILABLE",
    DataLoss => "DATA_LOSS",
    Unauthenticated => "UNAUTHENTICATED",
    BadRequest => "BAD_REQUEST",
    Unauthorized => "UNAUTHORIZED",
    Forbidden => "FORBIDDEN",
    NotFound => "NOT_FOUND",
    MethodNotAllowed => "METHOD_NOT_ALLOWED",
    Conflict => "CONFLICT",
    UnsupportedMediaType => "UNSUPPORTED_MEDIA_TYPE",
    TooManyRequests => "TOO_MANY_REQUESTS",
    InternalServerError => "INTERNAL_SERVER_ERROR",
    NotImplemented => "NOT_IMPLEMENTED",
    ServiceUnavailable => "SERVICE_UNAVAILABLE",
    InsufficientStorage => "INSUFFICIENT_STORAGE",
    UnparseableResponse => "UNPARSEABLE_RESPONSE",
    DisabledCustomer => "DISABLED_CUSTOMER",
    InvalidCustomerId => "INVALID_CUSTOMER_ID",
    DisabledCorpus => "DISABLED_CORPUS",
    InvalidCorpusId => "INVALID_CORPUS_ID",
    DisabledApiKey => "DISABLED_API_KEY",
    ExpiredApiKey => "EXPIRED_API_KEY",
    InvalidApiKey => "INVALID_API_KEY",
    CmkInaccessible => "CMK_INACCESSIBLE",
    QryDisabledCorpus => "QRY__DISABLED_CORPUS",
    QryDocumentDbFailure => "QRY__DOCUMENT_DB_FAILURE",
    QryEncoderFailure => "QRY__ENCODER_FAILURE",
    QryInterrupted => "QRY__INTERRUPTED",
    QryInvalidCorpus => "QRY__INVALID_CORPUS",
    QryInvalidStart => "QRY__INVALID_START",
    QryInvalidNumResults => "QRY__INVALID_NUM_RESULTS",
    QryMissingQuery => "QRY__MISSING_QUERY",
    QryMissingCorpus => "QRY__MISSING_CORPUS",
    QryTimeout => "QRY__TIMEOUT",
    QryTooManyCorpora => "QRY__TOO_MANY_CORPORA",
    QryTooManyQueries => "QRY__TOO_MANY_QUERIES",
    QryVectorIndexFailure => "QRY__VECTOR_INDEX_FAILURE",
    QryInvalidDimension => "QRY__INVALID_DIMENSION",
    QryInvalidClientkey => "QRY__INVALID_CLIENTKEY",
    QryDecryptionFailure => "QRY__DECRYPTION_FAILURE",
    QryInvalidReranker => "QRY__INVALID_RERANKER",
    QryPartialRerank => "QRY__PARTIAL_RERANK",
    QryRerankFailure => "QRY__RERANK_FAILURE",
    QryTooManyResultRows => "QRY__TOO_MANY_RESULT_ROWS",
    QrySmryInvalidSummarizerPrompt => "QRY__SMRY__INVALID_SUMMARIZER_PROMPT",
    QrySmryInvalidSummaryLang => "QRY__SMRY__INVALID_SUMMARY_LANG",
    QrySmryUnsupportedSummaryLang => "QRY__SMRY__UNSUPPORTED_SUMMARY_LANG",
    QrySmryPartialSummary => "QRY__SMRY__PARTIAL_SUMMARY",
    QrySmryNoQueryResults => "QRY__SMRY__NO_QUERY_RESULTS",
    QryGenNoQueryResults => "QRY__GEN__NO_QUERY_RESULTS",
    QryGenUnparseableModelParams => "QRY__GEN__UNPARSEABLE_MODEL_PARAMS",
    AdmInvalidCustomerId => "ADM__INVALID_CUSTOMER_ID",
    AdmInvalidCorpusId => "ADM__INVALID_CORPUS_ID",
    AdmInvalidEncoderId => "ADM__INVALID_ENCODER_ID",
    AdmCorpusLimitReached => "ADM__CORPUS_LIMIT_REACHED",
    IdxTransientPartialDeletionFailure => "IDX__TRANSIENT_PARTIAL_DELETION_FAILURE",
    IdxPermanentPartialDeletionFailure => "IDX__PERMANENT_PARTIAL_DELETION_FAILURE",
} fallback Other);

/// Status attached to platform responses.
///
/// Successful responses frequently carry an empty object, which decodes to a
/// status with no code and counts as OK.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Status {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<StatusCode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_detail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cause: Option<serde_json::Value>,
}

impl Status {
    /// Create a status carrying only a code
    pub fn with_code(code: StatusCode) -> Self {
        Self { code: Some(code), ..Self::default() }
    }

    /// `true` when the code is absent or [`StatusCode::Ok`]
    pub fn is_ok(&self) -> bool {
        matches!(self.code, None | Some(StatusCode::Ok))
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.code {
            Some(code) => write!(f, "{code}")?,
            None => f.write_str("OK")?,
        }
        if let Some(detail) = &self.status_detail {
            write!(f, " ({detail})")?;
        }
        Ok(())
    }
}
