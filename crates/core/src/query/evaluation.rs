//! Query response checks

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::warn;
use vectara_domain::{BatchQueryResponse, ResponseSet, Result, Status, StatusCode, VectaraError};

const QUERY_OPERATION: &str = "query";

static CITATION_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[[0-9]+\]").expect("CITATION_REGEX should compile - this is a bug"));

/// Whether `text` contains at least one `[n]` citation marker
pub fn has_citation(text: &str) -> bool {
    CITATION_REGEX.is_match(text)
}

/// Check a batch query response and return its first response set.
///
/// When a summary was requested:
/// - a non-OK summary status fails with [`VectaraError::Summary`]
/// - a summary without any `[n]` citation is still returned, but its status
///   is replaced by `INVALID_ARGUMENT` so callers can tell it is unsupported
///   by the results
///
/// # Errors
///
/// - [`VectaraError::UnexpectedStatus`] when a top-level status is not OK
/// - [`VectaraError::ResponseDecode`] when the response holds no result set
/// - [`VectaraError::Summary`] as described above
pub fn evaluate_response(response: BatchQueryResponse, summary_requested: bool) -> Result<ResponseSet> {
    let mut response_set = response.response_set.into_iter().next().ok_or_else(|| {
        VectaraError::ResponseDecode {
            operation: QUERY_OPERATION.to_string(),
            message: "response contained no response set".to_string(),
        }
    })?;

    if summary_requested {
        let summary_status = response_set.summary.first().and_then(|summary| summary.status.first());
        if let Some(status) = summary_status.filter(|status| !status.is_ok()) {
            return Err(VectaraError::Summary(status.to_string()));
        }
    }

    let failures: Vec<String> =
        response.status.iter().filter(|status| !status.is_ok()).map(ToString::to_string).collect();
    if !failures.is_empty() {
        return Err(VectaraError::UnexpectedStatus {
            operation: QUERY_OPERATION.to_string(),
            status: failures.join(", "),
        });
    }

    if summary_requested {
        let summary = response_set.summary.first_mut().ok_or_else(|| {
            VectaraError::Summary("response did not include a summary".to_string())
        })?;
        if !summary.text.as_deref().is_some_and(has_citation) {
            warn!("Summary contains no citations; marking it INVALID_ARGUMENT");
            summary.status = vec![Status::with_code(StatusCode::InvalidArgument)];
        }
    }

    Ok(response_set)
}
