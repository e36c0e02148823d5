//! Service facades over the REST API.
//!
//! Each service is a thin set of methods that build a typed payload and
//! send it through the shared [`RequestUtil`](crate::http::RequestUtil).

pub mod admin;
pub mod document;
pub mod indexer;
pub mod query;

pub use admin::AdminService;
pub use document::DocumentService;
pub use indexer::IndexerService;
pub use query::QueryService;
use std::collections::HashSet;

use tracing::warn;
use vectara_domain::{Result, Status, VectaraError};

/// Fail with [`VectaraError::UnexpectedStatus`] unless every status is OK
pub(crate) fn ensure_ok<'a>(
    operation: &str,
    statuses: impl IntoIterator<Item = &'a Status>,
) -> Result<()> {
    let failures: Vec<String> =
        statuses.into_iter().filter(|status| !status.is_ok()).map(ToString::to_string).collect();

    if failures.is_empty() {
        return Ok(());
    }

    warn!(operation, failures = ?failures, "Platform reported a non-OK status");
    Err(VectaraError::UnexpectedStatus {
        operation: operation.to_string(),
        status: failures.join(", "),
    })
}

/// Page keys followed so far by one listing call.
///
/// A key the server hands out twice would restart a page already read, so
/// it fails the listing instead of looping.
#[derive(Debug, Default)]
pub(crate) struct PageKeys {
    seen: HashSet<String>,
}

impl PageKeys {
    /// The key to request next, or `None` once the last page was read
    pub(crate) fn next(&mut self, operation: &str, key: Option<String>) -> Result<Option<String>> {
        let Some(key) = key.filter(|key| !key.is_empty()) else {
            return Ok(None);
        };
        if !self.seen.insert(key.clone()) {
            warn!(operation, page_key = %key, "Server repeated a page key");
            return Err(VectaraError::UnexpectedStatus {
                operation: operation.to_string(),
                status: format!("page key [{key}] was already returned"),
            });
        }
        Ok(Some(key))
    }
}

#[cfg(test)]
mod tests {
    use vectara_domain::StatusCode;

    use super::*;

    #[test]
    fn test_ensure_ok() {
        assert!(ensure_ok("x", &[Status::default(), Status::with_code(StatusCode::Ok)]).is_ok());

        let err = ensure_ok("create-corpus", &[Status::with_code(StatusCode::Failure)]).unwrap_err();
        assert!(matches!(
            err,
            VectaraError::UnexpectedStatus { ref operation, ref status }
                if operation == "create-corpus" && status.contains("FAILURE")
        ));
    }

    #[test]
    fn test_page_keys_stop_on_repeat() {
        let mut keys = PageKeys::default();
        assert_eq!(keys.next("list-documents", Some("a".into())).unwrap().as_deref(), Some("a"));
        assert_eq!(keys.next("list-documents", Some("b".into())).unwrap().as_deref(), Some("b"));
        assert_eq!(keys.next("list-documents", Some(String::new())).unwrap(), None);
        assert_eq!(keys.next("list-documents", None).unwrap(), None);

        let err = keys.next("list-documents", Some("a".into())).unwrap_err();
        assert!(err.to_string().contains("page key [a]"), "{err}");
    }
}
