//! Document listing

use std::sync::Arc;

use tracing::{debug, info, instrument};
use vectara_domain::constants::LIST_DOCUMENTS_PAGE_SIZE;
use vectara_domain::{DocumentDto, ListDocumentsRequest, ListDocumentsResponse, Result};

use super::PageKeys;
use crate::http::RequestUtil;

pub struct DocumentService {
    request_util: Arc<RequestUtil>,
}

impl DocumentService {
    pub fn new(request_util: Arc<RequestUtil>) -> Self {
        Self { request_util }
    }

    /// Every document in `corpus_id`, following `nextPageKey` until the
    /// last page. Metadata attributes are flattened into a map.
    ///
    /// A page key seen twice fails with [`VectaraError::UnexpectedStatus`].
    ///
    /// [`VectaraError::UnexpectedStatus`]: vectara_domain::VectaraError::UnexpectedStatus
    #[instrument(skip(self))]
    pub fn list_documents(
        &self,
        corpus_id: u64,
        page_size: Option<u32>,
        metadata_filter: Option<&str>,
    ) -> Result<Vec<DocumentDto>> {
        let mut request = ListDocumentsRequest {
            corpus_id,
            num_results: page_size.unwrap_or(LIST_DOCUMENTS_PAGE_SIZE),
            metadata_filter: metadata_filter.map(str::to_string),
            page_key: None,
        };
        let mut documents = Vec::new();
        let mut followed = PageKeys::default();

        loop {
            let response: ListDocumentsResponse =
                self.request_util.post("list-documents", &request)?;
            debug!(page = response.document.len(), "Fetched page of documents");
            documents.extend(response.document.into_iter().map(DocumentDto::from));

            match followed.next("list-documents", response.next_page_key)? {
                Some(next) => request.page_key = Some(next),
                None => break,
            }
        }

        info!(total = documents.len(), "Listed documents");
        Ok(documents)
    }
}
