//! Document indexing, file upload and deletion

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{info, instrument, warn};
use vectara_core::DocumentIndexer;
use vectara_domain::{
    DeleteDocumentRequest, DeleteDocumentResponse, IndexDocument, IndexDocumentRequest,
    IndexDocumentResponse, Result, UploadDocumentResponse, UploadOptions,
};

use super::ensure_ok;
use crate::http::{FileSource, RequestUtil};

pub struct IndexerService {
    request_util: Arc<RequestUtil>,
    customer_id: u64,
}

impl IndexerService {
    pub fn new(request_util: Arc<RequestUtil>, customer_id: u64) -> Self {
        Self { request_util, customer_id }
    }

    /// Index a structured document.
    ///
    /// A non-OK status in the response is returned as is, not raised.
    #[instrument(skip(self, document), fields(document_id = %document.document_id))]
    pub fn index_document(&self, corpus_id: u64, document: &IndexDocument) -> Result<IndexDocumentResponse> {
        let request = IndexDocumentRequest { customer_id: self.customer_id, corpus_id, document };
        let response: IndexDocumentResponse = self.request_util.post("index", &request)?;

        if !response.is_ok() {
            warn!(status = ?response.status, "Indexing returned a non-OK status");
        }
        Ok(response)
    }

    /// Upload a file for server-side extraction and indexing.
    ///
    /// The customer id (`c`), corpus id (`o`), extraction flag (`d`) and
    /// JSON metadata (`doc_metadata`) go both as form fields and as query
    /// parameters.
    ///
    /// # Errors
    ///
    /// [`VectaraError::UnexpectedStatus`](vectara_domain::VectaraError::UnexpectedStatus)
    /// when the upload is answered with a non-OK status.
    #[instrument(skip(self, source, options))]
    pub fn upload(
        &self,
        corpus_id: u64,
        source: FileSource,
        options: &UploadOptions,
    ) -> Result<UploadDocumentResponse> {
        let mut fields = BTreeMap::from([
            ("c".to_string(), self.customer_id.to_string()),
            ("o".to_string(), corpus_id.to_string()),
        ]);
        if options.return_extracted {
            fields.insert("d".to_string(), "true".to_string());
        }
        if let Some(metadata) = &options.metadata {
            fields.insert("doc_metadata".to_string(), metadata.to_string());
        }

        let response =
            self.request_util.multipart_post("upload", source, &fields, &BTreeMap::new())?;
        ensure_ok("upload", response.response.status.as_ref())?;

        info!(
            document_id = ?response.document.as_ref().map(|doc| doc.document_id.as_str()),
            "Uploaded document"
        );
        Ok(response)
    }

    pub fn delete_document(&self, corpus_id: u64, document_id: &str) -> Result<DeleteDocumentResponse> {
        let request =
            DeleteDocumentRequest { customer_id: self.customer_id, corpus_id, document_id };
        let response: DeleteDocumentResponse = self.request_util.post("delete-doc", &request)?;
        ensure_ok("delete-doc", response.status.as_ref())?;
        Ok(response)
    }
}

impl DocumentIndexer for IndexerService {
    fn index_document(&self, corpus_id: u64, document: &IndexDocument) -> Result<IndexDocumentResponse> {
        Self::index_document(self, corpus_id, document)
    }
}
