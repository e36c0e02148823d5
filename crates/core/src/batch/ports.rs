//! Port interfaces for batch indexing operations

use vectara_domain::{IndexDocument, IndexDocumentResponse, Result};

/// Indexes one structured document into a corpus
pub trait DocumentIndexer: Send + Sync {
    /// Index `document` into `corpus_id`
    fn index_document(&self, corpus_id: u64, document: &IndexDocument)
        -> Result<IndexDocumentResponse>;
}
