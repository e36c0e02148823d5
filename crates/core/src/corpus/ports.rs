//! Port interfaces for corpus administration

use vectara_domain::{Corpus, CreateCorpusResponse, Result, Status};

/// Administrative operations the corpus manager builds on
pub trait CorpusAdmin: Send + Sync {
    /// List corpora whose name contains `filter` (all corpora when `None`),
    /// sorted by name
    fn list_corpora(&self, filter: Option<&str>) -> Result<Vec<Corpus>>;

    /// Create a corpus.
    ///
    /// # Errors
    ///
    /// Implementations return [`vectara_domain::VectaraError::UnexpectedStatus`]
    /// when the platform answers with a non-OK status.
    fn create_corpus(&self, corpus: &Corpus) -> Result<CreateCorpusResponse>;

    fn delete_corpus(&self, corpus_id: u64) -> Result<Status>;
}
