//! Corpus lifecycle operations layered over the admin API
//!
//! The platform's `list-corpora` filter is a substring match, so every
//! lookup by name re-checks for an exact match on the client side.

use std::sync::Arc;

use tracing::{info, instrument, warn};
use vectara_domain::{Corpus, IndexDocument, Result, VectaraError};

use super::ports::CorpusAdmin;
use crate::batch::{BatchIndexCoordinator, BatchReport, DocumentIndexer};

/// Name-based corpus management and batch indexing
pub struct CorpusManager {
    admin: Arc<dyn CorpusAdmin>,
    coordinator: BatchIndexCoordinator,
}

impl CorpusManager {
    pub fn new(admin: Arc<dyn CorpusAdmin>, indexer: Arc<dyn DocumentIndexer>) -> Self {
        Self { admin, coordinator: BatchIndexCoordinator::new(indexer) }
    }

    /// Ids of every corpus named exactly `name`
    pub fn find_corpora_by_name(&self, name: &str) -> Result<Vec<u64>> {
        let found: Vec<u64> = self
            .admin
            .list_corpora(Some(name))?
            .into_iter()
            .filter(|corpus| corpus.name == name)
            .filter_map(|corpus| corpus.id)
            .collect();

        info!(name, found = ?found, "Corpora matching name");
        Ok(found)
    }

    /// Id of the single corpus named exactly `name`.
    ///
    /// # Errors
    ///
    /// - [`VectaraError::DuplicateCorpus`] when more than one corpus matches
    /// - [`VectaraError::CorpusNotFound`] when none matches and
    ///   `fail_if_not_exist` is set
    pub fn find_corpus_by_name(&self, name: &str, fail_if_not_exist: bool) -> Result<Option<u64>> {
        match self.find_corpora_by_name(name)?.as_slice() {
            [] if fail_if_not_exist => Err(VectaraError::CorpusNotFound(name.to_string())),
            [] => {
                info!(name, "No corpus with name");
                Ok(None)
            }
            [id] => Ok(Some(*id)),
            _ => Err(VectaraError::DuplicateCorpus(name.to_string())),
        }
    }

    /// Delete every corpus named exactly `name`. Returns whether any existed.
    #[instrument(skip(self))]
    pub fn delete_corpus_by_name(&self, name: &str) -> Result<bool> {
        let candidates = self.admin.list_corpora(Some(name))?;
        info!(candidates = candidates.len(), "Potential matches for deletion");

        let mut found = false;
        for corpus in candidates {
            match corpus.id {
                Some(id) if corpus.name == name => {
                    info!(corpus_id = id, "Deleting corpus");
                    self.admin.delete_corpus(id)?;
                    found = true;
                }
                id => info!(corpus_id = ?id, other = %corpus.name, "Ignoring inexact name match"),
            }
        }
        Ok(found)
    }

    /// Create `corpus` after checking for existing corpora of the same name.
    ///
    /// With `delete_existing` the old corpora are removed first. Otherwise,
    /// when `unique` is set, an existing name is an error; when it is not,
    /// a duplicate name is only logged.
    ///
    /// # Errors
    ///
    /// Returns [`VectaraError::DuplicateCorpus`] when the name is taken,
    /// `unique` is set and `delete_existing` is not.
    #[instrument(skip(self, corpus), fields(name = %corpus.name))]
    pub fn create_corpus(&self, corpus: &Corpus, delete_existing: bool, unique: bool) -> Result<u64> {
        let existing = self.find_corpora_by_name(&corpus.name)?;
        if !existing.is_empty() {
            if delete_existing {
                self.delete_corpus_by_name(&corpus.name)?;
            } else if unique {
                return Err(VectaraError::DuplicateCorpus(corpus.name.clone()));
            } else {
                warn!(existing = ?existing, "Creating corpus with a name that is already in use");
            }
        }

        let response = self.admin.create_corpus(corpus)?;
        info!(corpus_id = response.corpus_id, "Created corpus");
        Ok(response.corpus_id)
    }

    /// Index `documents` into `corpus_id` using `thread_count` workers
    pub fn batch_index(
        &self,
        corpus_id: u64,
        documents: &[IndexDocument],
        thread_count: usize,
    ) -> Result<BatchReport> {
        self.coordinator.batch_index(corpus_id, documents, thread_count)
    }
}
