//! Fan-out indexing over OS threads
//!
//! Documents are assigned to workers round-robin (`index % thread_count`),
//! so each worker owns a disjoint, order-preserving slice of the input. A
//! worker indexes its documents one after another and records every result;
//! a failing document never stops the rest of its bucket. The coordinator
//! joins every worker before returning.

use std::sync::Arc;
use std::thread;

use tracing::{debug, info, instrument, warn};
use vectara_domain::{IndexDocument, IndexDocumentResponse, Result, VectaraError};

use super::ports::DocumentIndexer;

const INDEX_OPERATION: &str = "index";

/// Result of indexing one document
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentOutcome {
    /// Position of the document in the submitted list
    pub index: usize,
    pub document_id: String,
    /// Worker that handled the document
    pub worker: usize,
    pub result: Result<IndexDocumentResponse>,
}

impl DocumentOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Outcomes of a batch, concatenated worker by worker
#[derive(Debug, Clone, PartialEq)]
pub struct BatchReport {
    outcomes: Vec<DocumentOutcome>,
    workers: usize,
}

impl BatchReport {
    pub fn outcomes(&self) -> &[DocumentOutcome] {
        &self.outcomes
    }

    pub fn into_outcomes(self) -> Vec<DocumentOutcome> {
        self.outcomes
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Number of worker threads that were spawned
    pub fn workers(&self) -> usize {
        self.workers
    }

    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|outcome| outcome.is_success()).count()
    }

    pub fn failures(&self) -> impl Iterator<Item = &DocumentOutcome> {
        self.outcomes.iter().filter(|outcome| !outcome.is_success())
    }

    /// [`VectaraError::PartialBatchFailure`] when any document failed
    pub fn failure(&self) -> Option<VectaraError> {
        let failed = self.failures().count();
        (failed > 0).then(|| VectaraError::PartialBatchFailure { failed, total: self.len() })
    }

    /// Collapse into the successful responses, or a partial failure error
    pub fn into_result(self) -> Result<Vec<IndexDocumentResponse>> {
        if let Some(err) = self.failure() {
            return Err(err);
        }
        self.outcomes.into_iter().map(|outcome| outcome.result).collect()
    }
}

/// Indexes a list of documents on parallel worker threads
#[derive(Clone)]
pub struct BatchIndexCoordinator {
    indexer: Arc<dyn DocumentIndexer>,
}

impl BatchIndexCoordinator {
    pub fn new(indexer: Arc<dyn DocumentIndexer>) -> Self {
        Self { indexer }
    }

    /// Split `len` positions into at most `thread_count` round-robin buckets.
    ///
    /// Only non-empty buckets are returned, so the result has
    /// `min(len, thread_count)` entries.
    pub fn partition(len: usize, thread_count: usize) -> Vec<Vec<usize>> {
        let workers = len.min(thread_count);
        if workers == 0 {
            return Vec::new();
        }
        let mut buckets = vec![Vec::new(); workers];
        for index in 0..len {
            buckets[index % workers].push(index);
        }
        buckets
    }

    /// Index every document into `corpus_id` using up to `thread_count`
    /// worker threads.
    ///
    /// Per-document failures are captured in the report, never raised. A
    /// response whose status is not OK counts as a failure.
    ///
    /// # Errors
    ///
    /// Returns [`VectaraError::InvalidArgument`] when `thread_count` is zero.
    #[instrument(skip(self, documents), fields(documents = documents.len()))]
    pub fn batch_index(
        &self,
        corpus_id: u64,
        documents: &[IndexDocument],
        thread_count: usize,
    ) -> Result<BatchReport> {
        if thread_count == 0 {
            return Err(VectaraError::InvalidArgument("thread_count must be at least 1".into()));
        }

        let buckets = Self::partition(documents.len(), thread_count);
        let workers = buckets.len();
        info!(corpus_id, workers, "Starting batch index");

        let indexer: &dyn DocumentIndexer = self.indexer.as_ref();
        let outcomes = thread::scope(|scope| {
            let handles: Vec<_> = buckets
                .into_iter()
                .enumerate()
                .map(|(worker, bucket)| {
                    let assigned = bucket.clone();
                    let handle = thread::Builder::new()
                        .name(format!("batch-index-{worker}"))
                        .spawn_scoped(scope, move || {
                            run_worker(indexer, corpus_id, documents, worker, &assigned)
                        });
                    (worker, bucket, handle)
                })
                .collect();

            let mut outcomes = Vec::with_capacity(documents.len());
            for (worker, bucket, handle) in handles {
                match handle {
                    Ok(handle) => match handle.join() {
                        Ok(worker_outcomes) => outcomes.extend(worker_outcomes),
                        Err(_) => {
                            warn!(worker, "Batch worker panicked");
                            outcomes.extend(abandoned(
                                documents,
                                worker,
                                &bucket,
                                "batch worker panicked",
                            ));
                        }
                    },
                    Err(err) => {
                        warn!(worker, error = %err, "Failed to spawn batch worker");
                        outcomes.extend(abandoned(
                            documents,
                            worker,
                            &bucket,
                            &format!("failed to spawn batch worker: {err}"),
                        ));
                    }
                }
            }
            outcomes
        });

        let report = BatchReport { outcomes, workers };
        info!(
            corpus_id,
            succeeded = report.succeeded(),
            failed = report.len() - report.succeeded(),
            "Batch index complete"
        );
        Ok(report)
    }
}

fn run_worker(
    indexer: &dyn DocumentIndexer,
    corpus_id: u64,
    documents: &[IndexDocument],
    worker: usize,
    bucket: &[usize],
) -> Vec<DocumentOutcome> {
    debug!(worker, assigned = bucket.len(), "Batch worker started");

    let outcomes: Vec<_> = bucket
        .iter()
        .map(|&index| {
            let document = &documents[index];
            let result = indexer
                .index_document(corpus_id, document)
                .and_then(require_ok_status);

            if let Err(err) = &result {
                warn!(worker, document_id = %document.document_id, error = %err, "Document failed to index");
            }

            DocumentOutcome { index, document_id: document.document_id.clone(), worker, result }
        })
        .collect();

    debug!(worker, "Batch worker finished");
    outcomes
}

fn require_ok_status(response: IndexDocumentResponse) -> Result<IndexDocumentResponse> {
    match &response.status {
        Some(status) if !status.is_ok() => Err(VectaraError::UnexpectedStatus {
            operation: INDEX_OPERATION.to_string(),
            status: status.to_string(),
        }),
        _ => Ok(response),
    }
}

fn abandoned(
    documents: &[IndexDocument],
    worker: usize,
    bucket: &[usize],
    reason: &str,
) -> Vec<DocumentOutcome> {
    bucket
        .iter()
        .map(|&index| DocumentOutcome {
            index,
            document_id: documents[index].document_id.clone(),
            worker,
            result: Err(VectaraError::Internal(reason.to_string())),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeMap, BTreeSet};

    use parking_lot::Mutex;
    use vectara_domain::{Status, StatusCode};

    use super::*;

    /// Records which thread indexed which document
    #[derive(Default)]
    struct RecordingIndexer {
        calls: Mutex<Vec<(String, String)>>,
        fail_ids: BTreeSet<String>,
        rejected_ids: BTreeSet<String>,
    }

    impl DocumentIndexer for RecordingIndexer {
        fn index_document(
            &self,
            _corpus_id: u64,
            document: &IndexDocument,
        ) -> Result<IndexDocumentResponse> {
            let thread_name = thread::current().name().unwrap_or_default().to_string();
            self.calls.lock().push((thread_name, document.document_id.clone()));

            if self.fail_ids.contains(&document.document_id) {
                return Err(VectaraError::from_status(500, "boom"));
            }
            if self.rejected_ids.contains(&document.document_id) {
                return Ok(IndexDocumentResponse {
                    status: Some(Status::with_code(StatusCode::AlreadyExists)),
                    quota_consumed: None,
                });
            }
            Ok(IndexDocumentResponse::default())
        }
    }

    fn documents(count: usize) -> Vec<IndexDocument> {
        (0..count).map(|i| IndexDocument::new(format!("doc{i}"))).collect()
    }

    #[test]
    fn test_partition_is_round_robin() {
        assert_eq!(
            BatchIndexCoordinator::partition(7, 3),
            vec![vec![0, 3, 6], vec![1, 4], vec![2, 5]]
        );
        assert_eq!(BatchIndexCoordinator::partition(2, 5), vec![vec![0], vec![1]]);
        assert!(BatchIndexCoordinator::partition(0, 4).is_empty());
    }

    #[test]
    fn test_twenty_documents_on_four_threads() {
        let indexer = Arc::new(RecordingIndexer::default());
        let coordinator = BatchIndexCoordinator::new(indexer.clone());

        let report = coordinator.batch_index(7, &documents(20), 4).unwrap();

        assert_eq!(report.len(), 20);
        assert_eq!(report.workers(), 4);
        assert_eq!(report.succeeded(), 20);
        assert!(report.failure().is_none());

        let calls = indexer.calls.lock();
        assert_eq!(calls.len(), 20);
        let mut per_thread: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
        for (thread_name, id) in calls.iter() {
            per_thread.entry(thread_name.as_str()).or_default().push(id.as_str());
        }
        assert_eq!(per_thread.len(), 4);
        assert!(per_thread.values().all(|ids| ids.len() == 5));
        assert_eq!(per_thread["batch-index-1"], ["doc1", "doc5", "doc9", "doc13", "doc17"]);

        let unique: BTreeSet<_> = calls.iter().map(|(_, id)| id.as_str()).collect();
        assert_eq!(unique.len(), 20);
    }

    #[test]
    fn test_failure_is_recorded_without_aborting_bucket() {
        let indexer = Arc::new(RecordingIndexer {
            fail_ids: BTreeSet::from(["doc2".to_string()]),
            ..RecordingIndexer::default()
        });
        let coordinator = BatchIndexCoordinator::new(indexer.clone());

        let report = coordinator.batch_index(7, &documents(10), 2).unwrap();

        assert_eq!(report.len(), 10);
        let failed: Vec<_> = report.failures().map(|o| o.document_id.as_str()).collect();
        assert_eq!(failed, ["doc2"]);
        assert_eq!(indexer.calls.lock().len(), 10);
        assert_eq!(
            report.failure(),
            Some(VectaraError::PartialBatchFailure { failed: 1, total: 10 })
        );
        assert!(matches!(
            report.into_result(),
            Err(VectaraError::PartialBatchFailure { failed: 1, total: 10 })
        ));
    }

    #[test]
    fn test_non_ok_status_counts_as_failure() {
        let indexer = Arc::new(RecordingIndexer {
            rejected_ids: BTreeSet::from(["doc0".to_string()]),
            ..RecordingIndexer::default()
        });
        let report = BatchIndexCoordinator::new(indexer).batch_index(1, &documents(3), 3).unwrap();

        let failure = report.failures().next().unwrap();
        assert_eq!(failure.index, 0);
        assert!(matches!(failure.result, Err(VectaraError::UnexpectedStatus { .. })));
        assert_eq!(report.succeeded(), 2);
    }

    #[test]
    fn test_more_threads_than_documents_spawns_only_needed_workers() {
        let indexer = Arc::new(RecordingIndexer::default());
        let report =
            BatchIndexCoordinator::new(indexer.clone()).batch_index(1, &documents(3), 8).unwrap();

        assert_eq!(report.workers(), 3);
        assert_eq!(report.len(), 3);
    }

    #[test]
    fn test_empty_batch_and_zero_threads() {
        let coordinator = BatchIndexCoordinator::new(Arc::new(RecordingIndexer::default()));

        let report = coordinator.batch_index(1, &[], 4).unwrap();
        assert!(report.is_empty());
        assert_eq!(report.workers(), 0);
        assert!(report.into_result().unwrap().is_empty());

        let err = coordinator.batch_index(1, &documents(2), 0).unwrap_err();
        assert!(matches!(err, VectaraError::InvalidArgument(_)));
    }
}
