//! Parallel indexing over HTTP through the corpus manager

#[path = "support.rs"]
mod support;

use std::collections::BTreeSet;

use serde_json::json;
use support::{ok_status, TestServer};
use vectara_domain::{DocumentSection, ErrorKind, IndexDocument, VectaraError};
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, ResponseTemplate};

fn documents(count: usize) -> Vec<IndexDocument> {
    (0..count)
        .map(|n| {
            let mut document = IndexDocument::new(format!("doc-{n}"));
            document.section.push(DocumentSection::text(format!("Body of document {n}")));
            document
        })
        .collect()
}

#[test]
fn test_twenty_documents_on_four_workers() {
    let server = TestServer::start();
    server.mount(
        Mock::given(method("POST"))
            .and(path("/index"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": ok_status() })))
            .expect(20),
    );

    let client = server.api_key_client();
    let report = client.corpus_manager().batch_index(3, &documents(20), 4).unwrap();

    assert_eq!(report.len(), 20);
    assert_eq!(report.workers(), 4);
    assert_eq!(report.succeeded(), 20);
    assert!(report.failure().is_none());

    for outcome in report.outcomes() {
        assert_eq!(outcome.worker, outcome.index % 4);
    }
    let indexed: BTreeSet<_> = report.outcomes().iter().map(|o| o.document_id.clone()).collect();
    assert_eq!(indexed.len(), 20);
    assert_eq!(client.transcript().len(), 20);
}

#[test]
fn test_failed_documents_do_not_stop_their_worker() {
    let server = TestServer::start();
    // Mounted first so it wins over the catch-all below.
    server.mount(
        Mock::given(method("POST"))
            .and(path("/index"))
            .and(body_string_contains("\"doc-3\""))
            .respond_with(ResponseTemplate::new(500).set_body_string("indexing failed")),
    );
    server.mount(
        Mock::given(method("POST"))
            .and(path("/index"))
            .and(body_string_contains("\"doc-5\""))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": { "code": "FAILURE", "statusDetail": "rejected" }
            }))),
    );
    server.mount(
        Mock::given(method("POST"))
            .and(path("/index"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": ok_status() }))),
    );

    let client = server.api_key_client();
    let report = client.corpus_manager().batch_index(3, &documents(8), 2).unwrap();

    assert_eq!(report.len(), 8);
    assert_eq!(report.succeeded(), 6);

    let failed: Vec<_> = report.failures().map(|o| o.document_id.as_str()).collect();
    assert!(failed.contains(&"doc-3") && failed.contains(&"doc-5"), "failed: {failed:?}");
    assert_eq!(report.failure(), Some(VectaraError::PartialBatchFailure { failed: 2, total: 8 }));
    assert_eq!(report.into_result().unwrap_err().kind(), ErrorKind::PartialBatchFailure);
}

#[test]
fn test_more_workers_than_documents() {
    let server = TestServer::start();
    server.mount(
        Mock::given(method("POST"))
            .and(path("/index"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(3),
    );

    let report = server.api_key_client().corpus_manager().batch_index(1, &documents(3), 10).unwrap();
    assert_eq!(report.workers(), 3);
    assert_eq!(report.succeeded(), 3);
}

#[test]
fn test_zero_threads_is_rejected_before_any_call() {
    let server = TestServer::start();
    let client = server.api_key_client();

    let err = client.corpus_manager().batch_index(1, &documents(2), 0).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    assert!(client.transcript().is_empty());
}
