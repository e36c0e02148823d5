//! Admin, query, document and mirror flows over HTTP

#[path = "support.rs"]
mod support;

use serde_json::json;
use support::{ok_status, TestServer};
use tempfile::TempDir;
use vectara_domain::{ApiKeyFilter, Corpus, ErrorKind, QueryOptions, StatusCode, VectaraError};
use vectara_infra::MirrorStore;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, ResponseTemplate};

fn key(id: &str, enabled: bool, corpus_id: u64) -> serde_json::Value {
    json!({
        "apiKey": {
            "id": id,
            "keyType": "API_KEY_TYPE__SERVING",
            "enabled": enabled,
            "status": if enabled { "ENABLED" } else { "DISABLED" }
        },
        "corpus": [{ "id": corpus_id, "name": format!("corpus-{corpus_id}") }]
    })
}

#[test]
fn test_list_api_keys_follows_pages_then_filters() {
    let server = TestServer::start();
    server.mount(
        Mock::given(method("POST"))
            .and(path("/list-api-keys"))
            .and(body_partial_json(json!({ "pageKey": "page-2" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "keyData": [key("k3", true, 9)]
            })))
            .expect(1),
    );
    server.mount(
        Mock::given(method("POST"))
            .and(path("/list-api-keys"))
            .and(body_partial_json(json!({ "readCorporaInfo": true })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "keyData": [key("k1", true, 3), key("k2", false, 3)],
                "pageKey": "page-2"
            })))
            .expect(1),
    );

    let client = server.api_key_client();
    let enabled = ApiKeyFilter { enabled: Some(true), ..ApiKeyFilter::default() };
    let keys = client.admin().list_api_keys(&enabled).unwrap();

    let ids: Vec<_> = keys.iter().map(|key| key.api_key.id.as_str()).collect();
    assert_eq!(ids, vec!["k1", "k3"]);
    assert_eq!(client.transcript().len(), 2);
}

#[test]
fn test_list_api_keys_stops_when_page_key_repeats() {
    let server = TestServer::start();
    server.mount(
        Mock::given(method("POST"))
            .and(path("/list-api-keys"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "keyData": [key("k1", true, 3)],
                "pageKey": "same-page"
            })))
            .expect(2),
    );

    let err = server.api_key_client().admin().list_api_keys(&ApiKeyFilter::default()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnexpectedStatus);
    assert!(err.to_string().contains("same-page"), "{err}");
}

#[test]
fn test_create_unique_corpus_refuses_existing_name() {
    let server = TestServer::start();
    server.mount(
        Mock::given(method("POST"))
            .and(path("/list-corpora"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "corpus": [{ "id": 11, "name": "handbook" }, { "id": 12, "name": "handbook-v2" }]
            }))),
    );
    server.mount(
        Mock::given(method("POST"))
            .and(path("/create-corpus"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "corpusId": 13, "status": ok_status()
            }))),
    );

    let client = server.api_key_client();
    let handbook = Corpus { name: "handbook".into(), ..Corpus::default() };
    let err = client.corpus_manager().create_corpus(&handbook, false, true).unwrap_err();
    assert_eq!(err, VectaraError::DuplicateCorpus("handbook".into()));

    let fresh = Corpus { name: "handbook-v3".into(), ..Corpus::default() };
    assert_eq!(client.corpus_manager().create_corpus(&fresh, false, true).unwrap(), 13);
}

#[test]
fn test_query_summary_without_citation_is_marked_invalid() {
    let server = TestServer::start();
    server.mount(
        Mock::given(method("POST"))
            .and(path("/query"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "responseSet": [{
                    "response": [{ "text": "Tokens last an hour.", "score": 0.8, "documentIndex": 0 }],
                    "document": [{ "id": "auth-guide" }],
                    "summary": [{ "text": "Tokens last an hour.", "status": [] }]
                }],
                "status": []
            }))),
    );

    let client = server.api_key_client();
    let response_set = client.query().query("how long do tokens last", &[3], &QueryOptions::default()).unwrap();

    assert_eq!(response_set.response.len(), 1);
    assert_eq!(response_set.summary[0].status[0].code, Some(StatusCode::InvalidArgument));
    assert_eq!(client.transcript()[0].operation, "query");
}

#[test]
fn test_query_failed_summary_is_an_error() {
    let server = TestServer::start();
    server.mount(
        Mock::given(method("POST"))
            .and(path("/query"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "responseSet": [{
                    "response": [],
                    "summary": [{ "status": [{ "code": "QRY__SMRY__NO_QUERY_RESULTS" }] }]
                }]
            }))),
    );

    let err = server
        .api_key_client()
        .query()
        .query("anything", &[3], &QueryOptions::default())
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Summary);
}

#[test]
fn test_list_documents_follows_next_page_key() {
    let server = TestServer::start();
    server.mount(
        Mock::given(method("POST"))
            .and(path("/list-documents"))
            .and(body_partial_json(json!({ "pageKey": "next" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "document": [{ "id": "doc-2", "metadata": [] }]
            }))),
    );
    server.mount(
        Mock::given(method("POST"))
            .and(path("/list-documents"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "document": [{ "id": "doc-1", "metadata": [{ "name": "lang", "value": "en" }] }],
                "nextPageKey": "next"
            }))),
    );

    let documents = server.api_key_client().documents().list_documents(3, Some(1), None).unwrap();

    assert_eq!(documents.len(), 2);
    assert_eq!(documents[0].metadata.get("lang").map(String::as_str), Some("en"));
    assert_eq!(documents[1].id, "doc-2");
}

#[test]
fn test_list_documents_stops_when_next_page_key_repeats() {
    let server = TestServer::start();
    server.mount(
        Mock::given(method("POST"))
            .and(path("/list-documents"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "document": [{ "id": "doc-1", "metadata": [] }],
                "nextPageKey": "again"
            })))
            .expect(2),
    );

    let client = server.api_key_client();
    let err = client.documents().list_documents(3, None, None).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::UnexpectedStatus);
    assert_eq!(client.transcript().len(), 2);
}

#[test]
fn test_mirror_syncs_account_corpora() {
    let server = TestServer::start();
    server.mount(
        Mock::given(method("POST"))
            .and(path("/list-corpora"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "corpus": [
                    { "id": 2, "name": "policies", "description": "HR policies" },
                    { "id": 1, "name": "handbook" }
                ]
            }))),
    );

    let dir = TempDir::new().unwrap();
    let mirror = MirrorStore::open(dir.path().join("mirror.db")).unwrap();
    mirror.setup().unwrap();

    let client = server.api_key_client();
    assert_eq!(mirror.sync_corpora(client.admin()).unwrap(), 2);

    let mirrored = mirror.list_corpora().unwrap();
    assert_eq!(mirrored[0].name, "handbook");
    assert_eq!(mirrored[1].description.as_deref(), Some("HR policies"));
}
