use docsum_core::{Credentials, GroundTruthRow};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::{BigQueryStore, DocumentStore, StoreError};

fn test_store(server: &MockServer) -> BigQueryStore {
    BigQueryStore::new(
        server.uri(),
        Credentials::new(Some("p".to_owned()), "test-token".to_owned()),
        "p".to_owned(),
        "d".to_owned(),
        "us-central1".to_owned(),
    )
    .unwrap()
}

fn query_rows(rows: serde_json::Value) -> serde_json::Value {
    serde_json::json!({ "kind": "bigquery#queryResponse", "rows": rows })
}

#[tokio::test]
async fn test_fetch_document_present() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/bigquery/v2/projects/p/queries"))
        .and(header("Authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(query_rows(serde_json::json!([
            { "f": [ { "v": "The sky is blue." }, { "v": "Sky color fact." } ] }
        ]))))
        .mount(&server)
        .await;

    let store = test_store(&server);
    let doc = store.fetch_document(0).await.unwrap().unwrap();
    assert_eq!(doc.text, "The sky is blue.");
    assert_eq!(doc.summary, "Sky color fact.");
}

#[tokio::test]
async fn test_fetch_document_absent() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/bigquery/v2/projects/p/queries"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "kind": "bigquery#queryResponse" })),
        )
        .mount(&server)
        .await;

    let store = test_store(&server);
    assert!(store.fetch_document(999).await.unwrap().is_none());
}

#[tokio::test]
async fn test_fetch_document_query_filters_exact_index() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/bigquery/v2/projects/p/queries"))
        .and(body_partial_json(serde_json::json!({
            "query": "SELECT document, summary FROM `p.d.ground_truth` WHERE index = 3 LIMIT 1",
            "useLegacySql": false
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(query_rows(serde_json::json!([
            { "f": [ { "v": "D" }, { "v": "S" } ] }
        ]))))
        .expect(1)
        .mount(&server)
        .await;

    let store = test_store(&server);
    let doc = store.fetch_document(3).await.unwrap().unwrap();
    assert_eq!(doc.text, "D");
}

#[tokio::test]
async fn test_fetch_generated_summary_present() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/bigquery/v2/projects/p/queries"))
        .respond_with(ResponseTemplate::new(200).set_body_json(query_rows(serde_json::json!([
            { "f": [ { "v": "cached summary" } ] }
        ]))))
        .mount(&server)
        .await;

    let store = test_store(&server);
    let summary = store.fetch_generated_summary(0).await.unwrap();
    assert_eq!(summary.as_deref(), Some("cached summary"));
}

#[tokio::test]
async fn test_store_generated_summary_mirrors_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(
            "/bigquery/v2/projects/p/datasets/d/tables/generated_summaries/insertAll",
        ))
        .and(body_partial_json(serde_json::json!({
            "rows": [ { "json": { "index": 5, "id": 5, "generated_summary": "one line" } } ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let store = test_store(&server);
    store.store_generated_summary(5, "one line").await.unwrap();
}

#[tokio::test]
async fn test_store_generated_summary_row_errors_are_fatal() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "insertErrors": [
                { "index": 0, "errors": [ { "reason": "invalid", "message": "bad row" } ] }
            ]
        })))
        .mount(&server)
        .await;

    let store = test_store(&server);
    let err = store.store_generated_summary(0, "x").await.unwrap_err();
    match err {
        StoreError::InsertRejected(detail) => {
            assert!(detail.contains("invalid"));
            assert!(detail.contains("bad row"));
        },
        other => panic!("expected InsertRejected, got {other:?}"),
    }
}

#[tokio::test]
async fn test_http_error_status_propagates() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503).set_body_string("backend unavailable"))
        .mount(&server)
        .await;

    let store = test_store(&server);
    let err = store.fetch_document(0).await.unwrap_err();
    assert!(matches!(err, StoreError::HttpStatus { code: 503, .. }));
}

#[tokio::test]
async fn test_create_dataset_conflict_is_ok() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/bigquery/v2/projects/p/datasets"))
        .respond_with(ResponseTemplate::new(409).set_body_string("Already Exists"))
        .mount(&server)
        .await;

    let store = test_store(&server);
    store.create_dataset().await.unwrap();
}

#[tokio::test]
async fn test_load_ground_truth_truncates_then_inserts() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/bigquery/v2/projects/p/queries"))
        .and(body_partial_json(serde_json::json!({
            "query": "TRUNCATE TABLE `p.d.ground_truth`"
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "kind": "bigquery#queryResponse" })),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/bigquery/v2/projects/p/datasets/d/tables/ground_truth/insertAll"))
        .and(body_partial_json(serde_json::json!({
            "rows": [ { "json": { "index": 3, "id": 3, "document": "D", "summary": "S" } } ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let store = test_store(&server);
    let rows = vec![GroundTruthRow::new(3, "D".to_owned(), "S".to_owned())];
    store.load_ground_truth(&rows).await.unwrap();
}

#[tokio::test]
async fn test_sample_rows() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/bigquery/v2/projects/p/queries"))
        .respond_with(ResponseTemplate::new(200).set_body_json(query_rows(serde_json::json!([
            { "f": [ { "v": "0" }, { "v": "0" }, { "v": "doc" }, { "v": null } ] }
        ]))))
        .mount(&server)
        .await;

    let store = test_store(&server);
    let rows = store.sample_rows("ground_truth", 5).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0][2].as_deref(), Some("doc"));
    assert!(rows[0][3].is_none());
}
