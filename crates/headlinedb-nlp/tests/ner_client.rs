//! Integration tests for `NerClient` using wiremock HTTP mocks.

use headlinedb_core::{Capability, EntityExtractor, EntityMention};
use headlinedb_nlp::{NerClient, NlpError};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> NerClient {
    NerClient::new(base_url, 5).expect("client construction should not fail")
}

#[tokio::test]
async fn returns_entities_in_service_order() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/ents"))
        .and(body_json(serde_json::json!({ "text": "Apple opens store in Paris" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "start": 0, "end": 5, "text": "Apple", "label": "ORG" },
            { "start": 21, "end": 26, "text": "Paris", "label": "GPE" }
        ])))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let found = client
        .entities("Apple opens store in Paris")
        .await
        .expect("should parse entities");

    assert_eq!(
        found,
        vec![
            EntityMention::new("Apple", "ORG"),
            EntityMention::new("Paris", "GPE"),
        ]
    );
}

#[tokio::test]
async fn accepts_type_as_label_alias() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/ents"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "text": "Tim Cook", "type": "PERSON" }
        ])))
        .mount(&server)
        .await;

    let found = test_client(&server.uri())
        .entities("Tim Cook speaks")
        .await
        .unwrap();
    assert_eq!(found, vec![EntityMention::new("Tim Cook", "PERSON")]);
}

#[tokio::test]
async fn trailing_slash_in_base_url_is_tolerated() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/ents"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&format!("{}/", server.uri()));
    assert!(client.entities("nothing here").await.unwrap().is_empty());
}

#[tokio::test]
async fn server_error_is_reported() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/ents"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .entities("Apple")
        .await
        .unwrap_err();
    assert!(
        matches!(err, NlpError::Ner(ref m) if m.contains("503")),
        "expected Ner error naming the status, got: {err:?}"
    );
}

#[tokio::test]
async fn malformed_body_is_a_model_error_from_the_extractor() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/ents"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .extract("Apple")
        .await
        .unwrap_err();
    assert_eq!(err.capability, Capability::EntityExtractor);
    assert!(err.message.contains("parse error"), "got: {}", err.message);
}
