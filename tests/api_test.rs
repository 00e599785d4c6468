//! HTTP surface tests: the axum router is exercised in-process with
//! `tower::ServiceExt::oneshot`, backed by the lexical engine so no
//! network is involved.

use std::sync::Arc;

use axum::body::Body;
use axum::http::header;
use axum::http::Request;
use axum::http::StatusCode;
use axum::Router;
use tower::ServiceExt;

use fundrag::api::routes::api_routes;
use fundrag::api::AppState;
use fundrag::config::RetrievalConfig;
use fundrag::knowledge::KnowledgeBase;
use fundrag::rag::FaqService;
use fundrag::rag::REFUSAL_MESSAGE;

fn test_router() -> Router {
    let knowledge: KnowledgeBase = serde_json::from_value(serde_json::json!({
        "schemes": {
            "Nippon India Large Cap Fund Direct Growth": {
                "expense_ratio": {
                    "direct": "0.66%",
                    "regular": "1.57%",
                    "source_url": "https://example.com/large-cap"
                }
            }
        },
        "statement_download": {
            "cams": {
                "description": "Download statements from CAMS online",
                "source_url": "https://example.com/cams"
            }
        }
    }))
    .unwrap();

    let service = Arc::new(FaqService::lexical(
        Arc::new(knowledge),
        &RetrievalConfig::default(),
    ));
    Router::new().nest("/api", api_routes(AppState { service }))
}

fn ask_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/ask")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_returns_ok() {
    let response = test_router()
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert!(json["message"].is_string());
}

#[tokio::test]
async fn ask_answers_factual_question() {
    let response = test_router()
        .oneshot(ask_request(
            r#"{"question": "What is the expense ratio of the large cap fund?"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let answer = json["answer"].as_str().unwrap();
    assert!(answer.contains("0.66%"));
    assert!(answer.contains("1.57%"));
    assert_eq!(json["source_url"], "https://example.com/large-cap");
}

#[tokio::test]
async fn ask_refuses_advice_question() {
    let response = test_router()
        .oneshot(ask_request(
            r#"{"question": "Should I invest in Large Cap Fund?"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["answer"], REFUSAL_MESSAGE);
    assert!(json["source_url"].is_null());
}

#[tokio::test]
async fn ask_rejects_blank_question() {
    let response = test_router()
        .oneshot(ask_request(r#"{"question": "   "}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Please provide a valid question");
    assert!(json["source_url"].is_null());
}

#[tokio::test]
async fn ask_rejects_missing_question_field() {
    let response = test_router().oneshot(ask_request(r#"{}"#)).await.unwrap();
    // Serde rejects the body before the handler runs
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}
