//! API request handlers

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use tracing::info;

use crate::api::types::AskRequest;
use crate::api::types::AskResponse;
use crate::api::types::ErrorResponse;
use crate::api::types::HealthResponse;
use crate::rag::FaqService;

/// Guidance returned alongside a 400 when the question is missing or blank
const EMPTY_QUESTION_MESSAGE: &str = "I need a question to help you. Please ask about \
     expense ratio, exit load, minimum SIP, lock-in, riskometer, benchmark, or statement \
     downloads.";

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<FaqService>,
}

/// Health check handler
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        message: "FAQ assistant API is running".to_string(),
    })
}

/// Answer a question (POST /api/ask)
pub async fn ask(State(state): State<AppState>, Json(req): Json<AskRequest>) -> Response {
    let question = req.question.trim();

    if question.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Please provide a valid question".to_string(),
                answer: EMPTY_QUESTION_MESSAGE.to_string(),
                source_url: None,
            }),
        )
            .into_response();
    }

    info!("POST /api/ask: {}", question);
    let answer = state.service.answer(question).await;
    Json(AskResponse::from(answer)).into_response()
}
