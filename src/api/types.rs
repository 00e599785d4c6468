//! API request and response types

use serde::Deserialize;
use serde::Serialize;

use crate::rag::Answer;

/// Ask request body
#[derive(Debug, Deserialize)]
pub struct AskRequest {
    pub question: String,
}

/// Ask response body: same shape for success and in-band error answers
#[derive(Debug, Serialize)]
pub struct AskResponse {
    pub answer: String,
    pub source_url: Option<String>,
}

impl From<Answer> for AskResponse {
    fn from(answer: Answer) -> Self {
        Self {
            answer: answer.answer,
            source_url: answer.source_url,
        }
    }
}

/// Validation error response (400)
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub answer: String,
    pub source_url: Option<String>,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}
