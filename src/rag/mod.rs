//! Retrieval pipeline: advice gating, nearest-neighbor retrieval over the
//! embedded knowledge base, and templated answer rendering.
//!
//! Two engines implement the same `answer(question)` contract:
//! - semantic: embed the question, scan the vector store, render the
//!   nearest fact (requires a configured embedding provider)
//! - lexical: alias-table scheme matching plus keyword fact lookup,
//!   entirely offline (degraded mode)
//!
//! Every outcome, including provider failures, is an [`Answer`]; the
//! pipeline has no distinguished error return.

pub mod lexical;
pub mod pipeline;

pub use lexical::LexicalAssistant;
pub use pipeline::FaqService;

use serde::Serialize;

/// The single response shape shared by all pipeline outcomes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Answer {
    pub answer: String,
    pub source_url: Option<String>,
}

impl Answer {
    /// An answer with no source citation
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            answer: text.into(),
            source_url: None,
        }
    }
}

/// Fixed refusal for advice-seeking questions
pub const REFUSAL_MESSAGE: &str = "I'm sorry, but I cannot provide investment advice, \
     recommendations, comparisons, or opinions. I can only provide factual information \
     about the schemes.";

/// Fixed response when the embedding provider is unusable or errors
pub const PROVIDER_ERROR_MESSAGE: &str = "I'm having trouble processing your question. \
     Please check that an embedding provider is configured and reachable.";

/// Fixed fallback when retrieval produces no results
pub const NO_MATCH_MESSAGE: &str = "I couldn't find relevant information to answer your \
     question. Please try rephrasing or ask about expense ratio, exit load, minimum SIP, \
     minimum lump sum, lock-in, riskometer, benchmark, or statement downloads.";

/// Fixed response when the best match scores below the confidence threshold
pub const LOW_CONFIDENCE_MESSAGE: &str = "I found some related information, but it may \
     not directly answer your question. Please try rephrasing or be more specific about \
     which scheme and fact you're asking about.";
