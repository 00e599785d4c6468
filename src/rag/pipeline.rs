//! FAQ answering pipeline: filter -> embed -> search -> render.
//!
//! The pipeline is transport-agnostic: the CLI loop and the HTTP handlers
//! are both thin adapters over [`FaqService::answer`].

use std::path::Path;
use std::sync::Arc;

use tracing::debug;
use tracing::error;
use tracing::info;
use tracing::warn;

use crate::config::AppConfig;
use crate::config::RetrievalConfig;
use crate::embeddings::EmbeddingClient;
use crate::errors::Result;
use crate::filter::AdviceFilter;
use crate::knowledge::KnowledgeBase;
use crate::rag::Answer;
use crate::rag::LexicalAssistant;
use crate::rag::PROVIDER_ERROR_MESSAGE;
use crate::rag::REFUSAL_MESSAGE;
use crate::render::FactRenderer;
use crate::store::VectorStore;

/// The active answering engine
enum Engine {
    /// Embed the question and scan the vector store
    Semantic {
        store: VectorStore,
        client: EmbeddingClient,
    },
    /// Offline alias/keyword lookup (no provider configured)
    Lexical(LexicalAssistant),
}

/// The question-answering service shared by CLI and HTTP transports.
///
/// Loaded once at process start; all state is read-only afterwards, so one
/// instance may serve concurrent requests without locking.
pub struct FaqService {
    filter: AdviceFilter,
    renderer: FactRenderer,
    engine: Engine,
    top_k: usize,
}

impl FaqService {
    /// Build the service from configuration. Uses the semantic engine when
    /// an embedding provider is configured and a snapshot exists, and
    /// falls back to lexical matching otherwise.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let knowledge = Arc::new(KnowledgeBase::from_file(config.knowledge_base_path())?);

        if config.embeddings_configured() && Path::new(config.snapshot_path()).exists() {
            let store = VectorStore::load(config.snapshot_path())?;
            let client = EmbeddingClient::from_config(config)?;
            info!(
                "Semantic engine ready: {} facts loaded from {}",
                store.len(),
                config.snapshot_path()
            );
            Ok(Self::semantic(store, client, knowledge, &config.retrieval))
        } else {
            warn!(
                "No embedding provider configured or snapshot missing; \
                 falling back to lexical matching"
            );
            Ok(Self::lexical(knowledge, &config.retrieval))
        }
    }

    /// Build a semantic service from already-constructed parts
    pub fn semantic(
        store: VectorStore,
        client: EmbeddingClient,
        knowledge: Arc<KnowledgeBase>,
        retrieval: &RetrievalConfig,
    ) -> Self {
        Self {
            filter: AdviceFilter::new(),
            renderer: FactRenderer::new(knowledge, retrieval.confidence_threshold),
            engine: Engine::Semantic { store, client },
            top_k: retrieval.top_k,
        }
    }

    /// Build a lexical-only service (degraded mode)
    pub fn lexical(knowledge: Arc<KnowledgeBase>, retrieval: &RetrievalConfig) -> Self {
        Self {
            filter: AdviceFilter::new(),
            renderer: FactRenderer::new(knowledge.clone(), retrieval.confidence_threshold),
            engine: Engine::Lexical(LexicalAssistant::new(knowledge)),
            top_k: retrieval.top_k,
        }
    }

    /// Whether the semantic engine is active
    pub fn is_semantic(&self) -> bool {
        matches!(self.engine, Engine::Semantic { .. })
    }

    /// Answer a question. Never fails: provider and configuration problems
    /// come back as fixed answer texts with no source.
    pub async fn answer(&self, question: &str) -> Answer {
        if self.filter.is_advice_question(question) {
            debug!("Refusing advice question");
            return Answer::plain(REFUSAL_MESSAGE);
        }

        match &self.engine {
            Engine::Semantic { store, client } => {
                let embedding = match client.generate(question).await {
                    Ok(embedding) => embedding,
                    Err(e) => {
                        // Log the raw failure; the caller only sees the fixed message
                        error!("Embedding request failed: {e}");
                        return Answer::plain(PROVIDER_ERROR_MESSAGE);
                    }
                };

                let hits = store.search(&embedding, self.top_k);
                debug!("Retrieved {} candidate facts", hits.len());
                self.renderer.render(question, &hits)
            }
            Engine::Lexical(assistant) => assistant.answer(question),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn knowledge() -> Arc<KnowledgeBase> {
        Arc::new(
            serde_json::from_value(serde_json::json!({
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
            .unwrap(),
        )
    }

    #[tokio::test]
    async fn test_advice_question_is_refused_before_retrieval() {
        let service = FaqService::lexical(knowledge(), &RetrievalConfig::default());
        let answer = service.answer("Should I invest in Large Cap Fund?").await;
        assert_eq!(answer.answer, REFUSAL_MESSAGE);
        assert!(answer.source_url.is_none());
    }

    #[tokio::test]
    async fn test_allow_listed_question_is_answered() {
        let service = FaqService::lexical(knowledge(), &RetrievalConfig::default());
        let answer = service
            .answer("How can I download capital gains statement from CAMS?")
            .await;
        assert!(answer.answer.contains("https://example.com/cams"));
        assert!(answer.source_url.is_some());
    }

    #[tokio::test]
    async fn test_lexical_engine_answers_factual_question() {
        let service = FaqService::lexical(knowledge(), &RetrievalConfig::default());
        assert!(!service.is_semantic());
        let answer = service
            .answer("What is the expense ratio of the large cap fund?")
            .await;
        assert!(answer.answer.contains("0.66%"));
        assert!(answer.answer.contains("1.57%"));
    }
}
