//! Embedding API clients for the supported providers

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use serde::Serialize;
use tracing::debug;

use crate::config::AppConfig;
use crate::errors::FundRagError;
use crate::errors::Result;

/// Supported embedding providers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbeddingProvider {
    /// Google Gemini embeddings API (text-embedding-004)
    Gemini,
    /// Ollama local embeddings
    Ollama,
}

impl EmbeddingProvider {
    /// Parse a provider name from configuration
    pub fn from_name(name: &str) -> Result<Self> {
        match name.trim().to_lowercase().as_str() {
            "gemini" | "google" => Ok(Self::Gemini),
            "ollama" => Ok(Self::Ollama),
            other => Err(FundRagError::Config(format!(
                "Unknown embedding provider '{other}' (expected 'gemini' or 'ollama')"
            ))),
        }
    }
}

/// Client for generating embeddings. Each call is a single network
/// round-trip; a timeout counts as a provider error.
pub struct EmbeddingClient {
    provider: EmbeddingProvider,
    model: String,
    endpoint: String,
    api_key: Option<String>,
    client: Client,
}

impl EmbeddingClient {
    /// Create a new embedding client
    pub fn new(
        provider: EmbeddingProvider,
        model: String,
        endpoint: String,
        api_key: Option<String>,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| FundRagError::Http(e.to_string()))?;

        if provider == EmbeddingProvider::Gemini && api_key.is_none() {
            return Err(FundRagError::Config(
                "Gemini embedding provider requires an API key".to_string(),
            ));
        }

        Ok(Self {
            provider,
            model,
            endpoint,
            api_key,
            client,
        })
    }

    /// Create a client from application configuration
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let provider = EmbeddingProvider::from_name(&config.embeddings.provider)?;
        Self::new(
            provider,
            config.embedding_model().to_string(),
            config.embedding_endpoint().trim_end_matches('/').to_string(),
            config.embedding_api_key(),
        )
    }

    /// Generate an embedding for a single text
    pub async fn generate(&self, text: &str) -> Result<Vec<f32>> {
        match self.provider {
            EmbeddingProvider::Gemini => self.generate_gemini(text).await,
            EmbeddingProvider::Ollama => self.generate_ollama(text).await,
        }
    }

    /// Generate embeddings for multiple texts with bounded concurrency.
    ///
    /// Results come back in input order, so callers can zip them against
    /// the texts they submitted.
    pub async fn generate_batch(&self, texts: Vec<&str>, concurrency: usize) -> Result<Vec<Vec<f32>>> {
        use futures::stream;
        use futures::stream::StreamExt;

        let concurrency = concurrency.clamp(1, texts.len().max(1));
        let results: Vec<Result<Vec<f32>>> = stream::iter(texts)
            .map(|text| async move { self.generate(text).await })
            .buffered(concurrency)
            .collect()
            .await;

        let mut embeddings = Vec::with_capacity(results.len());
        for result in results {
            embeddings.push(result?);
        }

        Ok(embeddings)
    }

    /// Generate an embedding using the Gemini API
    async fn generate_gemini(&self, text: &str) -> Result<Vec<f32>> {
        let api_key = self
            .api_key
            .as_ref()
            .ok_or_else(|| FundRagError::Config("Gemini API key not provided".to_string()))?;

        #[derive(Serialize)]
        struct Part<'a> {
            text: &'a str,
        }

        #[derive(Serialize)]
        struct Content<'a> {
            parts: Vec<Part<'a>>,
        }

        #[derive(Serialize)]
        struct GeminiRequest<'a> {
            content: Content<'a>,
        }

        #[derive(Deserialize)]
        struct GeminiEmbedding {
            values: Vec<f32>,
        }

        #[derive(Deserialize)]
        struct GeminiResponse {
            embedding: GeminiEmbedding,
        }

        let url = format!(
            "{}/v1beta/models/{}:embedContent",
            self.endpoint, self.model
        );
        debug!("Calling Gemini embeddings API: {}", url);

        let request = GeminiRequest {
            content: Content {
                parts: vec![Part { text }],
            },
        };

        let response = self
            .client
            .post(&url)
            .query(&[("key", api_key.as_str())])
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| FundRagError::Http(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(FundRagError::Embedding(format!(
                "Gemini API error ({status}): {error_text}"
            )));
        }

        let result: GeminiResponse = response
            .json()
            .await
            .map_err(|e| FundRagError::Embedding(format!("Failed to parse response: {e}")))?;

        Ok(result.embedding.values)
    }

    /// Generate an embedding using the Ollama API
    async fn generate_ollama(&self, text: &str) -> Result<Vec<f32>> {
        #[derive(Serialize)]
        struct OllamaRequest<'a> {
            model: &'a str,
            prompt: &'a str,
        }

        #[derive(Deserialize)]
        struct OllamaResponse {
            embedding: Vec<f32>,
        }

        let url = format!("{}/api/embeddings", self.endpoint);
        debug!("Calling Ollama embeddings API: {}", url);

        let request = OllamaRequest {
            model: &self.model,
            prompt: text,
        };

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| FundRagError::Http(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(FundRagError::Embedding(format!(
                "Ollama API error ({status}): {error_text}"
            )));
        }

        let result: OllamaResponse = response
            .json()
            .await
            .map_err(|e| FundRagError::Embedding(format!("Failed to parse response: {e}")))?;

        Ok(result.embedding)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_parsing() {
        assert_eq!(
            EmbeddingProvider::from_name("gemini").unwrap(),
            EmbeddingProvider::Gemini
        );
        assert_eq!(
            EmbeddingProvider::from_name("Ollama").unwrap(),
            EmbeddingProvider::Ollama
        );
        assert!(EmbeddingProvider::from_name("openai").is_err());
    }

    #[test]
    fn test_gemini_requires_api_key() {
        let result = EmbeddingClient::new(
            EmbeddingProvider::Gemini,
            "text-embedding-004".to_string(),
            "https://generativelanguage.googleapis.com".to_string(),
            None,
        );
        assert!(result.is_err());
    }

    #[tokio::test]
    #[ignore = "Requires API key"]
    async fn test_gemini_embedding() {
        let client = EmbeddingClient::new(
            EmbeddingProvider::Gemini,
            "text-embedding-004".to_string(),
            "https://generativelanguage.googleapis.com".to_string(),
            std::env::var("GOOGLE_API_KEY").ok(),
        )
        .unwrap();

        let embedding = client.generate("Hello, world!").await.unwrap();
        assert_eq!(embedding.len(), 768);
    }
}
