use std::path::Path;

use serde::Deserialize;
use serde::Serialize;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub backtrace: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingsConfig {
    /// Embedding provider name: "gemini" or "ollama". Empty disables
    /// semantic retrieval and the assistant falls back to lexical matching.
    #[serde(default)]
    pub provider: String,
    pub model: String,
    pub endpoint: String,
    /// API key for hosted providers. `GOOGLE_API_KEY` in the environment
    /// takes precedence over this value.
    #[serde(default)]
    pub api_key: String,
    pub dimension: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalConfig {
    /// Number of nearest neighbors returned per search
    #[serde(default = "default_top_k")]
    pub top_k: usize,
    /// Matches scoring below this are reported as uncertain
    #[serde(default = "default_confidence_threshold")]
    pub confidence_threshold: f32,
}

fn default_top_k() -> usize {
    3
}

fn default_confidence_threshold() -> f32 {
    0.5
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            top_k: default_top_k(),
            confidence_threshold: default_confidence_threshold(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    pub knowledge_base: String,
    pub snapshot: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub enable_cors: bool,
    pub static_dir: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub logging: LoggingConfig,
    pub embeddings: EmbeddingsConfig,
    #[serde(default)]
    pub retrieval: RetrievalConfig,
    pub paths: PathsConfig,
    pub server: ServerConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration from default config file path
    pub fn load() -> crate::Result<Self> {
        // Try to load from config.toml first, then fall back to config.example.toml
        if Path::new("config.toml").exists() {
            Self::from_file("config.toml")
        } else if Path::new("config.example.toml").exists() {
            Self::from_file("config.example.toml")
        } else {
            Err(crate::FundRagError::Config(
                "No config file found. Please create config.toml or config.example.toml".to_string(),
            ))
        }
    }

    /// Get embedding model name
    pub fn embedding_model(&self) -> &str {
        &self.embeddings.model
    }

    /// Get embedding dimension
    pub fn embedding_dimension(&self) -> usize {
        self.embeddings.dimension
    }

    /// Get embedding endpoint
    pub fn embedding_endpoint(&self) -> &str {
        &self.embeddings.endpoint
    }

    /// Effective embedding API key: environment variable first, config second
    pub fn embedding_api_key(&self) -> Option<String> {
        std::env::var("GOOGLE_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty())
            .or_else(|| {
                let key = self.embeddings.api_key.trim();
                if key.is_empty() {
                    None
                } else {
                    Some(key.to_string())
                }
            })
    }

    /// Whether an embedding provider is usable. Gemini needs an API key;
    /// Ollama only needs an endpoint.
    pub fn embeddings_configured(&self) -> bool {
        match self.embeddings.provider.trim() {
            "" => false,
            "gemini" | "google" => self.embedding_api_key().is_some(),
            _ => true,
        }
    }

    /// Get knowledge base file path
    pub fn knowledge_base_path(&self) -> &str {
        &self.paths.knowledge_base
    }

    /// Get vector store snapshot path
    pub fn snapshot_path(&self) -> &str {
        &self.paths.snapshot
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            logging: LoggingConfig {
                level: "info".to_string(),
                backtrace: false,
            },
            embeddings: EmbeddingsConfig {
                provider: "gemini".to_string(),
                model: "text-embedding-004".to_string(),
                endpoint: "https://generativelanguage.googleapis.com".to_string(),
                api_key: String::new(),
                dimension: 768,
            },
            retrieval: RetrievalConfig::default(),
            paths: PathsConfig {
                knowledge_base: "knowledge_base.json".to_string(),
                snapshot: "embeddings.json".to_string(),
            },
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 3000,
                enable_cors: true,
                static_dir: "public".to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retrieval_defaults() {
        let retrieval = RetrievalConfig::default();
        assert_eq!(retrieval.top_k, 3);
        assert!((retrieval.confidence_threshold - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn test_parse_minimal_config() {
        let toml_str = r#"
            [logging]
            level = "info"
            backtrace = false

            [embeddings]
            provider = "ollama"
            model = "nomic-embed-text"
            endpoint = "http://localhost:11434"
            dimension = 768

            [paths]
            knowledge_base = "knowledge_base.json"
            snapshot = "embeddings.json"

            [server]
            host = "127.0.0.1"
            port = 3000
            enable_cors = true
            static_dir = "public"
        "#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.retrieval.top_k, 3);
        assert!(config.embeddings_configured());
    }

    #[test]
    fn test_empty_provider_means_unconfigured() {
        let mut config = AppConfig::default();
        config.embeddings.provider = String::new();
        assert!(!config.embeddings_configured());
    }
}
