//! Embeddings generation module
//!
//! Converts text into fixed-dimension vectors via an external provider:
//! - Google Gemini (text-embedding-004)
//! - Ollama (local models)
//!
//! The serving pipeline makes one call per question; the offline builder
//! (`builder`) embeds the whole knowledge base in one batch job.

pub mod builder;
pub mod client;

pub use builder::build_store;
pub use builder::plan_records;
pub use client::EmbeddingClient;
pub use client::EmbeddingProvider;
