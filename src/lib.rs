//! fundrag: a factual FAQ assistant for a fixed set of mutual-fund
//! schemes.
//!
//! The core is a retrieval engine: an in-memory nearest-neighbor search
//! over embeddings of knowledge-base facts ([`store`]), gated by an
//! advice-intent classifier ([`filter`]) and rendered into templated
//! answers ([`render`]). The [`rag`] pipeline ties those together behind
//! a single `answer(question)` contract; the HTTP server ([`api`]) and
//! interactive CLI ([`cli`]) are thin transports over it.

pub mod api;
pub mod cli;
pub mod config;
pub mod embeddings;
pub mod errors;
pub mod filter;
pub mod knowledge;
pub mod logging;
pub mod rag;
pub mod render;
pub mod store;

pub use config::AppConfig;
pub use errors::*;
