//! HTTP API module: thin axum adapter over the answering pipeline

pub mod handlers;
pub mod routes;
pub mod server;
pub mod types;

pub use handlers::AppState;
pub use server::serve_api;
