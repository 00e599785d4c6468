//! HTTP server implementation

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use axum::error_handling::HandleErrorLayer;
use axum::http::StatusCode;
use axum::Router;
use tower::timeout::TimeoutLayer;
use tower::BoxError;
use tower::ServiceBuilder;
use tower_http::cors::Any;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::services::ServeFile;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::api::handlers::AppState;
use crate::api::routes;
use crate::config::AppConfig;
use crate::rag::FaqService;
use crate::Result;

/// Start the API server with the static chat frontend
pub async fn serve_api(config: &AppConfig, service: Arc<FaqService>) -> Result<()> {
    info!("Starting FAQ assistant API server...");

    let state = AppState { service };
    let mut app = Router::new().nest("/api", routes::api_routes(state));

    // Static chat UI, with index.html as the SPA fallback
    let static_dir = Path::new(&config.server.static_dir);
    if static_dir.exists() {
        let index = static_dir.join("index.html");
        app = app.fallback_service(ServeDir::new(static_dir).fallback(ServeFile::new(index)));
    }

    app = app.layer(TraceLayer::new_for_http());

    // Upstream embedding calls already time out at 30s; this bounds the
    // whole request
    app = app.layer(
        ServiceBuilder::new()
            .layer(HandleErrorLayer::new(|_: BoxError| async {
                StatusCode::REQUEST_TIMEOUT
            }))
            .layer(TimeoutLayer::new(Duration::from_secs(35))),
    );

    if config.server.enable_cors {
        info!("CORS enabled");
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
        app = app.layer(cors);
    }

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("API server listening on http://{}", addr);
    info!("Available endpoints:");
    info!("  GET  /api/health - Health check");
    info!("  POST /api/ask    - Answer a question");
    if static_dir.exists() {
        info!("  GET  /           - Chat frontend");
    }

    axum::serve(listener, app).await?;

    Ok(())
}
