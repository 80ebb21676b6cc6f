//! Axum router configuration with middleware.
//!
//! Routes: `POST /brainstorm` (password-gated) and `GET /health` (open).
//! Middleware: CORS, tracing.
//!
//! When the web client directory exists (`BRAINSTORM_WEB_DIR`, default
//! `web/`), it is served for every other path with `index.html` as the
//! fallback. Otherwise only the API is served.

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Default location of the web client.
pub const DEFAULT_WEB_DIR: &str = "web";

/// Build the complete router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let web_dir = std::env::var("BRAINSTORM_WEB_DIR").unwrap_or_else(|_| DEFAULT_WEB_DIR.to_string());
    build_router_with_web_dir(state, &web_dir)
}

pub fn build_router_with_web_dir(state: AppState, web_dir: &str) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut router = Router::new()
        .route("/brainstorm", post(handlers::brainstorm::brainstorm))
        .route("/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    if std::path::Path::new(web_dir).is_dir() {
        let index_path = format!("{web_dir}/index.html");
        let serve_dir = ServeDir::new(web_dir).fallback(ServeFile::new(index_path));
        router = router.fallback_service(serve_dir);
        tracing::info!(path = %web_dir, "web client static file serving enabled");
    }

    router
}

/// GET /health - liveness probe (no auth required).
pub async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({ "status": "healthy" }))
}
