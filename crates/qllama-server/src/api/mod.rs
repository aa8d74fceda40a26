pub mod chat;
pub mod error;
pub mod generate;
pub mod manage;
pub mod models;
pub mod state;
mod stream;
pub mod upload;

pub use error::ApiError;
pub use state::AppState;

use axum::{
    Json, Router,
    http::{Method, header},
    routing::{delete, get, post},
};
use serde_json::{Value, json};
use tower_http::cors::CorsLayer;

/// Build the full Ollama-compatible router.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
            Method::HEAD,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    Router::new()
        // Content-bearing endpoints
        .route("/api/generate", post(generate::generate))
        .route("/api/chat", post(chat::chat))
        // Model identity
        .route("/api/tags", get(models::tags))
        .route("/api/list", get(models::tags))
        .route("/api/show", post(models::show))
        .route("/api/ps", get(models::ps))
        .route("/api/status", get(models::status))
        .route("/api/version", get(models::version))
        // Model management (not supported, kept for compatibility)
        .route("/api/create", post(manage::create))
        .route("/api/pull", post(manage::pull))
        .route("/api/push", post(manage::push))
        .route("/api/delete", delete(manage::delete))
        .route("/api/copy", post(manage::copy))
        .route("/api/embeddings", post(manage::embeddings))
        .route("/api/embed", post(manage::embeddings))
        .route(
            "/api/blobs/{digest}",
            get(manage::blobs_get).post(manage::blobs_post),
        )
        // Utility endpoints
        .route("/upload", post(upload::upload))
        .route("/health", get(health))
        .route("/ping", get(ping))
        .route("/metrics", get(metrics))
        .route("/", get(index))
        .layer(cors)
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn ping() -> &'static str {
    "pong"
}

async fn metrics() -> &'static str {
    "# qllama metrics\nqllama_up 1\n"
}

async fn index() -> Json<Value> {
    Json(json!({
        "message": "qllama - Ollama-compatible API over the Amazon Q CLI",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": [
            "POST /api/generate",
            "POST /api/chat",
            "GET /api/tags",
            "GET /api/list",
            "POST /api/show",
            "POST /api/create",
            "POST /api/pull",
            "POST /api/push",
            "DELETE /api/delete",
            "POST /api/copy",
            "GET /api/ps",
            "GET /api/status",
            "POST /api/embeddings",
            "POST /api/embed",
            "GET /api/blobs/{digest}",
            "HEAD /api/blobs/{digest}",
            "POST /api/blobs/{digest}",
            "GET /api/version",
            "POST /upload",
            "GET /health",
            "GET /ping",
            "HEAD /",
            "GET /metrics",
        ],
    }))
}
