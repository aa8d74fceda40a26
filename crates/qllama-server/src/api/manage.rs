//! Model-management endpoints kept for protocol compatibility. The backend is
//! a remote service behind a CLI, so none of these can be supported; bodies
//! are still parsed so malformed requests fail the same way as elsewhere.

use axum::{
    Json,
    extract::{Path, rejection::JsonRejection},
};
use qllama_core::models::{
    CopyRequest, CreateRequest, DeleteRequest, EmbeddingsRequest, PullRequest, PushRequest,
};

use super::error::ApiError;

fn unsupported<T>(payload: Result<Json<T>, JsonRejection>, message: &str) -> ApiError {
    match payload {
        Ok(_) => ApiError::not_implemented(message),
        Err(rejection) => ApiError::from(rejection),
    }
}

// POST /api/create
pub async fn create(payload: Result<Json<CreateRequest>, JsonRejection>) -> ApiError {
    unsupported(payload, "Model creation not supported for Amazon Q service")
}

// POST /api/pull
pub async fn pull(payload: Result<Json<PullRequest>, JsonRejection>) -> ApiError {
    unsupported(payload, "Model pulling not supported for Amazon Q service")
}

// POST /api/push
pub async fn push(payload: Result<Json<PushRequest>, JsonRejection>) -> ApiError {
    unsupported(payload, "Model pushing not supported for Amazon Q service")
}

// DELETE /api/delete
pub async fn delete(payload: Result<Json<DeleteRequest>, JsonRejection>) -> ApiError {
    unsupported(payload, "Model deletion not supported for Amazon Q service")
}

// POST /api/copy
pub async fn copy(payload: Result<Json<CopyRequest>, JsonRejection>) -> ApiError {
    unsupported(payload, "Model copying not supported for Amazon Q service")
}

// POST /api/embeddings and /api/embed
pub async fn embeddings(payload: Result<Json<EmbeddingsRequest>, JsonRejection>) -> ApiError {
    unsupported(payload, "Embeddings not supported for Amazon Q service")
}

// GET /api/blobs/{digest}; axum also routes HEAD here, minus the body.
pub async fn blobs_get(Path(_digest): Path<String>) -> ApiError {
    ApiError::not_found("Blob storage not supported for Amazon Q service")
}

// POST /api/blobs/{digest}
pub async fn blobs_post(Path(_digest): Path<String>) -> ApiError {
    ApiError::not_implemented("Blob upload not supported for Amazon Q service")
}
