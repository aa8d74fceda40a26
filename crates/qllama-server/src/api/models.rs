//! Model-identity endpoints. The server always answers as one fixed virtual
//! model; there is no lookup table behind these.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use qllama_core::models::{
    ModelInfo, PsResponse, RunningModel, ShowRequest, ShowResponse, StatusResponse, TagsResponse,
};
use serde_json::{Value, json};

use super::error::ApiError;
use super::state::AppState;

// GET /api/tags (also served as /api/list)
pub async fn tags(State(state): State<AppState>) -> Json<TagsResponse> {
    Json(TagsResponse {
        models: vec![ModelInfo::virtual_model(&state.model)],
    })
}

// POST /api/show
pub async fn show(
    State(state): State<AppState>,
    payload: Result<Json<ShowRequest>, JsonRejection>,
) -> Result<Json<ShowResponse>, ApiError> {
    let Json(_req) = payload?;
    Ok(Json(ShowResponse::service(&state.model)))
}

// GET /api/ps
pub async fn ps(State(state): State<AppState>) -> Json<PsResponse> {
    Json(PsResponse {
        models: vec![RunningModel::virtual_model(&state.model)],
    })
}

// GET /api/status
pub async fn status(State(state): State<AppState>) -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "running".to_string(),
        models: Some(vec![RunningModel::virtual_model(&state.model)]),
    })
}

// GET /api/version
pub async fn version() -> Json<Value> {
    Json(json!({
        "version": concat!("qllama-", env!("CARGO_PKG_VERSION")),
    }))
}
