use std::time::Instant;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    response::{IntoResponse, Response},
};
use qllama_core::StagedAttachments;
use qllama_core::models::{GenerateRequest, GenerateResponse};

use super::error::ApiError;
use super::state::AppState;
use super::stream::ndjson_response;

// POST /api/generate
pub async fn generate(
    State(state): State<AppState>,
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(req) = payload?;

    if req.stream {
        let invocation = state.invoker.spawn_streamed(&req.prompt).await?;
        return Ok(ndjson_response(
            invocation,
            state.model.clone(),
            GenerateResponse::partial,
            GenerateResponse::terminal,
        ));
    }

    let start = Instant::now();
    let staged = StagedAttachments::stage(&req.images);
    let output = state.invoker.run_buffered(&req.prompt, staged.paths()).await?;

    let response = GenerateResponse::completed(&state.model, output, start.elapsed());
    Ok(Json(response).into_response())
}
