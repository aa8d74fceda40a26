use std::time::Instant;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    response::{IntoResponse, Response},
};
use qllama_core::StagedAttachments;
use qllama_core::models::{ChatRequest, ChatResponse};
use qllama_core::turns::latest_user_turn;

use super::error::ApiError;
use super::state::AppState;
use super::stream::ndjson_response;

// POST /api/chat
pub async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(req) = payload?;

    // Validated before anything is spawned, in both modes.
    let turn = latest_user_turn(&req.messages)?;

    if req.stream {
        let invocation = state.invoker.spawn_streamed(&turn.content).await?;
        return Ok(ndjson_response(
            invocation,
            state.model.clone(),
            ChatResponse::partial,
            ChatResponse::terminal,
        ));
    }

    let start = Instant::now();
    let staged = StagedAttachments::stage(&turn.images);
    let output = state
        .invoker
        .run_buffered(&turn.content, staged.paths())
        .await?;

    let response = ChatResponse::completed(&state.model, output, start.elapsed());
    Ok(Json(response).into_response())
}
