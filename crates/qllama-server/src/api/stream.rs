//! NDJSON streaming: bridges a live CLI invocation into a chunked
//! `application/x-ndjson` response body.

use std::convert::Infallible;

use axum::{
    body::{Body, Bytes},
    http::header,
    response::{IntoResponse, Response},
};
use qllama_core::StreamedInvocation;
use serde::Serialize;
use serde_json::json;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tracing::{debug, warn};

const NDJSON: &str = "application/x-ndjson";

/// Stream one invocation as NDJSON frames.
///
/// Each non-blank stdout line becomes one `partial` frame, in process output
/// order. After the feed is exhausted the process is waited on: a clean exit
/// emits exactly one `terminal` frame as the last line, a failed exit emits a
/// final `{"error": ...}` line in its place.
pub(crate) fn ndjson_response<F, G, R>(
    invocation: StreamedInvocation,
    model: String,
    partial: F,
    terminal: G,
) -> Response
where
    F: Fn(&str, String) -> R + Send + 'static,
    G: Fn(&str) -> R + Send + 'static,
    R: Serialize + Send + Sync + 'static,
{
    let (tx, rx) = mpsc::channel::<Result<Bytes, Infallible>>(16);

    tokio::spawn(pump_frames(invocation, model, partial, terminal, tx));

    (
        [(header::CONTENT_TYPE, NDJSON)],
        Body::from_stream(ReceiverStream::new(rx)),
    )
        .into_response()
}

async fn pump_frames<F, G, R>(
    mut invocation: StreamedInvocation,
    model: String,
    partial: F,
    terminal: G,
    tx: mpsc::Sender<Result<Bytes, Infallible>>,
) where
    F: Fn(&str, String) -> R,
    G: Fn(&str) -> R,
    R: Serialize + Send,
{
    let bin = invocation.bin().to_string();
    let mut receiver_gone = false;

    loop {
        match invocation.next_line().await {
            Ok(Some(line)) => {
                if line.is_empty() || receiver_gone {
                    continue;
                }
                if send_frame(&tx, &partial(&model, line)).await.is_err() {
                    // Client went away; keep draining so the child is reaped.
                    receiver_gone = true;
                }
            }
            Ok(None) => break,
            Err(e) => {
                warn!(bin = %bin, error = %e, "Error reading CLI stdout");
                break;
            }
        }
    }

    match invocation.wait().await {
        Ok(status) if status.success() => {
            debug!(bin = %bin, "Streamed CLI invocation completed");
            let _ = send_frame(&tx, &terminal(&model)).await;
        }
        Ok(status) => {
            let code = status.code().unwrap_or(-1);
            warn!(bin = %bin, code, "Streamed CLI invocation failed");
            let frame = json!({ "error": format!("'{bin}' exited with code {code}") });
            let _ = send_frame(&tx, &frame).await;
        }
        Err(e) => {
            warn!(bin = %bin, error = %e, "Failed to wait on CLI process");
            let frame = json!({ "error": e.to_string() });
            let _ = send_frame(&tx, &frame).await;
        }
    }
}

async fn send_frame<R: Serialize>(
    tx: &mpsc::Sender<Result<Bytes, Infallible>>,
    frame: &R,
) -> Result<(), ()> {
    let mut line = match serde_json::to_string(frame) {
        Ok(line) => line,
        Err(_) => return Ok(()),
    };
    line.push('\n');
    tx.send(Ok(Bytes::from(line))).await.map_err(|_| ())
}
