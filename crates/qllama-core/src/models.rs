//! Ollama wire-protocol types and response assembly.
//!
//! Request types accept the full Ollama field set so existing clients work
//! unchanged; fields with no CLI counterpart (options, format, tools, ...)
//! are carried but never forwarded.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// POST /api/generate request body
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateRequest {
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub prompt: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub options: Option<Value>,
    #[serde(default)]
    pub system: Option<String>,
    #[serde(default)]
    pub template: Option<String>,
    #[serde(default)]
    pub context: Option<Vec<i64>>,
    #[serde(default)]
    pub stream: bool,
    #[serde(default)]
    pub raw: bool,
}

/// POST /api/chat request body
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub options: Option<Value>,
    #[serde(default)]
    pub stream: bool,
    #[serde(default)]
    pub tools: Option<Vec<Tool>>,
}

/// One conversation turn. Roles follow the protocol: system, user,
/// assistant, tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<ToolCall>>,
}

impl ChatMessage {
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant".to_string(),
            content: content.into(),
            images: Vec::new(),
            tool_calls: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tool {
    #[serde(rename = "type")]
    pub kind: String,
    pub function: ToolFunction,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolFunction {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub parameters: Option<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCall {
    pub function: FunctionCall,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionCall {
    pub name: String,
    #[serde(default)]
    pub arguments: Value,
}

/// Whitespace-word count used as the `eval_count` stand-in. This is an
/// approximation of token count, not a tokenizer.
pub fn approx_eval_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// POST /api/generate response envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub model: String,
    pub response: String,
    pub done: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<Vec<i64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_duration: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub load_duration: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt_eval_count: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt_eval_duration: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eval_count: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eval_duration: Option<i64>,
    pub created_at: DateTime<Utc>,
}

impl GenerateResponse {
    /// Final envelope of a buffered invocation. `total_duration` and
    /// `eval_duration` carry the same wall-clock measurement; no separate
    /// load or prompt-eval phase is tracked.
    pub fn completed(model: &str, response: String, elapsed: std::time::Duration) -> Self {
        let nanos = elapsed.as_nanos() as i64;
        Self {
            eval_count: Some(approx_eval_count(&response)),
            total_duration: Some(nanos),
            eval_duration: Some(nanos),
            ..Self::frame(model, response, true)
        }
    }

    /// One streamed line, no metrics.
    pub fn partial(model: &str, line: String) -> Self {
        Self::frame(model, line, false)
    }

    /// Terminal frame of a streamed run: empty payload, `done` set.
    pub fn terminal(model: &str) -> Self {
        Self::frame(model, String::new(), true)
    }

    fn frame(model: &str, response: String, done: bool) -> Self {
        Self {
            model: model.to_string(),
            response,
            done,
            context: None,
            total_duration: None,
            load_duration: None,
            prompt_eval_count: None,
            prompt_eval_duration: None,
            eval_count: None,
            eval_duration: None,
            created_at: Utc::now(),
        }
    }
}

/// POST /api/chat response envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub model: String,
    pub message: ChatMessage,
    pub done: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_duration: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub load_duration: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt_eval_count: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt_eval_duration: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eval_count: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eval_duration: Option<i64>,
    pub created_at: DateTime<Utc>,
}

impl ChatResponse {
    pub fn completed(model: &str, content: String, elapsed: std::time::Duration) -> Self {
        let nanos = elapsed.as_nanos() as i64;
        Self {
            eval_count: Some(approx_eval_count(&content)),
            total_duration: Some(nanos),
            eval_duration: Some(nanos),
            ..Self::frame(model, content, true)
        }
    }

    pub fn partial(model: &str, line: String) -> Self {
        Self::frame(model, line, false)
    }

    pub fn terminal(model: &str) -> Self {
        Self::frame(model, String::new(), true)
    }

    fn frame(model: &str, content: String, done: bool) -> Self {
        Self {
            model: model.to_string(),
            message: ChatMessage::assistant(content),
            done,
            total_duration: None,
            load_duration: None,
            prompt_eval_count: None,
            prompt_eval_duration: None,
            eval_count: None,
            eval_duration: None,
            created_at: Utc::now(),
        }
    }
}

/// GET /api/tags response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagsResponse {
    pub models: Vec<ModelInfo>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelInfo {
    pub name: String,
    pub model: String,
    pub modified_at: DateTime<Utc>,
    pub size: i64,
    pub digest: String,
    pub details: ModelDetails,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_vram: Option<i64>,
}

impl ModelInfo {
    /// Listing entry for the single virtual model. Size is zero: the backend
    /// is a remote service, not weights on disk.
    pub fn virtual_model(model: &str) -> Self {
        Self {
            name: format!("{model}:latest"),
            model: model.to_string(),
            modified_at: Utc::now(),
            size: 0,
            digest: format!("sha256:{model}-service"),
            details: ModelDetails::service(model),
            expires_at: None,
            size_vram: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_model: Option<String>,
    pub format: String,
    pub family: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub families: Option<Vec<String>>,
    pub parameter_size: String,
    pub quantization_level: String,
}

impl ModelDetails {
    pub fn service(model: &str) -> Self {
        Self {
            parent_model: None,
            format: format!("{model}-service"),
            family: model.to_string(),
            families: None,
            parameter_size: "unknown".to_string(),
            quantization_level: "unknown".to_string(),
        }
    }
}

/// Entry in /api/ps and /api/status
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunningModel {
    pub name: String,
    pub model: String,
    pub size: i64,
    pub digest: String,
    pub details: ModelDetails,
    pub expires_at: DateTime<Utc>,
    pub size_vram: i64,
}

impl RunningModel {
    pub fn virtual_model(model: &str) -> Self {
        Self {
            name: format!("{model}:latest"),
            model: model.to_string(),
            size: 0,
            digest: format!("sha256:{model}-service"),
            details: ModelDetails::service(model),
            expires_at: Utc::now() + Duration::hours(24),
            size_vram: 0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PsResponse {
    pub models: Vec<RunningModel>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub models: Option<Vec<RunningModel>>,
}

/// POST /api/show request
#[derive(Debug, Clone, Deserialize)]
pub struct ShowRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShowResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modelfile: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    pub details: ModelDetails,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub messages: Option<Vec<ChatMessage>>,
}

impl ShowResponse {
    pub fn service(model: &str) -> Self {
        Self {
            license: None,
            modelfile: Some(format!("# {model} service model\nFROM {model}-service")),
            parameters: None,
            template: Some("{{ .Prompt }}".to_string()),
            system: None,
            details: ModelDetails::service(model),
            messages: None,
        }
    }
}

// Management request bodies. Parsed for protocol compatibility before the
// not-supported response is returned.

#[derive(Debug, Clone, Deserialize)]
pub struct CreateRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub modelfile: Option<String>,
    #[serde(default)]
    pub stream: bool,
    #[serde(default)]
    pub path: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PullRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub insecure: bool,
    #[serde(default)]
    pub stream: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PushRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub insecure: bool,
    #[serde(default)]
    pub stream: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CopyRequest {
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub destination: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DeleteRequest {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmbeddingsRequest {
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub prompt: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eval_count_splits_on_whitespace() {
        assert_eq!(approx_eval_count("Hi there"), 2);
        assert_eq!(approx_eval_count("  spaced   out\ttabs\nand lines "), 5);
        assert_eq!(approx_eval_count(""), 0);
    }

    #[test]
    fn completed_generate_sets_metrics() {
        let elapsed = std::time::Duration::from_millis(5);
        let resp = GenerateResponse::completed("amazon-q", "Hi there".to_string(), elapsed);
        assert!(resp.done);
        assert_eq!(resp.eval_count, Some(2));
        assert_eq!(resp.total_duration, resp.eval_duration);
        assert_eq!(resp.total_duration, Some(elapsed.as_nanos() as i64));
    }

    #[test]
    fn partial_frames_omit_metrics() {
        let resp = GenerateResponse::partial("amazon-q", "line1".to_string());
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["done"], false);
        assert_eq!(json["response"], "line1");
        assert!(json.get("eval_count").is_none());
        assert!(json.get("total_duration").is_none());
    }

    #[test]
    fn terminal_frame_is_done_and_empty() {
        let resp = ChatResponse::terminal("amazon-q");
        assert!(resp.done);
        assert_eq!(resp.message.role, "assistant");
        assert_eq!(resp.message.content, "");
        assert_eq!(resp.eval_count, None);
    }

    #[test]
    fn chat_request_accepts_minimal_body() {
        let req: ChatRequest = serde_json::from_str(
            r#"{"model":"amazon-q","messages":[{"role":"user","content":"hello"}]}"#,
        )
        .unwrap();
        assert!(!req.stream);
        assert_eq!(req.messages.len(), 1);
        assert!(req.messages[0].images.is_empty());
    }
}
