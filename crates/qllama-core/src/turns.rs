//! Extraction of the turn that actually drives an invocation.

use crate::error::{CoreError, Result};
use crate::models::ChatMessage;

/// Find the most recent user-authored turn in a conversation.
///
/// Scans backward so that multi-turn histories resolve to the latest user
/// message; its content becomes the prompt and its images the attachments.
/// A conversation with no user turn (or only empty-content user turns) is a
/// request-validation failure raised before any process is spawned.
pub fn latest_user_turn(messages: &[ChatMessage]) -> Result<&ChatMessage> {
    messages
        .iter()
        .rev()
        .find(|message| message.role == "user" && !message.content.is_empty())
        .ok_or_else(|| CoreError::Validation("no user message found".to_string()))
}
