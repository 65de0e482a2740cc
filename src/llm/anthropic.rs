//! Anthropic Messages API client.
//!
//! Posts the system instruction and the threaded history to `/v1/messages`.
//! Thinking and unknown blocks are dropped while parsing.

use serde::{Deserialize, Serialize};

use super::config::LlmTimeouts;
use super::http::{build_client, post_json};
use super::types::{ChatResponse, ContentBlock, LlmError, Message};

const MESSAGES_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";

// =============================================================================
// CLIENT
// =============================================================================

pub struct AnthropicClient {
    http: reqwest::Client,
    api_key: String,
}

impl AnthropicClient {
    pub fn new(api_key: String, timeouts: LlmTimeouts) -> Result<Self, LlmError> {
        Ok(Self { http: build_client(timeouts)?, api_key })
    }

    pub async fn chat(
        &self,
        model: &str,
        max_tokens: u32,
        temperature: f32,
        system: &str,
        messages: &[Message],
    ) -> Result<ChatResponse, LlmError> {
        let body = MessagesRequest { model, max_tokens, temperature, system, messages };
        let request = self
            .http
            .post(MESSAGES_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION);
        parse_response(&post_json(request, &body).await?)
    }
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    system: &'a str,
    messages: &'a [Message],
}

#[derive(Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
    model: String,
    #[serde(default)]
    stop_reason: Option<String>,
    #[serde(default)]
    usage: MessagesUsage,
}

#[derive(Deserialize, Default)]
struct MessagesUsage {
    #[serde(default)]
    input_tokens: u64,
    #[serde(default)]
    output_tokens: u64,
}

// =============================================================================
// PARSING
// =============================================================================

fn parse_response(json: &str) -> Result<ChatResponse, LlmError> {
    let parsed: MessagesResponse = serde_json::from_str(json).map_err(|e| LlmError::ApiParse(e.to_string()))?;
    // Only text reaches the transcript.
    let mut content = parsed.content;
    content.retain(|block| matches!(block, ContentBlock::Text { .. }));

    Ok(ChatResponse {
        content,
        model: parsed.model,
        stop_reason: parsed
            .stop_reason
            .unwrap_or_else(|| "end_turn".into()),
        input_tokens: parsed.usage.input_tokens,
        output_tokens: parsed.usage.output_tokens,
    })
}

#[cfg(test)]
#[path = "anthropic_test.rs"]
mod tests;
