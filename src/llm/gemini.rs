//! Google Gemini `generateContent` client.
//!
//! The system instruction travels in its own field and prior turns are sent
//! as `contents` with Gemini's `user` / `model` roles. Pure parsing in
//! `parse_response` for testability.

use serde::{Deserialize, Serialize};

use super::config::LlmTimeouts;
use super::http::{build_client, post_json};
use super::types::{ChatResponse, ContentBlock, LlmError, Message, MessageRole};

pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(api_key: String, base_url: String, timeouts: LlmTimeouts) -> Result<Self, LlmError> {
        Ok(Self { http: build_client(timeouts)?, api_key, base_url })
    }

    pub async fn chat(
        &self,
        model: &str,
        max_tokens: u32,
        temperature: f32,
        system: &str,
        messages: &[Message],
    ) -> Result<ChatResponse, LlmError> {
        let body = build_request(max_tokens, temperature, system, messages);
        let url = format!("{}/models/{model}:generateContent", self.base_url);

        let request = self
            .http
            .post(url)
            .header("x-goog-api-key", &self.api_key);
        parse_response(&post_json(request, &body).await?, model)
    }
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<InstructionContent<'a>>,
    contents: Vec<RequestContent<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct InstructionContent<'a> {
    parts: [TextPart<'a>; 1],
}

#[derive(Serialize)]
struct RequestContent<'a> {
    role: &'static str,
    parts: [TextPart<'a>; 1],
}

#[derive(Serialize)]
struct TextPart<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
}

fn gemini_role(role: MessageRole) -> &'static str {
    match role {
        MessageRole::User => "user",
        MessageRole::Assistant => "model",
    }
}

fn build_request<'a>(
    max_tokens: u32,
    temperature: f32,
    system: &'a str,
    messages: &'a [Message],
) -> GenerateRequest<'a> {
    let system_instruction =
        (!system.trim().is_empty()).then(|| InstructionContent { parts: [TextPart { text: system }] });
    let contents = messages
        .iter()
        .map(|m| RequestContent { role: gemini_role(m.role), parts: [TextPart { text: &m.content }] })
        .collect();
    GenerateRequest {
        system_instruction,
        contents,
        generation_config: GenerationConfig { temperature, max_output_tokens: max_tokens },
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    usage_metadata: Option<UsageMetadata>,
    #[serde(default)]
    model_version: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    thought: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    #[serde(default)]
    prompt_token_count: u64,
    #[serde(default)]
    candidates_token_count: u64,
}

// =============================================================================
// PARSING
// =============================================================================

/// A response without candidates (blocked prompt) parses to empty content.
fn parse_response(json: &str, requested_model: &str) -> Result<ChatResponse, LlmError> {
    let api: GenerateResponse = serde_json::from_str(json).map_err(|e| LlmError::ApiParse(e.to_string()))?;

    let first = api.candidates.into_iter().next();
    let finish_reason = first
        .as_ref()
        .and_then(|c| c.finish_reason.clone())
        .unwrap_or_else(|| "STOP".into());

    let content: Vec<ContentBlock> = first
        .and_then(|c| c.content)
        .map(|c| c.parts)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|part| match part {
            ResponsePart { text: Some(text), thought: false } if !text.is_empty() => Some(ContentBlock::Text { text }),
            ResponsePart { text: Some(thinking), thought: true } => Some(ContentBlock::Thinking { thinking }),
            _ => None,
        })
        .collect();

    let stop_reason = match finish_reason.as_str() {
        "MAX_TOKENS" => "max_tokens",
        "SAFETY" | "RECITATION" | "BLOCKLIST" | "PROHIBITED_CONTENT" => "refusal",
        _ => "end_turn",
    };
    let usage = api.usage_metadata;

    Ok(ChatResponse {
        content,
        model: api.model_version.unwrap_or_else(|| requested_model.to_string()),
        stop_reason: stop_reason.to_string(),
        input_tokens: usage.as_ref().map_or(0, |u| u.prompt_token_count),
        output_tokens: usage.as_ref().map_or(0, |u| u.candidates_token_count),
    })
}

#[cfg(test)]
#[path = "gemini_test.rs"]
mod tests;
