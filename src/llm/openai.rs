//! OpenAI-compatible API client.
//!
//! Supports both `/v1/chat/completions` and `/v1/responses` endpoints.
//! Conversations are plain text, so both request shapes reduce to a list
//! of role + text messages.

use serde::Serialize;
use serde_json::Value;

use super::config::{LlmTimeouts, OpenAiApiMode};
use super::http::{build_client, post_json};
use super::types::{ChatResponse, ContentBlock, LlmError, Message, MessageRole};

pub struct OpenAiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    mode: OpenAiApiMode,
}

impl OpenAiClient {
    pub fn new(api_key: String, mode: OpenAiApiMode, base_url: String, timeouts: LlmTimeouts) -> Result<Self, LlmError> {
        Ok(Self { http: build_client(timeouts)?, api_key, base_url, mode })
    }

    pub async fn chat(
        &self,
        model: &str,
        max_tokens: u32,
        temperature: f32,
        system: &str,
        messages: &[Message],
    ) -> Result<ChatResponse, LlmError> {
        match self.mode {
            OpenAiApiMode::ChatCompletions => {
                let msgs = build_chat_completions_messages(system, messages);
                let body = CcRequest { model, max_tokens, temperature, messages: &msgs };
                let text = self.send_json("/chat/completions", &body).await?;
                parse_chat_completions_response(&text)
            }
            OpenAiApiMode::Responses => {
                let input = build_responses_input(messages);
                let body = RespRequest {
                    model,
                    max_output_tokens: max_tokens,
                    temperature,
                    instructions: system,
                    input: &input,
                };
                let text = self.send_json("/responses", &body).await?;
                parse_responses_response(&text)
            }
        }
    }

    async fn send_json(&self, path: &str, body: &impl Serialize) -> Result<String, LlmError> {
        let request = self
            .http
            .post(format!("{}{path}", self.base_url))
            .bearer_auth(&self.api_key);
        post_json(request, body).await
    }
}

// =============================================================================
// CHAT COMPLETIONS WIRE TYPES
// =============================================================================

#[derive(Serialize)]
struct CcRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    messages: &'a [CcMessage<'a>],
}

#[derive(Debug, Serialize)]
struct CcMessage<'a> {
    role: &'static str,
    content: &'a str,
}

fn build_chat_completions_messages<'a>(system: &'a str, messages: &'a [Message]) -> Vec<CcMessage<'a>> {
    let mut out = Vec::with_capacity(messages.len() + 1);
    if !system.trim().is_empty() {
        out.push(CcMessage { role: "system", content: system });
    }
    out.extend(
        messages
            .iter()
            .map(|m| CcMessage { role: m.role.as_str(), content: &m.content }),
    );
    out
}

// =============================================================================
// RESPONSES WIRE TYPES
// =============================================================================

#[derive(Serialize)]
struct RespRequest<'a> {
    model: &'a str,
    max_output_tokens: u32,
    temperature: f32,
    instructions: &'a str,
    input: &'a [RespInputItem<'a>],
}

#[derive(Debug, Serialize)]
struct RespInputItem<'a> {
    #[serde(rename = "type")]
    item_type: &'static str,
    role: &'static str,
    content: [RespTextContent<'a>; 1],
}

#[derive(Debug, Serialize)]
struct RespTextContent<'a> {
    #[serde(rename = "type")]
    content_type: &'static str,
    text: &'a str,
}

fn build_responses_input(messages: &[Message]) -> Vec<RespInputItem<'_>> {
    messages
        .iter()
        .map(|m| {
            // Assistant history is replayed as output text, user turns as input text.
            let content_type = match m.role {
                MessageRole::User => "input_text",
                MessageRole::Assistant => "output_text",
            };
            RespInputItem {
                item_type: "message",
                role: m.role.as_str(),
                content: [RespTextContent { content_type, text: &m.content }],
            }
        })
        .collect()
}

// =============================================================================
// RESPONSE PARSING
// =============================================================================

fn usage_field(root: &Value, key: &str) -> u64 {
    root.get("usage")
        .and_then(|u| u.get(key))
        .and_then(Value::as_u64)
        .unwrap_or(0)
}

fn model_field(root: &Value) -> String {
    root.get("model")
        .and_then(Value::as_str)
        .map(str::to_owned)
        .unwrap_or_default()
}

pub(crate) fn parse_chat_completions_response(json_text: &str) -> Result<ChatResponse, LlmError> {
    let root: Value = serde_json::from_str(json_text).map_err(|e| LlmError::ApiParse(e.to_string()))?;

    let Some(choice) = root
        .get("choices")
        .and_then(Value::as_array)
        .and_then(|arr| arr.first())
    else {
        return Err(LlmError::ApiParse("chat_completions: missing choices[0]".to_string()));
    };
    let finish_reason = choice
        .get("finish_reason")
        .and_then(Value::as_str)
        .unwrap_or("stop");

    let mut content = Vec::new();
    if let Some(text) = choice
        .get("message")
        .and_then(|m| m.get("content"))
        .and_then(Value::as_str)
    {
        if !text.is_empty() {
            content.push(ContentBlock::Text { text: text.to_string() });
        }
    }

    let stop_reason = if finish_reason == "length" { "max_tokens" } else { "end_turn" };

    Ok(ChatResponse {
        content,
        model: model_field(&root),
        stop_reason: stop_reason.to_string(),
        input_tokens: usage_field(&root, "prompt_tokens"),
        output_tokens: usage_field(&root, "completion_tokens"),
    })
}

pub(crate) fn parse_responses_response(json_text: &str) -> Result<ChatResponse, LlmError> {
    let root: Value = serde_json::from_str(json_text).map_err(|e| LlmError::ApiParse(e.to_string()))?;

    let mut content = Vec::new();
    if let Some(items) = root.get("output").and_then(Value::as_array) {
        for item in items {
            if item.get("type").and_then(Value::as_str) != Some("message") {
                continue;
            }
            let Some(parts) = item.get("content").and_then(Value::as_array) else {
                continue;
            };
            for part in parts {
                let kind = part.get("type").and_then(Value::as_str);
                let text = part.get("text").and_then(Value::as_str).unwrap_or("");
                if matches!(kind, Some("output_text" | "text")) && !text.is_empty() {
                    content.push(ContentBlock::Text { text: text.to_string() });
                }
            }
        }
    } else if let Some(output_text) = root.get("output_text").and_then(Value::as_str) {
        if !output_text.is_empty() {
            content.push(ContentBlock::Text { text: output_text.to_string() });
        }
    }

    let truncated = root
        .get("incomplete_details")
        .and_then(|d| d.get("reason"))
        .and_then(Value::as_str)
        == Some("max_output_tokens");

    Ok(ChatResponse {
        content,
        model: model_field(&root),
        stop_reason: if truncated { "max_tokens" } else { "end_turn" }.to_string(),
        input_tokens: usage_field(&root, "input_tokens"),
        output_tokens: usage_field(&root, "output_tokens"),
    })
}

#[cfg(test)]
#[path = "openai_test.rs"]
mod tests;
