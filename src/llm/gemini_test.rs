use super::*;

#[test]
fn parse_text_response() {
    let json = serde_json::json!({
        "candidates": [{
            "content": { "role": "model", "parts": [{ "text": "**Python** and **React**" }] },
            "finishReason": "STOP"
        }],
        "usageMetadata": { "promptTokenCount": 120, "candidatesTokenCount": 9, "totalTokenCount": 129 },
        "modelVersion": "gemini-3-flash-preview"
    })
    .to_string();
    let resp = parse_response(&json, "fallback-model").unwrap();
    assert_eq!(resp.text().as_deref(), Some("**Python** and **React**"));
    assert_eq!(resp.model, "gemini-3-flash-preview");
    assert_eq!(resp.stop_reason, "end_turn");
    assert_eq!(resp.input_tokens, 120);
    assert_eq!(resp.output_tokens, 9);
}

#[test]
fn parse_thought_parts_hidden_from_text() {
    let json = serde_json::json!({
        "candidates": [{
            "content": { "parts": [
                { "text": "planning the answer", "thought": true },
                { "text": "Final answer" }
            ] }
        }]
    })
    .to_string();
    let resp = parse_response(&json, "m").unwrap();
    assert_eq!(resp.content.len(), 2);
    assert_eq!(resp.text().as_deref(), Some("Final answer"));
}

#[test]
fn parse_blocked_prompt_is_empty_not_error() {
    let json = serde_json::json!({
        "promptFeedback": { "blockReason": "SAFETY" }
    })
    .to_string();
    let resp = parse_response(&json, "gemini-x").unwrap();
    assert!(resp.text().is_none());
    assert_eq!(resp.model, "gemini-x");
    assert_eq!(resp.input_tokens, 0);
}

#[test]
fn parse_finish_reasons() {
    let make = |reason: &str| {
        serde_json::json!({
            "candidates": [{ "content": { "parts": [{ "text": "x" }] }, "finishReason": reason }]
        })
        .to_string()
    };
    assert_eq!(parse_response(&make("MAX_TOKENS"), "m").unwrap().stop_reason, "max_tokens");
    assert_eq!(parse_response(&make("SAFETY"), "m").unwrap().stop_reason, "refusal");
    assert_eq!(parse_response(&make("STOP"), "m").unwrap().stop_reason, "end_turn");
}

#[test]
fn parse_invalid_json() {
    let err = parse_response("<html>", "m").unwrap_err();
    assert!(matches!(err, LlmError::ApiParse(_)));
}

#[test]
fn request_maps_roles_and_config() {
    let history = [Message::user("hi"), Message::assistant("hello"), Message::user("projects?")];
    let req = build_request(256, 0.25, "You are a portfolio assistant.", &history);
    let json = serde_json::to_value(&req).unwrap();
    assert_eq!(json["systemInstruction"]["parts"][0]["text"], "You are a portfolio assistant.");
    assert_eq!(json["contents"][0]["role"], "user");
    assert_eq!(json["contents"][1]["role"], "model");
    assert_eq!(json["contents"][2]["parts"][0]["text"], "projects?");
    assert_eq!(json["generationConfig"]["temperature"], 0.25);
    assert_eq!(json["generationConfig"]["maxOutputTokens"], 256);
}

#[test]
fn request_omits_blank_system_instruction() {
    let history = [Message::user("hi")];
    let json = serde_json::to_value(build_request(16, 0.5, "", &history)).unwrap();
    assert!(json.get("systemInstruction").is_none());
}
