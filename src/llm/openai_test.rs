use super::*;

// ===== chat completions =====

#[test]
fn cc_parse_text_response() {
    let json = serde_json::json!({
        "model": "gpt-4o",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": "Hello!" },
            "finish_reason": "stop"
        }],
        "usage": { "prompt_tokens": 10, "completion_tokens": 5 }
    })
    .to_string();
    let resp = parse_chat_completions_response(&json).unwrap();
    assert_eq!(resp.content.len(), 1);
    assert!(matches!(&resp.content[0], ContentBlock::Text { text } if text == "Hello!"));
    assert_eq!(resp.stop_reason, "end_turn");
    assert_eq!(resp.input_tokens, 10);
    assert_eq!(resp.output_tokens, 5);
}

#[test]
fn cc_parse_null_content_is_empty() {
    let json = serde_json::json!({
        "model": "gpt-4o",
        "choices": [{ "message": { "role": "assistant", "content": null }, "finish_reason": "length" }]
    })
    .to_string();
    let resp = parse_chat_completions_response(&json).unwrap();
    assert!(resp.text().is_none());
    assert_eq!(resp.stop_reason, "max_tokens");
}

#[test]
fn cc_parse_missing_choices() {
    let json = serde_json::json!({ "model": "gpt-4o", "choices": [] }).to_string();
    assert!(parse_chat_completions_response(&json).is_err());
}

#[test]
fn cc_messages_lead_with_system() {
    let history = [Message::user("hi"), Message::assistant("hello"), Message::user("skills?")];
    let msgs = build_chat_completions_messages("be concise", &history);
    assert_eq!(msgs.len(), 4);
    assert_eq!(msgs[0].role, "system");
    assert_eq!(msgs[0].content, "be concise");
    assert_eq!(msgs[2].role, "assistant");
    assert_eq!(msgs[3].content, "skills?");
}

#[test]
fn cc_messages_skip_blank_system() {
    let history = [Message::user("hi")];
    let msgs = build_chat_completions_messages("  ", &history);
    assert_eq!(msgs.len(), 1);
    assert_eq!(msgs[0].role, "user");
}

// ===== responses API =====

#[test]
fn resp_parse_text_response() {
    let json = serde_json::json!({
        "model": "gpt-4o",
        "output": [{
            "type": "message",
            "content": [{ "type": "output_text", "text": "Done!" }]
        }],
        "usage": { "input_tokens": 15, "output_tokens": 8 }
    })
    .to_string();
    let resp = parse_responses_response(&json).unwrap();
    assert_eq!(resp.content.len(), 1);
    assert!(matches!(&resp.content[0], ContentBlock::Text { text } if text == "Done!"));
    assert_eq!(resp.stop_reason, "end_turn");
    assert_eq!(resp.input_tokens, 15);
}

#[test]
fn resp_parse_skips_reasoning_items() {
    let json = serde_json::json!({
        "model": "gpt-4o",
        "output": [
            { "type": "reasoning", "summary": [] },
            { "type": "message", "content": [{ "type": "output_text", "text": "Answer" }] }
        ]
    })
    .to_string();
    let resp = parse_responses_response(&json).unwrap();
    assert_eq!(resp.text().as_deref(), Some("Answer"));
}

#[test]
fn resp_parse_output_text_fallback() {
    let json = serde_json::json!({
        "model": "gpt-4o",
        "output_text": "Fallback text",
        "usage": { "input_tokens": 5, "output_tokens": 3 }
    })
    .to_string();
    let resp = parse_responses_response(&json).unwrap();
    assert_eq!(resp.content.len(), 1);
    assert!(matches!(&resp.content[0], ContentBlock::Text { text } if text == "Fallback text"));
}

#[test]
fn resp_parse_truncated() {
    let json = serde_json::json!({
        "model": "gpt-4o",
        "output": [],
        "incomplete_details": { "reason": "max_output_tokens" }
    })
    .to_string();
    let resp = parse_responses_response(&json).unwrap();
    assert_eq!(resp.stop_reason, "max_tokens");
}

#[test]
fn resp_input_tags_assistant_history_as_output_text() {
    let history = [Message::user("hi"), Message::assistant("hello")];
    let input = build_responses_input(&history);
    let json = serde_json::to_value(&input).unwrap();
    assert_eq!(json[0]["type"], "message");
    assert_eq!(json[0]["content"][0]["type"], "input_text");
    assert_eq!(json[1]["role"], "assistant");
    assert_eq!(json[1]["content"][0]["type"], "output_text");
    assert_eq!(json[1]["content"][0]["text"], "hello");
}
