use super::*;
use std::collections::HashMap;

fn parse(vars: &[(&str, &str)]) -> Result<LlmConfig, LlmError> {
    let env: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect();
    LlmConfig::from_lookup(|key| env.get(key).cloned())
}

#[test]
fn defaults_to_gemini_with_api_key_var() {
    let cfg = parse(&[("API_KEY", "secret")]).unwrap();
    assert_eq!(cfg.provider, LlmProviderKind::Gemini);
    assert_eq!(cfg.model, "gemini-3-flash-preview");
    assert_eq!(cfg.api_key, "secret");
    assert_eq!(cfg.max_tokens, DEFAULT_LLM_MAX_TOKENS);
    assert_eq!(cfg.openai_mode, OpenAiApiMode::Responses);
    assert_eq!(cfg.gemini_base_url, DEFAULT_GEMINI_BASE_URL);
    assert_eq!(
        cfg.timeouts,
        LlmTimeouts { request_secs: DEFAULT_LLM_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_LLM_CONNECT_TIMEOUT_SECS }
    );
}

#[test]
fn key_var_can_be_renamed() {
    let cfg = parse(&[
        ("LLM_PROVIDER", "anthropic"),
        ("LLM_API_KEY_ENV", "ANTHROPIC_API_KEY"),
        ("ANTHROPIC_API_KEY", "sk-ant"),
    ])
    .unwrap();
    assert_eq!(cfg.provider, LlmProviderKind::Anthropic);
    assert_eq!(cfg.model, "claude-sonnet-4-5-20250929");
    assert_eq!(cfg.api_key, "sk-ant");
}

#[test]
fn parses_openai_overrides() {
    let cfg = parse(&[
        ("LLM_PROVIDER", "openai"),
        ("API_KEY", "sk-test"),
        ("LLM_OPENAI_MODE", "chat_completions"),
        ("LLM_OPENAI_BASE_URL", "https://example.test/v1/"),
        ("LLM_MAX_TOKENS", "256"),
        ("LLM_REQUEST_TIMEOUT_SECS", "42"),
        ("LLM_CONNECT_TIMEOUT_SECS", "7"),
    ])
    .unwrap();
    assert_eq!(cfg.provider, LlmProviderKind::OpenAi);
    assert_eq!(cfg.model, "gpt-4o");
    assert_eq!(cfg.openai_mode, OpenAiApiMode::ChatCompletions);
    assert_eq!(cfg.openai_base_url, "https://example.test/v1");
    assert_eq!(cfg.max_tokens, 256);
    assert_eq!(cfg.timeouts, LlmTimeouts { request_secs: 42, connect_secs: 7 });
}

#[test]
fn model_override_wins() {
    let cfg = parse(&[("API_KEY", "k"), ("LLM_MODEL", "gemini-2.5-pro")]).unwrap();
    assert_eq!(cfg.model, "gemini-2.5-pro");
}

#[test]
fn missing_key_names_the_variable() {
    let err = parse(&[("LLM_API_KEY_ENV", "GEMINI_KEY")]).unwrap_err();
    assert!(matches!(&err, LlmError::MissingApiKey { var } if var == "GEMINI_KEY"));
}

#[test]
fn blank_key_counts_as_missing() {
    let err = parse(&[("API_KEY", "   ")]).unwrap_err();
    assert!(matches!(err, LlmError::MissingApiKey { .. }));
}

#[test]
fn unknown_provider_errors() {
    let err = parse(&[("LLM_PROVIDER", "bad"), ("API_KEY", "k")]).unwrap_err().to_string();
    assert!(err.contains("unknown LLM_PROVIDER"));
}

#[test]
fn unknown_openai_mode_errors() {
    let err = parse(&[("API_KEY", "k"), ("LLM_OPENAI_MODE", "bad_mode")]).unwrap_err().to_string();
    assert!(err.contains("unsupported openai_api mode"));
}

#[test]
fn unparseable_number_errors() {
    let err = parse(&[("API_KEY", "k"), ("LLM_MAX_TOKENS", "lots")]).unwrap_err().to_string();
    assert!(err.contains("LLM_MAX_TOKENS"));
}
