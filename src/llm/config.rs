//! LLM configuration parsed from environment variables.

use super::types::LlmError;

pub const DEFAULT_API_KEY_ENV: &str = "API_KEY";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_LLM_REQUEST_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_LLM_CONNECT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_LLM_MAX_TOKENS: u32 = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmProviderKind {
    Gemini,
    Anthropic,
    OpenAi,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenAiApiMode {
    ChatCompletions,
    Responses,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LlmTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LlmConfig {
    pub provider: LlmProviderKind,
    pub api_key: String,
    pub model: String,
    pub max_tokens: u32,
    pub openai_mode: OpenAiApiMode,
    pub openai_base_url: String,
    pub gemini_base_url: String,
    pub timeouts: LlmTimeouts,
}

impl LlmConfig {
    /// Build typed LLM config from environment variables.
    ///
    /// Optional:
    /// - `LLM_PROVIDER`: `gemini` (default), `anthropic` or `openai`
    /// - `LLM_API_KEY_ENV`: names the env var containing the key (default `API_KEY`)
    /// - `LLM_MODEL`: provider default when absent
    /// - `LLM_MAX_TOKENS`: default 1024
    /// - `LLM_OPENAI_MODE`: `responses` (default) or `chat_completions`
    /// - `LLM_OPENAI_BASE_URL`, `LLM_GEMINI_BASE_URL`: official endpoints by default
    /// - `LLM_REQUEST_TIMEOUT_SECS`: default 120
    /// - `LLM_CONNECT_TIMEOUT_SECS`: default 10
    ///
    /// # Errors
    ///
    /// Returns an error when the credential is absent or a value is unparseable.
    pub fn from_env() -> Result<Self, LlmError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`LlmConfig::from_env`], reading values through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns an error when the credential is absent or a value is unparseable.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, LlmError> {
        let provider = parse_provider(lookup("LLM_PROVIDER").as_deref())?;

        let key_var = lookup("LLM_API_KEY_ENV").unwrap_or_else(|| DEFAULT_API_KEY_ENV.to_string());
        let api_key = lookup(&key_var)
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| LlmError::MissingApiKey { var: key_var.clone() })?;

        let model = lookup("LLM_MODEL").unwrap_or_else(|| default_model(provider).to_string());
        let openai_mode = parse_openai_mode(lookup("LLM_OPENAI_MODE").as_deref())?;
        let openai_base_url = base_url(lookup("LLM_OPENAI_BASE_URL"), DEFAULT_OPENAI_BASE_URL);
        let gemini_base_url = base_url(lookup("LLM_GEMINI_BASE_URL"), DEFAULT_GEMINI_BASE_URL);
        let max_tokens = parse_or("LLM_MAX_TOKENS", lookup("LLM_MAX_TOKENS"), DEFAULT_LLM_MAX_TOKENS)?;
        let timeouts = LlmTimeouts {
            request_secs: parse_or(
                "LLM_REQUEST_TIMEOUT_SECS",
                lookup("LLM_REQUEST_TIMEOUT_SECS"),
                DEFAULT_LLM_REQUEST_TIMEOUT_SECS,
            )?,
            connect_secs: parse_or(
                "LLM_CONNECT_TIMEOUT_SECS",
                lookup("LLM_CONNECT_TIMEOUT_SECS"),
                DEFAULT_LLM_CONNECT_TIMEOUT_SECS,
            )?,
        };

        Ok(Self { provider, api_key, model, max_tokens, openai_mode, openai_base_url, gemini_base_url, timeouts })
    }
}

fn base_url(raw: Option<String>, default: &str) -> String {
    raw.unwrap_or_else(|| default.to_string())
        .trim_end_matches('/')
        .to_string()
}

fn parse_or<T: std::str::FromStr>(key: &str, raw: Option<String>, default: T) -> Result<T, LlmError> {
    match raw {
        None => Ok(default),
        Some(v) => v
            .trim()
            .parse::<T>()
            .map_err(|_| LlmError::ConfigParse(format!("invalid {key}: '{v}'"))),
    }
}

fn parse_provider(raw: Option<&str>) -> Result<LlmProviderKind, LlmError> {
    match raw.unwrap_or("gemini") {
        "gemini" => Ok(LlmProviderKind::Gemini),
        "anthropic" => Ok(LlmProviderKind::Anthropic),
        "openai" => Ok(LlmProviderKind::OpenAi),
        other => Err(LlmError::ConfigParse(format!("unknown LLM_PROVIDER: {other}"))),
    }
}

fn parse_openai_mode(raw: Option<&str>) -> Result<OpenAiApiMode, LlmError> {
    match raw.unwrap_or("responses") {
        "responses" => Ok(OpenAiApiMode::Responses),
        "chat_completions" => Ok(OpenAiApiMode::ChatCompletions),
        other => Err(LlmError::ConfigParse(format!(
            "unsupported openai_api mode '{other}' (expected 'responses' or 'chat_completions')"
        ))),
    }
}

fn default_model(provider: LlmProviderKind) -> &'static str {
    match provider {
        LlmProviderKind::Gemini => "gemini-3-flash-preview",
        LlmProviderKind::Anthropic => "claude-sonnet-4-5-20250929",
        LlmProviderKind::OpenAi => "gpt-4o",
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
