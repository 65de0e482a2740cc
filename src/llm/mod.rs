//! LLM: multi-provider adapter for the portfolio assistant.
//!
//! DESIGN
//! ======
//! Configured from environment variables. [`LlmClient`] wraps whichever of
//! Gemini, Anthropic or `OpenAI` `LLM_PROVIDER` selects and exposes it as
//! one stateless [`LlmChat`]. The `session` module layers conversation
//! state on top.

pub mod anthropic;
pub mod config;
pub mod gemini;
mod http;
pub mod openai;
pub mod session;
pub mod types;

use config::{LlmConfig, LlmProviderKind};
pub use types::LlmChat;
use types::{ChatResponse, LlmError, Message};

enum Backend {
    Gemini(gemini::GeminiClient),
    Anthropic(anthropic::AnthropicClient),
    OpenAi(openai::OpenAiClient),
}

/// The configured provider client plus the model every call uses.
pub struct LlmClient {
    backend: Backend,
    provider: LlmProviderKind,
    model: String,
}

impl LlmClient {
    /// # Errors
    ///
    /// Returns [`LlmError::HttpClientBuild`] if the HTTP client cannot be built.
    pub fn from_config(config: LlmConfig) -> Result<Self, LlmError> {
        let LlmConfig { provider, api_key, model, openai_mode, openai_base_url, gemini_base_url, timeouts, .. } = config;
        let backend = match provider {
            LlmProviderKind::Gemini => Backend::Gemini(gemini::GeminiClient::new(api_key, gemini_base_url, timeouts)?),
            LlmProviderKind::Anthropic => Backend::Anthropic(anthropic::AnthropicClient::new(api_key, timeouts)?),
            LlmProviderKind::OpenAi => {
                Backend::OpenAi(openai::OpenAiClient::new(api_key, openai_mode, openai_base_url, timeouts)?)
            }
        };
        Ok(Self { backend, provider, model })
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    #[must_use]
    pub fn provider(&self) -> LlmProviderKind {
        self.provider
    }
}

#[async_trait::async_trait]
impl LlmChat for LlmClient {
    async fn chat(
        &self,
        max_tokens: u32,
        temperature: f32,
        system: &str,
        messages: &[Message],
    ) -> Result<ChatResponse, LlmError> {
        let model = self.model.as_str();
        match &self.backend {
            Backend::Gemini(c) => c.chat(model, max_tokens, temperature, system, messages).await,
            Backend::Anthropic(c) => c.chat(model, max_tokens, temperature, system, messages).await,
            Backend::OpenAi(c) => c.chat(model, max_tokens, temperature, system, messages).await,
        }
    }
}
