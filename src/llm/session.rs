//! Session-oriented provider contract.
//!
//! DESIGN
//! ======
//! The assistant talks to a provider through a session: created once with a
//! fixed system instruction and temperature, then fed one user text per
//! turn. None of the HTTP providers keep server-side chat state, so
//! [`HistorySession`] holds the accumulated turns locally and replays them on
//! every call. Payload size therefore grows linearly with the conversation.
//!
//! History is only extended after a successful round trip. A failed or
//! abandoned call leaves the context exactly as it was before the send.

use std::sync::Arc;

use super::types::{ChatResponse, LlmChat, LlmError, Message};

/// Creates provider sessions. One call per widget instance.
pub trait SessionProvider: Send + Sync {
    /// Open a new conversational context.
    ///
    /// # Errors
    ///
    /// Returns an [`LlmError`] when the underlying client cannot be built,
    /// most commonly because the credential is missing.
    fn create_session(&self, system: &str, temperature: f32) -> Result<Box<dyn ProviderSession>, LlmError>;
}

/// A live conversation with a provider.
#[async_trait::async_trait]
pub trait ProviderSession: Send {
    /// Send one user text and receive the assistant reply.
    ///
    /// # Errors
    ///
    /// Any transport, status or parse failure from the provider.
    async fn send(&mut self, text: &str) -> Result<ChatResponse, LlmError>;
}

// =============================================================================
// HISTORY SESSION
// =============================================================================

/// Adapts a stateless [`LlmChat`] to [`ProviderSession`] by threading the
/// full history through every request.
pub struct HistorySession {
    llm: Arc<dyn LlmChat>,
    system: String,
    temperature: f32,
    max_tokens: u32,
    history: Vec<Message>,
}

impl HistorySession {
    #[must_use]
    pub fn new(llm: Arc<dyn LlmChat>, system: impl Into<String>, temperature: f32, max_tokens: u32) -> Self {
        Self { llm, system: system.into(), temperature, max_tokens, history: Vec::new() }
    }

    /// Messages the provider has seen and answered so far.
    #[must_use]
    pub fn history(&self) -> &[Message] {
        &self.history
    }
}

#[async_trait::async_trait]
impl ProviderSession for HistorySession {
    async fn send(&mut self, text: &str) -> Result<ChatResponse, LlmError> {
        let mut messages = Vec::with_capacity(self.history.len() + 1);
        messages.extend_from_slice(&self.history);
        messages.push(Message::user(text));

        let response = self
            .llm
            .chat(self.max_tokens, self.temperature, &self.system, &messages)
            .await?;

        // An empty reply is not remembered; the provider would otherwise see
        // a blank assistant turn on the next call.
        if let Some(reply) = response.text() {
            self.history = messages;
            self.history.push(Message::assistant(reply));
        }
        Ok(response)
    }
}

// =============================================================================
// CLIENT-BACKED PROVIDER
// =============================================================================

/// [`SessionProvider`] backed by a shared [`LlmChat`] client.
///
/// Holds the outcome of building the client at startup. A failed build is
/// replayed to every widget that asks for a session.
pub struct ClientSessionProvider {
    client: Result<Arc<dyn LlmChat>, LlmError>,
    max_tokens: u32,
}

impl ClientSessionProvider {
    #[must_use]
    pub fn new(client: Result<Arc<dyn LlmChat>, LlmError>, max_tokens: u32) -> Self {
        Self { client, max_tokens }
    }

    /// `true` when the client was built and sessions can be created.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.client.is_ok()
    }
}

impl SessionProvider for ClientSessionProvider {
    fn create_session(&self, system: &str, temperature: f32) -> Result<Box<dyn ProviderSession>, LlmError> {
        let llm = self.client.as_ref().map_err(Clone::clone)?;
        Ok(Box::new(HistorySession::new(Arc::clone(llm), system, temperature, self.max_tokens)))
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
