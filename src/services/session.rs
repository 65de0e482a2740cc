//! Session manager: one assistant conversation per chat widget.
//!
//! DESIGN
//! ======
//! A widget owns exactly one provider session, one transcript and one
//! pending flag. The session is created on first use with the knowledge
//! context as its system instruction and is never recreated. A failed
//! creation is remembered and replayed to every later caller without
//! retrying.
//!
//! `send_turn` is the only way to talk to the provider:
//!
//! ```text
//! Idle --send_turn--> Pending --reply/error--> Idle
//!        Pending --send_turn--> ignored (no queue, no second request)
//! ```
//!
//! The user turn is appended before the request goes out and the assistant
//! turn (reply, apology or fallback) after it resolves. Provider errors are
//! absorbed here and never reach the caller.
//!
//! TRADE-OFFS
//! ==========
//! There is no cancellation. Without `send_timeout` a hung provider call
//! keeps the widget pending until the HTTP client gives up.

use std::sync::{Arc, Mutex as StdMutex, PoisonError};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{debug, error, info};

use super::context::build_context;
use super::fallback::{EMPTY_REPLY_TEXT, to_fallback_turn};
use super::transcript::{Transcript, Turn};
use crate::error::ErrorCode;
use crate::llm::session::{ProviderSession, SessionProvider};
use crate::llm::types::LlmError;
use crate::profile::Profile;

/// Low temperature for factual, low-variance replies.
pub const DEFAULT_TEMPERATURE: f32 = 0.4;

// =============================================================================
// TYPES
// =============================================================================

/// The provider session could not be created.
#[derive(Debug, Clone, thiserror::Error)]
#[error("assistant session unavailable: {source}")]
pub struct SessionInitError {
    #[source]
    source: LlmError,
}

impl From<LlmError> for SessionInitError {
    fn from(source: LlmError) -> Self {
        Self { source }
    }
}

impl ErrorCode for SessionInitError {
    fn error_code(&self) -> &'static str {
        "E_SESSION_INIT"
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionSettings {
    pub temperature: f32,
    /// `None` waits for the provider indefinitely.
    pub send_timeout: Option<Duration>,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self { temperature: DEFAULT_TEMPERATURE, send_timeout: None }
    }
}

impl SessionSettings {
    /// - `ASSISTANT_TEMPERATURE`: default 0.4
    /// - `ASSISTANT_SEND_TIMEOUT_SECS`: unset or 0 disables the timeout
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let temperature = lookup("ASSISTANT_TEMPERATURE")
            .and_then(|v| v.trim().parse::<f32>().ok())
            .filter(|t| t.is_finite() && *t >= 0.0)
            .unwrap_or(DEFAULT_TEMPERATURE);
        let send_timeout = lookup("ASSISTANT_SEND_TIMEOUT_SECS")
            .and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs);
        Self { temperature, send_timeout }
    }
}

/// Why a send was dropped without touching the transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IgnoreReason {
    /// Text was empty after trimming.
    Empty,
    /// A previous request is still in flight.
    Busy,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    /// The assistant turn appended for this send.
    Replied(Turn),
    Ignored(IgnoreReason),
}

/// A created session, locked only for the duration of one round trip.
type SharedSession = Arc<Mutex<Box<dyn ProviderSession>>>;

enum SessionSlot {
    Empty,
    Ready(SharedSession),
    Failed(SessionInitError),
}

/// Holds the pending flag for the lifetime of one request.
struct PendingGuard<'a>(&'a AtomicBool);

impl<'a> PendingGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

// =============================================================================
// SESSION MANAGER
// =============================================================================

pub struct SessionManager {
    provider: Arc<dyn SessionProvider>,
    system: String,
    settings: SessionSettings,
    /// Held only while reading or creating the session, never across a send.
    slot: StdMutex<SessionSlot>,
    pending: AtomicBool,
    transcript: Transcript,
}

impl SessionManager {
    #[must_use]
    pub fn new(provider: Arc<dyn SessionProvider>, profile: &Profile, settings: SessionSettings) -> Self {
        Self {
            provider,
            system: build_context(profile),
            settings,
            slot: StdMutex::new(SessionSlot::Empty),
            pending: AtomicBool::new(false),
            transcript: Transcript::new(profile.greeting()),
        }
    }

    #[must_use]
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// `true` exactly while a provider round trip is outstanding.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::Acquire)
    }

    #[must_use]
    pub fn system_instruction(&self) -> &str {
        &self.system
    }

    /// Create the provider session if it does not exist yet.
    ///
    /// Never waits on a request in flight, so it is safe to call while the
    /// widget is pending.
    ///
    /// # Errors
    ///
    /// Returns the creation failure. Once creation has failed, every later
    /// call returns the same error without trying again.
    pub fn ensure_session(&self) -> Result<(), SessionInitError> {
        self.ready_session().map(drop)
    }

    fn ready_session(&self) -> Result<SharedSession, SessionInitError> {
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        match &*slot {
            SessionSlot::Ready(session) => return Ok(Arc::clone(session)),
            SessionSlot::Failed(err) => return Err(err.clone()),
            SessionSlot::Empty => {}
        }
        match self
            .provider
            .create_session(&self.system, self.settings.temperature)
        {
            Ok(session) => {
                info!(temperature = self.settings.temperature, "assistant: session created");
                let session = Arc::new(Mutex::new(session));
                *slot = SessionSlot::Ready(Arc::clone(&session));
                Ok(session)
            }
            Err(e) => {
                let err = SessionInitError::from(e);
                error!(code = err.error_code(), error = %err, "assistant: session creation failed");
                *slot = SessionSlot::Failed(err.clone());
                Err(err)
            }
        }
    }

    /// Send one user message and append the resulting turns.
    ///
    /// Blank text and sends made while a request is pending are ignored
    /// without touching the transcript. Provider failures still produce an
    /// assistant turn carrying the fallback text.
    ///
    /// # Errors
    ///
    /// Returns [`SessionInitError`] when no provider session is available.
    /// The transcript is left unchanged in that case.
    pub async fn send_turn(&self, text: &str) -> Result<SendOutcome, SessionInitError> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(SendOutcome::Ignored(IgnoreReason::Empty));
        }
        let Some(_pending) = PendingGuard::acquire(&self.pending) else {
            debug!("assistant: send ignored while a request is pending");
            return Ok(SendOutcome::Ignored(IgnoreReason::Busy));
        };

        let session = self.ready_session()?;
        self.transcript.append(Turn::user(text));
        info!(text_len = text.len(), "assistant: turn sent");

        // Uncontended: the pending flag admits one send at a time.
        let mut session = session.lock_owned().await;

        let result = match self.settings.send_timeout {
            Some(limit) => tokio::time::timeout(limit, session.send(text))
                .await
                .unwrap_or_else(|_| Err(LlmError::Timeout { secs: limit.as_secs() })),
            None => session.send(text).await,
        };
        drop(session);

        let reply = match result {
            Ok(response) => {
                info!(
                    model = %response.model,
                    stop_reason = %response.stop_reason,
                    input_tokens = response.input_tokens,
                    output_tokens = response.output_tokens,
                    "assistant: reply received"
                );
                Turn::assistant(
                    response
                        .text()
                        .unwrap_or_else(|| EMPTY_REPLY_TEXT.to_string()),
                )
            }
            Err(e) => to_fallback_turn(&e),
        };
        self.transcript.append(reply.clone());
        Ok(SendOutcome::Replied(reply))
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
