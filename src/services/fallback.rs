//! Failure reporter: provider errors become one apologetic assistant turn.
//!
//! The error is logged with its code for diagnostics; the user only ever
//! sees the fixed fallback text, whatever the cause.

use tracing::warn;

use super::transcript::Turn;
use crate::error::ErrorCode;
use crate::llm::types::LlmError;

/// Shown in place of a reply when the provider round trip fails.
pub const FALLBACK_TEXT: &str = "Signal interference. Please retry your query.";

/// Shown when the provider answers successfully but with no text.
pub const EMPTY_REPLY_TEXT: &str = "I'm sorry, I couldn't generate a response.";

#[must_use]
pub fn to_fallback_turn(error: &LlmError) -> Turn {
    warn!(code = error.error_code(), retryable = error.retryable(), error = %error, "assistant: provider call failed");
    Turn::assistant(FALLBACK_TEXT)
}
