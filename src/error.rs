//! Error classification shared by every error enum in the crate.
//!
//! Route handlers turn errors into JSON bodies carrying a grepable `code`
//! and a `retryable` hint so the widget can decide whether to offer a resend.

/// Grepable error code plus retry hint for an error value.
pub trait ErrorCode {
    /// Stable upper-case code such as `E_API_REQUEST`.
    fn error_code(&self) -> &'static str;

    /// Whether repeating the same operation may succeed.
    fn retryable(&self) -> bool {
        false
    }
}
