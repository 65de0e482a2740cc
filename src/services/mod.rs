//! Domain services behind the HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own the assistant's behaviour (knowledge context,
//! session lifecycle, transcript, formatting, failure reporting) so route
//! handlers can stay focused on protocol translation.

pub mod context;
pub mod fallback;
pub mod format;
pub mod session;
pub mod transcript;
