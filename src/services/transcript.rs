//! Conversation transcript: append-only log of chat turns.
//!
//! DESIGN
//! ======
//! Starts with exactly one seeded assistant greeting. `append` is the only
//! mutation; entries are never edited, reordered or dropped while the
//! owning widget lives. Every append is pushed to observers over a
//! broadcast channel so a renderer can redraw in order.

use std::sync::{PoisonError, RwLock};

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

const EVENT_CAPACITY: usize = 64;

// =============================================================================
// TURN
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One message in the visible conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub text: String,
}

impl Turn {
    #[must_use]
    pub fn user(text: impl Into<String>) -> Self {
        Self { role: Role::User, text: text.into() }
    }

    #[must_use]
    pub fn assistant(text: impl Into<String>) -> Self {
        Self { role: Role::Assistant, text: text.into() }
    }
}

/// Notification sent to observers after each append.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Appended {
    /// Position of the new turn in the transcript.
    pub index: usize,
    pub turn: Turn,
}

// =============================================================================
// TRANSCRIPT
// =============================================================================

pub struct Transcript {
    turns: RwLock<Vec<Turn>>,
    events: broadcast::Sender<Appended>,
}

impl Transcript {
    /// New transcript seeded with the assistant's greeting.
    #[must_use]
    pub fn new(greeting: impl Into<String>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self { turns: RwLock::new(vec![Turn::assistant(greeting)]), events }
    }

    pub fn append(&self, turn: Turn) {
        let index = {
            let mut turns = self
                .turns
                .write()
                .unwrap_or_else(PoisonError::into_inner);
            turns.push(turn.clone());
            turns.len() - 1
        };
        // No receivers is fine; nobody is watching yet.
        let _ = self.events.send(Appended { index, turn });
    }

    /// Snapshot of every turn in append order.
    #[must_use]
    pub fn all(&self) -> Vec<Turn> {
        self.turns
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.turns
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Never true: the greeting is always present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Receive every turn appended after this call.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<Appended> {
        self.events.subscribe()
    }
}

#[cfg(test)]
#[path = "transcript_test.rs"]
mod tests;
