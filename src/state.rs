//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor.
//! It holds the portfolio profile, the provider used to open assistant
//! sessions, and a registry of live chat widgets. Each widget is one
//! [`SessionManager`]: its own session, transcript and pending flag.
//! Widgets never share conversation state.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

use crate::llm::session::SessionProvider;
use crate::profile::Profile;
use crate::services::session::{SessionManager, SessionSettings};

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; every field is cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub profile: Arc<Profile>,
    pub provider: Arc<dyn SessionProvider>,
    pub settings: SessionSettings,
    /// Live widgets keyed by widget ID.
    pub widgets: Arc<RwLock<HashMap<Uuid, Arc<SessionManager>>>>,
}

impl AppState {
    #[must_use]
    pub fn new(profile: Profile, provider: Arc<dyn SessionProvider>, settings: SessionSettings) -> Self {
        Self { profile: Arc::new(profile), provider, settings, widgets: Arc::new(RwLock::new(HashMap::new())) }
    }

    /// Register a fresh widget seeded with the greeting.
    pub async fn mount_widget(&self) -> (Uuid, Arc<SessionManager>) {
        let id = Uuid::new_v4();
        let widget = Arc::new(SessionManager::new(self.provider.clone(), &self.profile, self.settings));
        self.widgets.write().await.insert(id, widget.clone());
        info!(widget_id = %id, "widget mounted");
        (id, widget)
    }

    pub async fn widget(&self, id: Uuid) -> Option<Arc<SessionManager>> {
        self.widgets.read().await.get(&id).cloned()
    }

    /// Drop a widget. A request already in flight keeps its own handle and
    /// completes, but nothing can reach the widget afterwards.
    pub async fn unmount_widget(&self, id: Uuid) -> bool {
        let removed = self.widgets.write().await.remove(&id).is_some();
        if removed {
            info!(widget_id = %id, "widget unmounted");
        }
        removed
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================


#[cfg(test)]
#[path = "state_test.rs"]
mod tests;
