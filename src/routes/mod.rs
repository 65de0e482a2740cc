//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! Binds the JSON API and the per-widget events socket under one Axum
//! router. An optional static directory is served at `/` for the site
//! itself.

pub mod chat;
pub mod profile;

use std::path::PathBuf;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// API routes shared by the site and any other client.
fn api_routes(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/profile", get(profile::get_profile))
        .route("/api/projects", get(profile::list_projects))
        .route("/api/chat", post(chat::mount_chat))
        .route("/api/chat/{id}", get(chat::get_chat).delete(chat::delete_chat))
        .route("/api/chat/{id}/messages", post(chat::send_message))
        .route("/api/chat/{id}/events", get(chat::chat_events))
        .route("/healthz", get(healthz))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Full application: API routes plus the static site when `static_dir` is set.
pub fn app(state: AppState, static_dir: Option<PathBuf>) -> Router {
    let router = api_routes(state);
    match static_dir {
        Some(dir) => router.fallback_service(ServeDir::new(dir).append_index_html_on_directories(true)),
        None => router,
    }
}

async fn healthz() -> (StatusCode, &'static str) {
    (StatusCode::OK, "ok")
}
