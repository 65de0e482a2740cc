mod error;
mod llm;
mod profile;
mod routes;
mod services;
mod state;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::llm::LlmChat;
use crate::llm::config::LlmConfig;
use crate::llm::session::ClientSessionProvider;
use crate::services::session::SessionSettings;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "3000".into())
        .parse()
        .expect("invalid PORT");

    let profile = match std::env::var("PROFILE_PATH") {
        Ok(path) => profile::Profile::from_yaml_file(Path::new(&path)).expect("failed to load PROFILE_PATH"),
        Err(_) => profile::builtin(),
    };

    // Non-fatal: every widget reports the session error instead.
    let (client, max_tokens) = match LlmConfig::from_env() {
        Ok(config) => {
            let max_tokens = config.max_tokens;
            (llm::LlmClient::from_config(config), max_tokens)
        }
        Err(e) => (Err(e), llm::config::DEFAULT_LLM_MAX_TOKENS),
    };
    let client = match client {
        Ok(client) => {
            tracing::info!(provider = ?client.provider(), model = client.model(), "LLM client initialized");
            Ok(Arc::new(client) as Arc<dyn LlmChat>)
        }
        Err(e) => {
            tracing::warn!(error = %e, "LLM client not configured, assistant disabled");
            Err(e)
        }
    };
    let provider = Arc::new(ClientSessionProvider::new(client, max_tokens));

    let state = state::AppState::new(profile, provider, SessionSettings::from_env());
    let static_dir = std::env::var("STATIC_DIR").ok().map(PathBuf::from);

    let app = routes::app(state, static_dir);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "folio listening");
    axum::serve(listener, app).await.expect("server failed");
}
