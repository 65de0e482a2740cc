//! Chat widget routes.
//!
//! DESIGN
//! ======
//! Each widget is addressed by the ID handed out on mount. Handlers only
//! translate between HTTP and [`SessionManager`]; all conversation rules
//! (trimming, busy handling, fallback turns) live in the service.
//!
//! Assistant turns are sent with their formatted `lines` and an escaped
//! `html` rendering so clients never inject reply text as markup.
//!
//! The events socket only holds a transcript receiver. Unmounting the
//! widget drops the transcript, which closes the channel and ends the
//! socket.

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::ErrorCode;
use crate::services::format::{FormattedLine, format, render_html};
use crate::services::session::{IgnoreReason, SendOutcome, SessionInitError};
use crate::services::transcript::{Appended, Role, Turn};
use crate::state::AppState;

// =============================================================================
// ERRORS
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum RouteError {
    #[error("widget not found: {0}")]
    WidgetNotFound(Uuid),
    #[error(transparent)]
    SessionInit(#[from] SessionInitError),
}

impl ErrorCode for RouteError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::WidgetNotFound(_) => "E_WIDGET_NOT_FOUND",
            Self::SessionInit(e) => e.error_code(),
        }
    }
}

pub(crate) fn route_error_to_status(err: &RouteError) -> StatusCode {
    match err {
        RouteError::WidgetNotFound(_) => StatusCode::NOT_FOUND,
        RouteError::SessionInit(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    code: &'static str,
    message: String,
    retryable: bool,
}

impl IntoResponse for RouteError {
    fn into_response(self) -> Response {
        let status = route_error_to_status(&self);
        let body = ErrorBody { code: self.error_code(), message: self.to_string(), retryable: self.retryable() };
        (status, Json(body)).into_response()
    }
}

// =============================================================================
// VIEWS
// =============================================================================

/// A transcript turn as sent to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TurnView {
    pub role: Role,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lines: Option<Vec<FormattedLine>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
}

impl From<&Turn> for TurnView {
    fn from(turn: &Turn) -> Self {
        match turn.role {
            // User text is shown verbatim.
            Role::User => Self { role: turn.role, text: turn.text.clone(), lines: None, html: None },
            Role::Assistant => {
                let lines = format(&turn.text);
                let html = render_html(&lines);
                Self { role: turn.role, text: turn.text.clone(), lines: Some(lines), html: Some(html) }
            }
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ChatView {
    pub id: Uuid,
    pub pending: bool,
    /// False when the assistant session could not be opened.
    pub assistant_available: bool,
    pub turns: Vec<TurnView>,
}

#[derive(Debug, Deserialize)]
pub struct SendRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
#[serde(tag = "outcome", rename_all = "lowercase")]
pub enum SendResponse {
    Replied { turn: TurnView },
    Ignored { reason: IgnoreReason },
}

#[derive(Debug, Serialize)]
struct EventView {
    index: usize,
    turn: TurnView,
}

impl From<&Appended> for EventView {
    fn from(event: &Appended) -> Self {
        Self { index: event.index, turn: TurnView::from(&event.turn) }
    }
}

// =============================================================================
// HANDLERS
// =============================================================================

async fn chat_view(state: &AppState, id: Uuid) -> Result<ChatView, RouteError> {
    let widget = state
        .widget(id)
        .await
        .ok_or(RouteError::WidgetNotFound(id))?;
    let assistant_available = widget.ensure_session().is_ok();
    Ok(ChatView {
        id,
        pending: widget.is_pending(),
        assistant_available,
        turns: widget.transcript().all().iter().map(TurnView::from).collect(),
    })
}

/// `POST /api/chat`: mount a new widget.
///
/// The session is opened eagerly so an unconfigured provider shows up as
/// `assistant_available: false` before the first message.
pub async fn mount_chat(State(state): State<AppState>) -> Result<(StatusCode, Json<ChatView>), RouteError> {
    let (id, _) = state.mount_widget().await;
    let view = chat_view(&state, id).await?;
    Ok((StatusCode::CREATED, Json(view)))
}

/// `GET /api/chat/{id}`
pub async fn get_chat(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Json<ChatView>, RouteError> {
    Ok(Json(chat_view(&state, id).await?))
}

/// `POST /api/chat/{id}/messages`
pub async fn send_message(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<SendRequest>,
) -> Result<(StatusCode, Json<SendResponse>), RouteError> {
    let widget = state
        .widget(id)
        .await
        .ok_or(RouteError::WidgetNotFound(id))?;
    match widget.send_turn(&body.text).await? {
        SendOutcome::Replied(turn) => Ok((StatusCode::OK, Json(SendResponse::Replied { turn: TurnView::from(&turn) }))),
        SendOutcome::Ignored(reason) => {
            debug!(widget_id = %id, ?reason, "chat: send ignored");
            Ok((StatusCode::ACCEPTED, Json(SendResponse::Ignored { reason })))
        }
    }
}

/// `DELETE /api/chat/{id}`
pub async fn delete_chat(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<StatusCode, RouteError> {
    if state.unmount_widget(id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(RouteError::WidgetNotFound(id))
    }
}

/// `GET /api/chat/{id}/events`: push every appended turn over a websocket.
pub async fn chat_events(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ws: WebSocketUpgrade,
) -> Result<Response, RouteError> {
    let widget = state
        .widget(id)
        .await
        .ok_or(RouteError::WidgetNotFound(id))?;
    let events = widget.transcript().subscribe();
    drop(widget);
    Ok(ws.on_upgrade(move |socket| run_events(socket, id, events)))
}

async fn run_events(mut socket: WebSocket, id: Uuid, mut events: broadcast::Receiver<Appended>) {
    info!(widget_id = %id, "chat: events connected");
    loop {
        tokio::select! {
            msg = socket.recv() => {
                match msg {
                    Some(Ok(Message::Close(_)) | Err(_)) | None => break,
                    Some(Ok(_)) => {}
                }
            }
            event = events.recv() => {
                match event {
                    Ok(event) => {
                        if send_event(&mut socket, &event).await.is_err() {
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        warn!(widget_id = %id, skipped, "chat: events receiver lagged");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        }
    }
    info!(widget_id = %id, "chat: events disconnected");
}

async fn send_event(socket: &mut WebSocket, event: &Appended) -> Result<(), ()> {
    let json = serde_json::to_string(&EventView::from(event)).map_err(|e| {
        warn!(error = %e, "chat: failed to serialize event");
    })?;
    socket
        .send(Message::Text(json.into()))
        .await
        .map_err(|_| ())
}

#[cfg(test)]
#[path = "chat_test.rs"]
mod tests;
