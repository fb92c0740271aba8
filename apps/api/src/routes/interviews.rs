//! Axum route handlers for the Interview API.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::session::{HistoryTurn, Session, SessionState, Topic};
use crate::session_store::load_cv_data;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct TurnRequest {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct TurnResponse {
    pub response: String,
    pub agent: String,
    pub state: SessionState,
    pub is_final: bool,
}

#[derive(Debug, Serialize)]
pub struct SessionView {
    pub id: Uuid,
    pub state: SessionState,
    pub history: Vec<HistoryTurn>,
    pub current_topic: Option<Topic>,
    pub covered_topics: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/interviews/:id/turns
///
/// Processes one candidate turn. Turns for the same interview are serialized
/// by a per-session lock held from load to save; the session commits exactly
/// once, after the dispatched agent succeeds. On error nothing is saved and
/// the previously committed state is retained.
pub async fn handle_turn(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<TurnRequest>,
) -> Result<Json<TurnResponse>, AppError> {
    if request.message.trim().is_empty() {
        return Err(AppError::Validation("message cannot be empty".to_string()));
    }

    let lock = state.sessions.turn_lock(id).await;
    let _turn_guard = lock.lock().await;

    let mut session = match state.sessions.load(id).await? {
        Some(session) => session,
        None => {
            // First contact: seed the session from the parsed resume record.
            let cv_data = load_cv_data(&state.db, id).await?.ok_or_else(|| {
                AppError::NotFound(format!("no resume record for candidate {id}"))
            })?;
            Session::new(id, cv_data)
        }
    };

    session.history.push(HistoryTurn::user(request.message.as_str()));

    let reply = state.orchestrator.dispatch(&request.message, &mut session).await?;

    session
        .history
        .push(HistoryTurn::assistant(reply.response.as_str(), reply.agent));

    state.sessions.save(&session).await?;

    Ok(Json(TurnResponse {
        response: reply.response,
        agent: reply.agent.to_string(),
        state: session.state,
        is_final: reply.is_final,
    }))
}

/// GET /api/v1/interviews/:id
///
/// Read-only view of a session's conversation state.
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    let session = state
        .sessions
        .load(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("no session {id}")))?;

    Ok(Json(SessionView {
        id: session.id,
        state: session.state,
        history: session.history,
        current_topic: session.current_topic,
        covered_topics: session.covered_topics,
    }))
}
