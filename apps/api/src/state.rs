use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::orchestrator::Orchestrator;
use crate::session_store::SessionStore;

/// Shared application state injected into all route handlers via Axum
/// extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub sessions: Arc<SessionStore>,
    pub orchestrator: Arc<Orchestrator>,
    /// Runtime configuration, kept for handlers that need it.
    #[allow(dead_code)]
    pub config: Config,
}
