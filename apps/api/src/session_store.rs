//! Session persistence and per-session turn serialization.
//!
//! Sessions are stored as JSONB rows keyed by interview id. The ledger
//! mutators are not safe under concurrent access, so the store hands out a
//! per-session async mutex; a turn holds it from load to save. Different
//! sessions proceed in parallel.

use std::collections::HashMap;
use std::sync::Arc;

use sqlx::PgPool;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::resume::ResumeRecordRow;
use crate::models::session::{CvData, Session};

pub struct SessionStore {
    db: PgPool,
    locks: Mutex<HashMap<Uuid, Arc<Mutex<()>>>>,
}

impl SessionStore {
    pub fn new(db: PgPool) -> Self {
        Self {
            db,
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// The turn-serialization lock for one interview. Hold it across the
    /// whole turn (load → dispatch → save).
    pub async fn turn_lock(&self, id: Uuid) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().await;
        locks.entry(id).or_insert_with(|| Arc::new(Mutex::new(()))).clone()
    }

    pub async fn load(&self, id: Uuid) -> Result<Option<Session>, AppError> {
        let row: Option<(serde_json::Value,)> =
            sqlx::query_as("SELECT data FROM interview_sessions WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.db)
                .await?;

        match row {
            Some((data,)) => {
                let session = serde_json::from_value(data)
                    .map_err(|e| anyhow::anyhow!("corrupt session record {id}: {e}"))?;
                Ok(Some(session))
            }
            None => Ok(None),
        }
    }

    /// Upserts the session. Called exactly once per successful turn — a
    /// failed turn commits nothing and the prior state is retained.
    pub async fn save(&self, session: &Session) -> Result<(), AppError> {
        let data = serde_json::to_value(session)
            .map_err(|e| anyhow::anyhow!("serialize session {}: {e}", session.id))?;

        sqlx::query(
            r#"
            INSERT INTO interview_sessions (id, data, updated_at)
            VALUES ($1, $2, now())
            ON CONFLICT (id) DO UPDATE SET data = EXCLUDED.data, updated_at = now()
            "#,
        )
        .bind(session.id)
        .bind(data)
        .execute(&self.db)
        .await?;

        Ok(())
    }
}

/// Reads the parsed resume record for a candidate. The record is owned by
/// the upstream ingestion pipeline; the interview core only consumes it.
pub async fn load_cv_data(db: &PgPool, candidate_id: Uuid) -> Result<Option<CvData>, AppError> {
    let row: Option<ResumeRecordRow> = sqlx::query_as(
        "SELECT candidate_id, cv_data, created_at FROM resume_records WHERE candidate_id = $1",
    )
    .bind(candidate_id)
    .fetch_optional(db)
    .await?;

    match row {
        Some(record) => {
            let cv = serde_json::from_value(record.cv_data)
                .map_err(|e| anyhow::anyhow!("corrupt resume record {candidate_id}: {e}"))?;
            Ok(Some(cv))
        }
        None => Ok(None),
    }
}
