#![allow(dead_code)]

use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// A parsed resume record, owned by the upstream ingestion pipeline.
/// The interview core only ever reads these.
#[derive(Debug, Clone, FromRow)]
pub struct ResumeRecordRow {
    pub candidate_id: Uuid,
    pub cv_data: Value,
    pub created_at: DateTime<Utc>,
}
