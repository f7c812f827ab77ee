use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use crate::scoring::{Gap, Recommendation, ScoreBreakdown};

/// A stored compatibility analysis of one resume against one job.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AnalysisRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub resume_id: Uuid,
    pub job_id: Uuid,
    pub overall_score: i32,
    pub breakdown: Json<ScoreBreakdown>,
    pub gaps: Json<Vec<Gap>>,
    pub recommendations: Json<Vec<Recommendation>>,
    pub created_at: DateTime<Utc>,
}
