use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use crate::scoring::{Job, Keyword};

/// A stored job posting and its extracted requirements.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub company: Option<String>,
    pub text: String,
    pub description: String,
    pub required_skills: Json<Vec<String>>,
    pub preferred_skills: Json<Vec<String>>,
    pub keywords: Json<Vec<Keyword>>,
    pub years_of_experience: Option<i32>,
    pub extracted_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<JobRow> for Job {
    fn from(row: JobRow) -> Self {
        Job {
            required_skills: row.required_skills.0,
            preferred_skills: row.preferred_skills.0,
            keywords: row.keywords.0,
            description: row.description,
        }
    }
}
