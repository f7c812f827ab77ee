use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use crate::scoring::{EducationEntry, ExperienceEntry, Resume};

/// A stored resume: the raw text plus the fields extracted from it.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ResumeRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub text: String,
    pub file_url: Option<String>,
    pub file_name: Option<String>,
    pub skills: Json<Vec<String>>,
    pub experience: Json<Vec<ExperienceEntry>>,
    pub education: Json<Vec<EducationEntry>>,
    pub extracted_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ResumeRow> for Resume {
    fn from(row: ResumeRow) -> Self {
        Resume {
            skills: row.skills.0,
            experience: row.experience.0,
            education: row.education.0,
            text: row.text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_converts_to_engine_resume() {
        let row = ResumeRow {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            text: "Rust engineer".to_string(),
            file_url: None,
            file_name: None,
            skills: Json(vec!["Rust".to_string()]),
            experience: Json(vec![ExperienceEntry {
                title: "Engineer".to_string(),
                company: "Acme".to_string(),
                ..Default::default()
            }]),
            education: Json(Vec::new()),
            extracted_by: "heuristic".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let resume = Resume::from(row);
        assert_eq!(resume.skills, vec!["Rust"]);
        assert_eq!(resume.experience[0].company, "Acme");
        assert_eq!(resume.text, "Rust engineer");
    }

    #[test]
    fn test_row_serializes_lists_as_plain_arrays() {
        let row = ResumeRow {
            id: Uuid::nil(),
            user_id: Uuid::nil(),
            text: String::new(),
            file_url: Some("https://files.example/cv.pdf".to_string()),
            file_name: None,
            skills: Json(vec!["Go".to_string()]),
            experience: Json(Vec::new()),
            education: Json(Vec::new()),
            extracted_by: "anthropic".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let value = serde_json::to_value(&row).unwrap();
        assert_eq!(value["skills"], serde_json::json!(["Go"]));
        assert_eq!(value["file_url"], "https://files.example/cv.pdf");
    }
}
