//! Database access for resumes, jobs and analyses.
//! Ids are generated here; timestamps are set by the database.

use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::extraction::{ParsedJob, ParsedResume};
use crate::models::analysis::AnalysisRow;
use crate::models::job::JobRow;
use crate::models::resume::ResumeRow;
use crate::scoring::Analysis;

/// Everything needed to store a freshly extracted resume.
pub struct NewResume<'a> {
    pub user_id: Uuid,
    pub text: &'a str,
    pub file_url: Option<&'a str>,
    pub file_name: Option<&'a str>,
    pub parsed: &'a ParsedResume,
    pub extracted_by: &'a str,
}

/// Everything needed to store a freshly extracted job.
pub struct NewJob<'a> {
    pub user_id: Uuid,
    pub text: &'a str,
    pub parsed: &'a ParsedJob,
    pub extracted_by: &'a str,
}

pub async fn insert_resume(pool: &PgPool, new: NewResume<'_>) -> sqlx::Result<ResumeRow> {
    sqlx::query_as::<_, ResumeRow>(
        r#"
        INSERT INTO resumes
            (id, user_id, text, file_url, file_name, skills, experience, education, extracted_by)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(new.user_id)
    .bind(new.text)
    .bind(new.file_url)
    .bind(new.file_name)
    .bind(Json(&new.parsed.skills))
    .bind(Json(&new.parsed.experience))
    .bind(Json(&new.parsed.education))
    .bind(new.extracted_by)
    .fetch_one(pool)
    .await
}

pub async fn get_resume(pool: &PgPool, id: Uuid) -> sqlx::Result<Option<ResumeRow>> {
    sqlx::query_as::<_, ResumeRow>("SELECT * FROM resumes WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn insert_job(pool: &PgPool, new: NewJob<'_>) -> sqlx::Result<JobRow> {
    let years = new
        .parsed
        .years_of_experience
        .and_then(|y| i32::try_from(y).ok());

    sqlx::query_as::<_, JobRow>(
        r#"
        INSERT INTO jobs
            (id, user_id, title, company, text, description,
             required_skills, preferred_skills, keywords, years_of_experience, extracted_by)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(new.user_id)
    .bind(&new.parsed.title)
    .bind(new.parsed.company.as_deref())
    .bind(new.text)
    .bind(&new.parsed.description)
    .bind(Json(&new.parsed.required_skills))
    .bind(Json(&new.parsed.preferred_skills))
    .bind(Json(&new.parsed.keywords))
    .bind(years)
    .bind(new.extracted_by)
    .fetch_one(pool)
    .await
}

pub async fn get_job(pool: &PgPool, id: Uuid) -> sqlx::Result<Option<JobRow>> {
    sqlx::query_as::<_, JobRow>("SELECT * FROM jobs WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn insert_analysis(
    pool: &PgPool,
    user_id: Uuid,
    resume_id: Uuid,
    job_id: Uuid,
    analysis: &Analysis,
) -> sqlx::Result<AnalysisRow> {
    // Scores are bounded to 0..=100.
    let overall_score = i32::try_from(analysis.overall_score).unwrap_or(i32::MAX);

    sqlx::query_as::<_, AnalysisRow>(
        r#"
        INSERT INTO analyses
            (id, user_id, resume_id, job_id, overall_score, breakdown, gaps, recommendations)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(resume_id)
    .bind(job_id)
    .bind(overall_score)
    .bind(Json(&analysis.breakdown))
    .bind(Json(&analysis.gaps))
    .bind(Json(&analysis.recommendations))
    .fetch_one(pool)
    .await
}

pub async fn get_analysis(pool: &PgPool, id: Uuid) -> sqlx::Result<Option<AnalysisRow>> {
    sqlx::query_as::<_, AnalysisRow>("SELECT * FROM analyses WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}
