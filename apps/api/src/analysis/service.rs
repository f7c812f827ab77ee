//! Analysis workflows: extract and store resumes and jobs, then score a stored
//! pair. Handlers validate input; this layer owns lookups and ownership.

use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::analysis::store::{self, NewJob, NewResume};
use crate::errors::AppError;
use crate::extraction::Extractor;
use crate::models::analysis::AnalysisRow;
use crate::models::job::JobRow;
use crate::models::resume::ResumeRow;
use crate::scoring::{self, Job, Resume};

pub struct ResumeInput<'a> {
    pub user_id: Uuid,
    pub text: &'a str,
    pub file_url: Option<&'a str>,
    pub file_name: Option<&'a str>,
}

pub async fn analyze_resume(
    pool: &PgPool,
    extractor: &dyn Extractor,
    input: ResumeInput<'_>,
) -> Result<ResumeRow, AppError> {
    let parsed = extractor.extract_resume(input.text).await?;

    let row = store::insert_resume(
        pool,
        NewResume {
            user_id: input.user_id,
            text: input.text,
            file_url: input.file_url,
            file_name: input.file_name,
            parsed: &parsed,
            extracted_by: extractor.backend(),
        },
    )
    .await?;

    info!(
        resume_id = %row.id,
        user_id = %row.user_id,
        skills = row.skills.0.len(),
        "resume analyzed"
    );
    Ok(row)
}

pub async fn analyze_job(
    pool: &PgPool,
    extractor: &dyn Extractor,
    user_id: Uuid,
    text: &str,
) -> Result<JobRow, AppError> {
    let parsed = extractor.extract_job(text).await?;

    let row = store::insert_job(
        pool,
        NewJob {
            user_id,
            text,
            parsed: &parsed,
            extracted_by: extractor.backend(),
        },
    )
    .await?;

    info!(
        job_id = %row.id,
        user_id = %row.user_id,
        title = %row.title,
        "job analyzed"
    );
    Ok(row)
}

/// Scores a stored resume against a stored job, both owned by `user_id`,
/// and persists the result.
pub async fn analyze_compatibility(
    pool: &PgPool,
    user_id: Uuid,
    resume_id: Uuid,
    job_id: Uuid,
) -> Result<AnalysisRow, AppError> {
    let resume = store::get_resume(pool, resume_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Resume {resume_id} not found")))?;
    ensure_owner(resume.user_id, user_id, "Resume", resume_id)?;

    let job = store::get_job(pool, job_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {job_id} not found")))?;
    ensure_owner(job.user_id, user_id, "Job", job_id)?;

    let analysis = scoring::analyze(&Resume::from(resume), &Job::from(job));
    let row = store::insert_analysis(pool, user_id, resume_id, job_id, &analysis).await?;

    info!(
        analysis_id = %row.id,
        %resume_id,
        %job_id,
        overall_score = analysis.overall_score,
        gaps = analysis.gaps.len(),
        "compatibility analyzed"
    );
    Ok(row)
}

fn ensure_owner(owner: Uuid, requester: Uuid, kind: &str, id: Uuid) -> Result<(), AppError> {
    if owner == requester {
        Ok(())
    } else {
        Err(AppError::Forbidden(format!(
            "{kind} {id} does not belong to user {requester}"
        )))
    }
}
