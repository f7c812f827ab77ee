//! Axum route handlers for the Analysis API.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::analysis::service::{self, ResumeInput};
use crate::analysis::store;
use crate::errors::AppError;
use crate::models::analysis::AnalysisRow;
use crate::models::job::JobRow;
use crate::models::resume::ResumeRow;
use crate::scoring::{self, Analysis, Job, Resume};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct AnalyzeResumeRequest {
    pub user_id: Uuid,
    pub text: String,
    pub file_url: Option<String>,
    pub file_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeJobRequest {
    pub user_id: Uuid,
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct CompatibilityRequest {
    pub user_id: Uuid,
    pub resume_id: Uuid,
    pub job_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct ScoreRequest {
    pub resume: Resume,
    pub job: Job,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/analysis/resume
///
/// Extracts skills, experience and education from resume text and stores them.
pub async fn handle_analyze_resume(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeResumeRequest>,
) -> Result<Json<ResumeRow>, AppError> {
    if request.text.trim().is_empty() {
        return Err(AppError::Validation("text cannot be empty".to_string()));
    }

    let row = service::analyze_resume(
        &state.db,
        state.extractor.as_ref(),
        ResumeInput {
            user_id: request.user_id,
            text: &request.text,
            file_url: request.file_url.as_deref(),
            file_name: request.file_name.as_deref(),
        },
    )
    .await?;

    Ok(Json(row))
}

/// GET /api/v1/analysis/resume/:id
pub async fn handle_get_resume(
    State(state): State<AppState>,
    Path(resume_id): Path<Uuid>,
) -> Result<Json<ResumeRow>, AppError> {
    let row = store::get_resume(&state.db, resume_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Resume {resume_id} not found")))?;
    Ok(Json(row))
}

/// POST /api/v1/analysis/job
///
/// Extracts title, skills and keywords from a job posting and stores them.
pub async fn handle_analyze_job(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeJobRequest>,
) -> Result<Json<JobRow>, AppError> {
    if request.text.trim().is_empty() {
        return Err(AppError::Validation("text cannot be empty".to_string()));
    }

    let row = service::analyze_job(
        &state.db,
        state.extractor.as_ref(),
        request.user_id,
        &request.text,
    )
    .await?;

    Ok(Json(row))
}

/// GET /api/v1/analysis/job/:id
pub async fn handle_get_job(
    State(state): State<AppState>,
    Path(job_id): Path<Uuid>,
) -> Result<Json<JobRow>, AppError> {
    let row = store::get_job(&state.db, job_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {job_id} not found")))?;
    Ok(Json(row))
}

/// POST /api/v1/analysis/compatibility
///
/// Scores a stored resume against a stored job. Both must belong to `user_id`.
pub async fn handle_compatibility(
    State(state): State<AppState>,
    Json(request): Json<CompatibilityRequest>,
) -> Result<Json<AnalysisRow>, AppError> {
    let row = service::analyze_compatibility(
        &state.db,
        request.user_id,
        request.resume_id,
        request.job_id,
    )
    .await?;

    Ok(Json(row))
}

/// GET /api/v1/analysis/compatibility/:id
pub async fn handle_get_compatibility(
    State(state): State<AppState>,
    Path(analysis_id): Path<Uuid>,
) -> Result<Json<AnalysisRow>, AppError> {
    let row = store::get_analysis(&state.db, analysis_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Analysis {analysis_id} not found")))?;
    Ok(Json(row))
}

/// POST /api/v1/analysis/score
///
/// Runs the engine on caller-supplied inputs. Nothing is stored.
pub async fn handle_score(Json(request): Json<ScoreRequest>) -> Json<Analysis> {
    Json(scoring::analyze(&request.resume, &request.job))
}
