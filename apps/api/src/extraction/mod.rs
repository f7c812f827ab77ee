//! Extraction: turns raw resume and job text into the shapes the scoring engine consumes.
//!
//! Two strategies sit behind the [`Extractor`] trait:
//! - `LlmExtractor`: structured extraction through the configured provider.
//! - `HeuristicExtractor`: regex and vocabulary matching, no network.
//!
//! `FallbackExtractor` composes them: it tries the LLM when one is configured
//! and falls back to the heuristics when it is not, or when the call fails.
//! `AppState` holds an `Arc<dyn Extractor>` built once by [`build_extractor`].

pub mod heuristic;
pub mod llm;
pub mod prompts;

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::errors::AppError;
use crate::llm_client::{LlmClient, LlmProvider};
use crate::scoring::{EducationEntry, ExperienceEntry, Keyword};

pub use heuristic::HeuristicExtractor;
pub use llm::LlmExtractor;

/// Structured fields extracted from resume text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedResume {
    pub skills: Vec<String>,
    pub experience: Vec<ExperienceEntry>,
    pub education: Vec<EducationEntry>,
}

/// Structured fields extracted from a job posting.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedJob {
    pub title: String,
    pub company: Option<String>,
    pub required_skills: Vec<String>,
    pub preferred_skills: Vec<String>,
    pub keywords: Vec<Keyword>,
    pub years_of_experience: Option<u32>,
    pub description: String,
}

/// An extraction strategy. Implement this to swap backends without touching
/// handlers or the scoring engine.
#[async_trait]
pub trait Extractor: Send + Sync {
    async fn extract_resume(&self, text: &str) -> Result<ParsedResume, AppError>;

    async fn extract_job(&self, text: &str) -> Result<ParsedJob, AppError>;

    /// Label for logs and diagnostics.
    fn backend(&self) -> &'static str;
}

/// Tries the primary extractor, if any, then the heuristics.
pub struct FallbackExtractor {
    primary: Option<Box<dyn Extractor>>,
    fallback: HeuristicExtractor,
}

impl FallbackExtractor {
    pub fn new(primary: Option<Box<dyn Extractor>>) -> Self {
        Self {
            primary,
            fallback: HeuristicExtractor,
        }
    }
}

#[async_trait]
impl Extractor for FallbackExtractor {
    async fn extract_resume(&self, text: &str) -> Result<ParsedResume, AppError> {
        let Some(primary) = &self.primary else {
            warn!("No AI provider configured; using heuristic resume extraction");
            return self.fallback.extract_resume(text).await;
        };

        match primary.extract_resume(text).await {
            Ok(parsed) => {
                info!(
                    backend = primary.backend(),
                    skills = parsed.skills.len(),
                    experience = parsed.experience.len(),
                    education = parsed.education.len(),
                    "resume extracted"
                );
                Ok(parsed)
            }
            Err(e) => {
                error!(backend = primary.backend(), "Resume extraction failed, using fallback: {e}");
                self.fallback.extract_resume(text).await
            }
        }
    }

    async fn extract_job(&self, text: &str) -> Result<ParsedJob, AppError> {
        let Some(primary) = &self.primary else {
            warn!("No AI provider configured; using heuristic job extraction");
            return self.fallback.extract_job(text).await;
        };

        match primary.extract_job(text).await {
            Ok(parsed) => {
                info!(
                    backend = primary.backend(),
                    title = %parsed.title,
                    required_skills = parsed.required_skills.len(),
                    preferred_skills = parsed.preferred_skills.len(),
                    keywords = parsed.keywords.len(),
                    "job extracted"
                );
                Ok(parsed)
            }
            Err(e) => {
                error!(backend = primary.backend(), "Job extraction failed, using fallback: {e}");
                self.fallback.extract_job(text).await
            }
        }
    }

    fn backend(&self) -> &'static str {
        self.primary
            .as_ref()
            .map(|p| p.backend())
            .unwrap_or(self.fallback.backend())
    }
}

/// Builds the extraction strategy for the configured provider.
pub fn build_extractor(provider: Option<&LlmProvider>) -> anyhow::Result<Arc<dyn Extractor>> {
    let primary: Option<Box<dyn Extractor>> = match provider {
        Some(provider) => {
            info!(
                "LLM extraction enabled (provider: {}, model: {})",
                provider.name(),
                provider.model()
            );
            let client = LlmClient::new(provider.clone())?;
            Some(Box::new(LlmExtractor::new(client)))
        }
        None => {
            warn!(
                "No AI provider configured. Using heuristic extraction. Set ANTHROPIC_API_KEY, \
                 OPENAI_API_KEY, or GROQ_API_KEY to enable AI extraction."
            );
            None
        }
    };
    Ok(Arc::new(FallbackExtractor::new(primary)))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Always fails, to exercise the fallback path.
    struct FailingExtractor;

    #[async_trait]
    impl Extractor for FailingExtractor {
        async fn extract_resume(&self, _text: &str) -> Result<ParsedResume, AppError> {
            Err(AppError::Llm("provider unavailable".to_string()))
        }

        async fn extract_job(&self, _text: &str) -> Result<ParsedJob, AppError> {
            Err(AppError::Llm("provider unavailable".to_string()))
        }

        fn backend(&self) -> &'static str {
            "failing"
        }
    }

    /// Returns fixed output, to check the primary result is passed through.
    struct FixedExtractor;

    #[async_trait]
    impl Extractor for FixedExtractor {
        async fn extract_resume(&self, _text: &str) -> Result<ParsedResume, AppError> {
            Ok(ParsedResume {
                skills: vec!["Haskell".to_string()],
                ..Default::default()
            })
        }

        async fn extract_job(&self, _text: &str) -> Result<ParsedJob, AppError> {
            Ok(ParsedJob {
                title: "Fixed".to_string(),
                ..Default::default()
            })
        }

        fn backend(&self) -> &'static str {
            "fixed"
        }
    }

    const RESUME: &str = "Jane Doe\nSenior Developer\nAcme Corp\nSkills: Python, Docker";

    #[tokio::test]
    async fn test_failing_primary_falls_back_to_heuristics() {
        let extractor = FallbackExtractor::new(Some(Box::new(FailingExtractor)));
        let parsed = extractor.extract_resume(RESUME).await.unwrap();
        assert!(parsed.skills.contains(&"Python".to_string()));
        assert_eq!(parsed.experience[0].company, "Acme Corp");
    }

    #[tokio::test]
    async fn test_missing_primary_uses_heuristics() {
        let extractor = FallbackExtractor::new(None);
        let job = extractor
            .extract_job("Job Title: Platform Engineer\nWe use Docker and AWS.")
            .await
            .unwrap();
        assert_eq!(job.title, "Platform Engineer");
        assert_eq!(extractor.backend(), "heuristic");
    }

    #[tokio::test]
    async fn test_successful_primary_result_is_returned() {
        let extractor = FallbackExtractor::new(Some(Box::new(FixedExtractor)));
        let parsed = extractor.extract_resume(RESUME).await.unwrap();
        assert_eq!(parsed.skills, vec!["Haskell".to_string()]);
        assert_eq!(extractor.backend(), "fixed");
    }

    #[test]
    fn test_build_extractor_without_provider_is_heuristic() {
        let extractor = build_extractor(None).unwrap();
        assert_eq!(extractor.backend(), "heuristic");
    }
}
