//! LLM-backed extraction. Model output is decoded into lenient raw shapes first,
//! then normalized, so minor schema drift does not fail the whole request.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

use crate::errors::AppError;
use crate::extraction::heuristic::DEFAULT_JOB_TITLE;
use crate::extraction::prompts::{EXTRACTION_SYSTEM, JOB_EXTRACTION_PROMPT, RESUME_EXTRACTION_PROMPT};
use crate::extraction::{Extractor, ParsedJob, ParsedResume};
use crate::llm_client::prompts::{FIELD_RULES_INSTRUCTION, JSON_ONLY_SYSTEM};
use crate::llm_client::LlmClient;
use crate::scoring::{EducationEntry, ExperienceEntry, Keyword};

static DATE_RANGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(\d{4})\s*-\s*(\d{4}|presente|present|atual|current)")
        .expect("valid date range regex")
});

static SINGLE_YEAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d{4}").expect("valid single year regex"));

static CURRENT_MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)presente|present|atual|current").expect("valid current marker regex")
});

pub struct LlmExtractor {
    llm: LlmClient,
}

impl LlmExtractor {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }

    fn system_prompt() -> String {
        format!("{EXTRACTION_SYSTEM}\n\n{JSON_ONLY_SYSTEM}")
    }
}

#[async_trait]
impl Extractor for LlmExtractor {
    async fn extract_resume(&self, text: &str) -> Result<ParsedResume, AppError> {
        let prompt = format!(
            "{}\n\n{FIELD_RULES_INSTRUCTION}",
            RESUME_EXTRACTION_PROMPT.replace("{resume_text}", text)
        );
        let raw: RawResume = self
            .llm
            .call_json(&prompt, &Self::system_prompt())
            .await
            .map_err(|e| AppError::Llm(e.to_string()))?;
        Ok(raw.into_parsed())
    }

    async fn extract_job(&self, text: &str) -> Result<ParsedJob, AppError> {
        let prompt = format!(
            "{}\n\n{FIELD_RULES_INSTRUCTION}",
            JOB_EXTRACTION_PROMPT.replace("{job_text}", text)
        );
        let raw: RawJob = self
            .llm
            .call_json(&prompt, &Self::system_prompt())
            .await
            .map_err(|e| AppError::Llm(e.to_string()))?;
        Ok(raw.into_parsed(text))
    }

    fn backend(&self) -> &'static str {
        self.llm.provider().name()
    }
}

// ── Raw model output ───────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawResume {
    skills: Option<Vec<String>>,
    experience: Option<Vec<RawExperience>>,
    education: Option<Vec<RawEducation>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawExperience {
    title: Option<String>,
    company: Option<String>,
    start_date: Option<String>,
    end_date: Option<String>,
    description: Option<String>,
    /// Some models collapse both dates into one "2019 - Present" field.
    /// When present it replaces `start_date` and `end_date`.
    dates: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawEducation {
    degree: Option<String>,
    institution: Option<String>,
    field: Option<String>,
    graduation_date: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawJob {
    title: Option<String>,
    company: Option<String>,
    required_skills: Option<Vec<String>>,
    preferred_skills: Option<Vec<String>>,
    keywords: Option<Vec<RawKeyword>>,
    years_of_experience: Option<f64>,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawKeyword {
    Word(String),
    Counted {
        word: String,
        #[serde(default)]
        frequency: Option<f64>,
    },
}

impl RawResume {
    fn into_parsed(self) -> ParsedResume {
        ParsedResume {
            skills: self.skills.unwrap_or_default(),
            experience: self
                .experience
                .unwrap_or_default()
                .into_iter()
                .map(RawExperience::into_entry)
                .collect(),
            education: self
                .education
                .unwrap_or_default()
                .into_iter()
                .map(RawEducation::into_entry)
                .collect(),
        }
    }
}

impl RawExperience {
    fn into_entry(self) -> ExperienceEntry {
        let (start_date, end_date) = match self.dates {
            Some(dates) => parse_date_range(&dates),
            None => (self.start_date, self.end_date),
        };
        ExperienceEntry {
            title: self.title.unwrap_or_default(),
            company: self.company.unwrap_or_default(),
            start_date,
            end_date,
            description: self.description,
        }
    }
}

impl RawEducation {
    fn into_entry(self) -> EducationEntry {
        EducationEntry {
            degree: self.degree.unwrap_or_default(),
            institution: self.institution.unwrap_or_default(),
            field: self.field,
            graduation_date: self.graduation_date,
        }
    }
}

impl RawJob {
    fn into_parsed(self, raw_text: &str) -> ParsedJob {
        ParsedJob {
            title: self
                .title
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| DEFAULT_JOB_TITLE.to_string()),
            company: self.company.filter(|c| !c.trim().is_empty()),
            required_skills: self.required_skills.unwrap_or_default(),
            preferred_skills: self.preferred_skills.unwrap_or_default(),
            keywords: self
                .keywords
                .unwrap_or_default()
                .into_iter()
                .map(RawKeyword::into_keyword)
                .collect(),
            years_of_experience: self.years_of_experience.map(whole_count),
            description: self
                .description
                .filter(|d| !d.trim().is_empty())
                .unwrap_or_else(|| raw_text.to_string()),
        }
    }
}

impl RawKeyword {
    fn into_keyword(self) -> Keyword {
        match self {
            RawKeyword::Word(word) => Keyword { word, frequency: 1 },
            RawKeyword::Counted { word, frequency } => Keyword {
                word,
                frequency: frequency.map(whole_count).unwrap_or(1),
            },
        }
    }
}

/// Rounds a model-supplied count to a non-negative integer.
fn whole_count(value: f64) -> u32 {
    if value.is_finite() {
        value.round().clamp(0.0, u32::MAX as f64) as u32
    } else {
        0
    }
}

/// Splits "2019 - 2022" or "2019 - Present" into start and end dates.
/// A lone year is both start and end. An ongoing position has no end date.
fn parse_date_range(dates: &str) -> (Option<String>, Option<String>) {
    let is_current = CURRENT_MARKER.is_match(dates);

    if let Some(caps) = DATE_RANGE.captures(dates) {
        let start = caps.get(1).map(|m| m.as_str().to_string());
        let end = if is_current {
            None
        } else {
            caps.get(2).map(|m| m.as_str().to_string())
        };
        return (start, end);
    }

    match SINGLE_YEAR.find(dates) {
        Some(year) => {
            let year = year.as_str().to_string();
            let end = (!is_current).then(|| year.clone());
            (Some(year), end)
        }
        None => (None, None),
    }
}
