//! Heuristic extraction: regex and vocabulary matching used when no LLM is
//! available. Deterministic and offline.

use std::collections::HashMap;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::AppError;
use crate::extraction::{Extractor, ParsedJob, ParsedResume};
use crate::scoring::{EducationEntry, ExperienceEntry, Keyword};

pub const DEFAULT_JOB_TITLE: &str = "Job Position";
const MAX_KEYWORDS: usize = 20;
/// Words this short or shorter are never keywords.
const SHORT_WORD_CHARS: usize = 4;

const JOB_SKILL_VOCABULARY: &[&str] = &[
    "javascript",
    "typescript",
    "python",
    "react",
    "node",
    "postgresql",
    "docker",
    "kubernetes",
    "aws",
    "git",
];

const RESUME_SKILL_VOCABULARY: &[&str] = &[
    "javascript",
    "typescript",
    "python",
    "java",
    "react",
    "vue",
    "angular",
    "node",
    "express",
    "nestjs",
    "postgresql",
    "mysql",
    "mongodb",
    "docker",
    "kubernetes",
    "aws",
    "azure",
    "git",
    "html",
    "css",
    "sass",
    "tailwind",
    "bootstrap",
];

const ROLE_MARKERS: &[&str] = &["developer", "engineer", "manager", "analyst", "designer"];
const DEGREE_MARKERS: &[&str] = &["bachelor", "master", "phd", "graduation"];

static TITLE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)(?:Job Title|Position|Title):\s*(.+)",
        r"(?:We are|Looking for|Seeking)\s+(?:a\s+)?(?:Senior\s+|Junior\s+|Mid-level\s+)?([A-Z][a-z]+(?:\s+[A-Z][a-z]+)*)",
        r"^([A-Z][a-z]+(?:\s+[A-Z][a-z]+)*)\s+(?:Developer|Engineer|Designer|Manager)",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("valid title regex"))
    .collect()
});

static COMPANY_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?:Company|About|at)\s+([A-Z][a-zA-Z\s&]+)",
        r"([A-Z][a-zA-Z\s&]{3,})\s+(?:is|seeks|looking)",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("valid company regex"))
    .collect()
});

/// Anything that is not an ASCII word character or whitespace.
static NON_WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^A-Za-z0-9_\s]").expect("valid non-word regex"));

/// Offline extractor built from the patterns above.
pub struct HeuristicExtractor;

#[async_trait]
impl Extractor for HeuristicExtractor {
    async fn extract_resume(&self, text: &str) -> Result<ParsedResume, AppError> {
        Ok(parse_resume(text))
    }

    async fn extract_job(&self, text: &str) -> Result<ParsedJob, AppError> {
        Ok(parse_job(text))
    }

    fn backend(&self) -> &'static str {
        "heuristic"
    }
}

pub fn parse_resume(text: &str) -> ParsedResume {
    ParsedResume {
        skills: find_skills(text, RESUME_SKILL_VOCABULARY),
        experience: find_experience(text),
        education: find_education(text),
    }
}

pub fn parse_job(text: &str) -> ParsedJob {
    let skills = find_skills(text, JOB_SKILL_VOCABULARY);
    ParsedJob {
        title: find_title(text),
        company: find_company(text),
        // Vocabulary matching cannot tell must-haves from nice-to-haves,
        // so every hit is listed as both.
        required_skills: skills.clone(),
        preferred_skills: skills,
        keywords: find_keywords(text),
        years_of_experience: None,
        description: text.to_string(),
    }
}

fn first_capture(patterns: &[Regex], text: &str) -> Option<String> {
    patterns.iter().find_map(|pattern| {
        pattern
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim().to_string())
            .filter(|s| !s.is_empty())
    })
}

fn find_title(text: &str) -> String {
    first_capture(&TITLE_PATTERNS, text).unwrap_or_else(|| DEFAULT_JOB_TITLE.to_string())
}

fn find_company(text: &str) -> Option<String> {
    first_capture(&COMPANY_PATTERNS, text)
}

/// Top keywords by frequency; ties keep first-seen order.
fn find_keywords(text: &str) -> Vec<Keyword> {
    let lowered = text.to_lowercase();
    let cleaned = NON_WORD.replace_all(&lowered, " ");

    let mut counts: Vec<Keyword> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();
    for word in cleaned
        .split_whitespace()
        .filter(|w| w.chars().count() > SHORT_WORD_CHARS)
    {
        match index.get(word) {
            Some(&i) => counts[i].frequency += 1,
            None => {
                index.insert(word, counts.len());
                counts.push(Keyword {
                    word: word.to_string(),
                    frequency: 1,
                });
            }
        }
    }

    counts.sort_by(|a, b| b.frequency.cmp(&a.frequency));
    counts.truncate(MAX_KEYWORDS);
    counts
}

/// Vocabulary entries contained in the text, capitalized, in vocabulary order.
fn find_skills(text: &str, vocabulary: &[&str]) -> Vec<String> {
    let lowered = text.to_lowercase();
    let mut found: Vec<String> = Vec::new();
    for skill in vocabulary.iter().filter(|s| lowered.contains(*s)) {
        let skill = capitalize(skill);
        if !found.contains(&skill) {
            found.push(skill);
        }
    }
    found
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// A line naming a role, followed by a non-empty line taken as the company.
fn find_experience(text: &str) -> Vec<ExperienceEntry> {
    let lines: Vec<&str> = text.split('\n').collect();
    let mut experience = Vec::new();

    for (i, raw) in lines.iter().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        let lower = line.to_lowercase();
        if !ROLE_MARKERS.iter().any(|m| lower.contains(m)) {
            continue;
        }
        if let Some(company) = next_line_if_nonblank(&lines, i) {
            experience.push(ExperienceEntry {
                title: line.to_string(),
                company: company.to_string(),
                ..Default::default()
            });
        }
    }

    experience
}

/// A line naming a degree, followed by a non-empty line taken as the institution.
fn find_education(text: &str) -> Vec<EducationEntry> {
    let lines: Vec<&str> = text.split('\n').collect();
    let mut education = Vec::new();

    for (i, raw) in lines.iter().enumerate() {
        if raw.is_empty() {
            continue;
        }
        let lower = raw.trim().to_lowercase();
        if !DEGREE_MARKERS.iter().any(|m| lower.contains(m)) {
            continue;
        }
        if let Some(institution) = next_line_if_nonblank(&lines, i) {
            education.push(EducationEntry {
                degree: raw.trim().to_string(),
                institution: institution.to_string(),
                ..Default::default()
            });
        }
    }

    education
}

/// The line after `i`, trimmed, if it has content.
fn next_line_if_nonblank<'a>(lines: &[&'a str], i: usize) -> Option<&'a str> {
    lines
        .get(i + 1)
        .copied()
        .map(str::trim)
        .filter(|l| !l.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    const JOB_TEXT: &str = "Job Title: Senior Backend Engineer\n\
        Acme Robotics is hiring. We build robots with Python and Docker.\n\
        Required: Python, Docker, Kubernetes. Robots robots robots.";

    const RESUME_TEXT: &str = "Jane Doe\n\
        \n\
        Senior Software Engineer\n\
        Acme Robotics\n\
        Built JavaScript and TypeScript services on AWS.\n\
        \n\
        Bachelor of Science in Computer Science\n\
        State University\n";

    #[test]
    fn test_title_from_explicit_label() {
        assert_eq!(find_title(JOB_TEXT), "Senior Backend Engineer");
    }

    #[test]
    fn test_title_from_seeking_phrase_skips_seniority() {
        let text = "Seeking a Senior Data Scientist to join us.";
        assert_eq!(find_title(text), "Data Scientist");
    }

    #[test]
    fn test_title_defaults_when_no_pattern_matches() {
        assert_eq!(find_title("build things with us"), DEFAULT_JOB_TITLE);
    }

    #[test]
    fn test_company_from_is_phrase() {
        let text = "Northwind Traders is growing fast.";
        assert_eq!(find_company(text), Some("Northwind Traders".to_string()));
    }

    #[test]
    fn test_company_absent() {
        assert_eq!(find_company("remote role, great pay"), None);
    }

    #[test]
    fn test_keywords_sorted_by_frequency_with_first_seen_ties() {
        let keywords = find_keywords(JOB_TEXT);
        assert_eq!(keywords[0].word, "robots");
        assert_eq!(keywords[0].frequency, 4);
        assert_eq!(keywords[1].word, "python");
        assert_eq!(keywords[1].frequency, 2);
        assert!(keywords.iter().all(|k| k.word.chars().count() > 4));
        assert!(keywords.iter().all(|k| !k.word.contains(',')));
    }

    #[test]
    fn test_keywords_capped_at_twenty() {
        let text: String = (0..30).map(|i| format!("keyword{i:02} ")).collect();
        assert_eq!(find_keywords(&text).len(), MAX_KEYWORDS);
    }

    #[test]
    fn test_job_skills_fill_required_and_preferred() {
        let job = parse_job(JOB_TEXT);
        assert_eq!(job.required_skills, vec!["Python", "Docker", "Kubernetes"]);
        assert_eq!(job.preferred_skills, job.required_skills);
        assert_eq!(job.description, JOB_TEXT);
    }

    #[test]
    fn test_missing_job_skill_yields_high_and_medium_gap() {
        use crate::scoring::{analyze, Importance, Job, Resume};

        let parsed = parse_job("Job Title: Platform Engineer\nWe run Docker.");
        let job = Job {
            required_skills: parsed.required_skills,
            preferred_skills: parsed.preferred_skills,
            keywords: Vec::new(),
            description: parsed.description,
        };
        let analysis = analyze(&Resume::default(), &job);
        let importances: Vec<Importance> = analysis
            .gaps
            .iter()
            .filter(|g| g.missing == "Docker")
            .map(|g| g.importance)
            .collect();
        assert_eq!(importances, vec![Importance::High, Importance::Medium]);
    }

    #[test]
    fn test_resume_skills_include_substring_hits() {
        let resume = parse_resume(RESUME_TEXT);
        // "java" is contained in "javascript"
        assert_eq!(
            resume.skills,
            vec!["Javascript", "Typescript", "Java", "Aws"]
        );
    }

    #[test]
    fn test_resume_experience_takes_next_line_as_company() {
        let resume = parse_resume(RESUME_TEXT);
        assert_eq!(resume.experience.len(), 1);
        assert_eq!(resume.experience[0].title, "Senior Software Engineer");
        assert_eq!(resume.experience[0].company, "Acme Robotics");
    }

    #[test]
    fn test_resume_education_takes_next_line_as_institution() {
        let resume = parse_resume(RESUME_TEXT);
        assert_eq!(resume.education.len(), 1);
        assert_eq!(
            resume.education[0].degree,
            "Bachelor of Science in Computer Science"
        );
        assert_eq!(resume.education[0].institution, "State University");
    }

    #[test]
    fn test_role_line_only_looks_at_the_very_next_line() {
        let resume = parse_resume("Staff Engineer\n\nGlobex");
        assert!(resume.experience.is_empty());
    }

    #[test]
    fn test_constant_patterns_all_compile() {
        assert_eq!(TITLE_PATTERNS.len(), 3);
        assert_eq!(COMPANY_PATTERNS.len(), 2);
        assert_eq!(NON_WORD.replace_all("c++, go!", " "), "c    go ");
    }

    #[test]
    fn test_role_line_without_following_line_is_skipped() {
        let resume = parse_resume("Lead Engineer");
        assert!(resume.experience.is_empty());
    }
}
