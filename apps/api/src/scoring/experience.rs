use std::collections::HashSet;

use crate::scoring::models::ExperienceEntry;
use crate::scoring::text::{normalize, overlap_ratio, round_score, tokens_longer_than};

/// Tokens of four characters or fewer are ignored for overlap.
const MIN_TOKEN_CHARS: usize = 4;
const COMPONENT_MAX: f64 = 50.0;

/// Experience relevance, 0–100: the mean per-entry relevance.
///
/// Each entry earns up to 50 for mentioning required skills and up to 50 for
/// vocabulary shared with the job description. No experience scores 0.
pub fn experience_score(
    experience: &[ExperienceEntry],
    required_skills: &[String],
    job_description: &str,
) -> u32 {
    if experience.is_empty() {
        return 0;
    }

    let job_text = normalize(job_description);
    let job_tokens: HashSet<&str> = tokens_longer_than(&job_text, MIN_TOKEN_CHARS)
        .into_iter()
        .collect();
    let skills: Vec<String> = required_skills.iter().map(|s| normalize(s)).collect();

    let total: f64 = experience
        .iter()
        .map(|entry| entry_relevance(entry, &skills, &job_tokens))
        .sum();

    round_score(total / experience.len() as f64)
}

fn entry_relevance(
    entry: &ExperienceEntry,
    normalized_skills: &[String],
    job_tokens: &HashSet<&str>,
) -> f64 {
    let text = normalize(&format!(
        "{} {}",
        entry.title,
        entry.description.as_deref().unwrap_or("")
    ));

    let mut relevance = 0.0;

    if !normalized_skills.is_empty() {
        let mentioned = normalized_skills
            .iter()
            .filter(|skill| text.contains(skill.as_str()))
            .count();
        relevance += mentioned as f64 / normalized_skills.len() as f64 * COMPONENT_MAX;
    }

    let entry_tokens = tokens_longer_than(&text, MIN_TOKEN_CHARS);
    let overlap = overlap_ratio(&entry_tokens, job_tokens).unwrap_or(0.0);
    relevance += (overlap * COMPONENT_MAX).min(COMPONENT_MAX);

    relevance.min(100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(title: &str, description: Option<&str>) -> ExperienceEntry {
        ExperienceEntry {
            title: title.to_string(),
            company: "Acme".to_string(),
            start_date: None,
            end_date: None,
            description: description.map(String::from),
        }
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_empty_experience_scores_zero() {
        assert_eq!(
            experience_score(&[], &strings(&["Rust"]), "Rust backend engineer"),
            0
        );
    }

    #[test]
    fn test_full_skill_match_with_partial_token_overlap_scores_88() {
        let experience = vec![entry("Backend Engineer", Some("Built services in rust"))];
        // entry tokens >4 chars: backend, engineer, built, services → all in job text
        let score = experience_score(
            &experience,
            &strings(&["Rust"]),
            "Backend engineer: built services with Rust",
        );
        // "engineer:" in the job text is a distinct token, so 3/4 overlap
        // skills 50 + 37.5 = 87.5 → 88
        assert_eq!(score, 88);
    }

    #[test]
    fn test_no_required_skills_contributes_only_overlap() {
        let experience = vec![entry("Platform engineer", None)];
        let score = experience_score(&experience, &[], "We need a platform engineer");
        // tokens: platform, engineer → both in job → 50
        assert_eq!(score, 50);
    }

    #[test]
    fn test_entry_without_long_tokens_gets_zero_overlap() {
        let experience = vec![entry("Dev", Some("Go"))];
        let score = experience_score(&experience, &strings(&["go"]), "Go developer");
        // skill "go" found → 50, no tokens >4 chars → 0
        assert_eq!(score, 50);
    }

    #[test]
    fn test_mean_over_entries() {
        let experience = vec![
            entry("Rust developer", Some("rust")),
            entry("Barista", Some("coffee")),
        ];
        // entry 1: skill 50, tokens [developer] in job → 50 → 100
        // entry 2: skill 0, tokens [barista, coffee] none in job → 0
        let score = experience_score(&experience, &strings(&["rust"]), "Senior Rust developer");
        assert_eq!(score, 50);
    }

    #[test]
    fn test_score_is_bounded() {
        let experience = vec![entry(
            "kafka kafka kafka",
            Some("kafka streaming kafka streaming"),
        )];
        let score = experience_score(
            &experience,
            &strings(&["kafka", "streaming"]),
            "kafka streaming",
        );
        assert!(score <= 100);
        assert_eq!(score, 100);
    }
}
