use std::collections::HashSet;

use crate::scoring::models::EducationEntry;
use crate::scoring::text::{normalize, overlap_ratio, round_score, tokens_longer_than};

const MIN_TOKEN_CHARS: usize = 3;
/// Score for missing education data and for entries with no usable tokens.
pub const NEUTRAL_SCORE: u32 = 50;

/// Education relevance, 0–100: the best entry wins.
pub fn education_score(education: &[EducationEntry], job_description: &str) -> u32 {
    if education.is_empty() {
        return NEUTRAL_SCORE;
    }

    let job_text = normalize(job_description);
    let job_tokens: HashSet<&str> = tokens_longer_than(&job_text, MIN_TOKEN_CHARS)
        .into_iter()
        .collect();

    let best = education
        .iter()
        .map(|entry| {
            let text = normalize(&format!(
                "{} {}",
                entry.degree,
                entry.field.as_deref().unwrap_or("")
            ));
            let tokens = tokens_longer_than(&text, MIN_TOKEN_CHARS);
            overlap_ratio(&tokens, &job_tokens)
                .map(|ratio| ratio * 100.0)
                .unwrap_or(f64::from(NEUTRAL_SCORE))
        })
        .fold(0.0_f64, f64::max);

    round_score(best)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edu(degree: &str, field: Option<&str>) -> EducationEntry {
        EducationEntry {
            degree: degree.to_string(),
            institution: "State University".to_string(),
            field: field.map(String::from),
            graduation_date: None,
        }
    }

    #[test]
    fn test_empty_education_is_neutral() {
        assert_eq!(education_score(&[], "Anything at all"), 50);
    }

    #[test]
    fn test_entry_without_tokens_is_neutral() {
        assert_eq!(education_score(&[edu("BS", None)], "computer science"), 50);
    }

    #[test]
    fn test_overlap_ratio_scaled_to_100() {
        // tokens: bachelor, science, computer, science → job has computer, science
        let score = education_score(
            &[edu("Bachelor of Science", Some("Computer Science"))],
            "Degree in computer science preferred",
        );
        assert_eq!(score, 75);
    }

    #[test]
    fn test_best_entry_wins() {
        let education = vec![
            edu("Diploma", Some("Culinary Arts")),
            edu("Master", Some("Statistics")),
        ];
        // entry 1: 0/3; entry 2: master, statistics → statistics in job → 50
        let score = education_score(&education, "Strong statistics background");
        assert_eq!(score, 50);
    }

    #[test]
    fn test_zero_token_entry_beats_unrelated_entry() {
        let education = vec![edu("Bachelor", Some("History")), edu("BA", None)];
        assert_eq!(education_score(&education, "Rust systems engineer"), 50);
    }
}
