use crate::scoring::models::Keyword;
use crate::scoring::text::{normalize, round_score};

/// Keyword coverage, 0–100.
///
/// Half of the score is the share of keywords found in the resume text, the
/// other half the share of total keyword frequency they account for.
pub fn keyword_score(resume_text: &str, keywords: &[Keyword]) -> u32 {
    if keywords.is_empty() {
        return 100;
    }

    let resume = normalize(resume_text);

    let mut matched_count = 0usize;
    let mut matched_frequency = 0u64;
    let mut total_frequency = 0u64;

    for keyword in keywords {
        total_frequency += u64::from(keyword.frequency);
        if keyword_present(&resume, keyword) {
            matched_count += 1;
            matched_frequency += u64::from(keyword.frequency);
        }
    }

    let count_score = matched_count as f64 / keywords.len() as f64 * 50.0;
    let frequency_score = if total_frequency > 0 {
        matched_frequency as f64 / total_frequency as f64 * 50.0
    } else {
        0.0
    };

    round_score(count_score + frequency_score)
}

/// True when the keyword's normalized word occurs in the normalized resume text.
pub fn keyword_present(normalized_resume: &str, keyword: &Keyword) -> bool {
    normalized_resume.contains(normalize(&keyword.word).as_str())
}
