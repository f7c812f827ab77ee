//! Text normalization and matching primitives shared by every scorer.

use std::collections::HashSet;

/// Lower-cases and trims.
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Lower-cases, trims and collapses whitespace runs to single spaces.
pub fn normalize_skill(skill: &str) -> String {
    skill
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Bidirectional containment: either normalized string contains the other.
/// `job_skill` must already be normalized.
pub fn skill_matches(normalized_resume_skills: &[String], job_skill: &str) -> bool {
    normalized_resume_skills
        .iter()
        .any(|resume_skill| resume_skill.contains(job_skill) || job_skill.contains(resume_skill.as_str()))
}

/// Whitespace tokens with more than `min_chars` characters.
///
/// Length is counted in Unicode scalar values, not UTF-16 units, so a token
/// containing emoji is shorter here than in a JavaScript `.length` check.
pub fn tokens_longer_than(text: &str, min_chars: usize) -> Vec<&str> {
    text.split_whitespace()
        .filter(|token| token.chars().count() > min_chars)
        .collect()
}

/// Ratio of `entry_tokens` (duplicates counted) that also occur in `other`.
/// Returns `None` when `entry_tokens` is empty.
pub fn overlap_ratio(entry_tokens: &[&str], other: &HashSet<&str>) -> Option<f64> {
    if entry_tokens.is_empty() {
        return None;
    }
    let common = entry_tokens.iter().filter(|t| other.contains(*t)).count();
    Some(common as f64 / entry_tokens.len() as f64)
}

/// Round half up, as every score in the engine is rounded.
pub fn round_score(value: f64) -> u32 {
    (value + 0.5).floor().clamp(0.0, 100.0) as u32
}
