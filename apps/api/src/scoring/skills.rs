use crate::scoring::text::{normalize_skill, round_score, skill_matches};

const REQUIRED_SHARE: f64 = 0.7;
const PREFERRED_SHARE: f64 = 0.3;

/// Skill compatibility, 0–100.
///
/// Required skills carry 70% and preferred 30% when both lists are present;
/// with only one list, that list's match percentage is the score. No skill
/// requirements at all is a perfect match.
pub fn skill_score(
    resume_skills: &[String],
    required_skills: &[String],
    preferred_skills: &[String],
) -> u32 {
    if required_skills.is_empty() && preferred_skills.is_empty() {
        return 100;
    }

    let normalized: Vec<String> = resume_skills.iter().map(|s| normalize_skill(s)).collect();

    let required_pct = match_percentage(&normalized, required_skills);
    let preferred_pct = match_percentage(&normalized, preferred_skills);

    if required_skills.is_empty() {
        return round_score(preferred_pct);
    }
    if preferred_skills.is_empty() {
        return round_score(required_pct);
    }

    round_score(required_pct * REQUIRED_SHARE + preferred_pct * PREFERRED_SHARE)
}

fn match_percentage(normalized_resume_skills: &[String], job_skills: &[String]) -> f64 {
    if job_skills.is_empty() {
        return 0.0;
    }
    let matched = job_skills
        .iter()
        .filter(|skill| skill_matches(normalized_resume_skills, &normalize_skill(skill)))
        .count();
    matched as f64 / job_skills.len() as f64 * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_no_requirements_scores_100() {
        assert_eq!(skill_score(&strings(&["Rust"]), &[], &[]), 100);
        assert_eq!(skill_score(&[], &[], &[]), 100);
    }

    #[test]
    fn test_substring_containment_matches_react_js() {
        let score = skill_score(
            &strings(&["React", "Node"]),
            &strings(&["React.js", "Python"]),
            &[],
        );
        assert_eq!(score, 50);
    }

    #[test]
    fn test_only_preferred_uses_preferred_percentage() {
        let score = skill_score(
            &strings(&["Docker"]),
            &[],
            &strings(&["docker", "Kubernetes", "Terraform"]),
        );
        // 1/3 = 33.33
        assert_eq!(score, 33);
    }

    #[test]
    fn test_weighted_70_30_blend() {
        // required 1/2 = 50, preferred 2/2 = 100 → 35 + 30 = 65
        let score = skill_score(
            &strings(&["rust", "kafka", "go"]),
            &strings(&["Rust", "Java"]),
            &strings(&["Kafka", "Go"]),
        );
        assert_eq!(score, 65);
    }

    #[test]
    fn test_whitespace_and_case_are_normalized() {
        let score = skill_score(
            &strings(&["  machine    LEARNING "]),
            &strings(&["Machine Learning"]),
            &[],
        );
        assert_eq!(score, 100);
    }

    #[test]
    fn test_order_of_lists_does_not_change_score() {
        let resume = strings(&["Postgres", "Rust", "AWS"]);
        let required = strings(&["rust", "terraform", "aws"]);
        let preferred = strings(&["postgresql", "redis"]);

        let forward = skill_score(&resume, &required, &preferred);

        let mut resume_rev = resume.clone();
        resume_rev.reverse();
        let mut required_rev = required.clone();
        required_rev.reverse();
        let mut preferred_rev = preferred.clone();
        preferred_rev.reverse();

        assert_eq!(forward, skill_score(&resume_rev, &required_rev, &preferred_rev));
    }

    #[test]
    fn test_no_resume_skills_scores_zero() {
        assert_eq!(skill_score(&[], &strings(&["Rust"]), &strings(&["Go"])), 0);
    }
}
