use crate::scoring::keywords::keyword_present;
use crate::scoring::models::{Gap, GapType, Importance, Job, Resume};
use crate::scoring::text::{normalize, normalize_skill, skill_matches};

/// Lists job requirements the resume does not evidence.
///
/// Order: missing required skills, missing preferred skills, missing keywords,
/// each in the job's own list order.
pub fn identify_gaps(resume: &Resume, job: &Job) -> Vec<Gap> {
    let resume_skills: Vec<String> = resume.skills.iter().map(|s| normalize_skill(s)).collect();
    let resume_text = normalize(&resume.text);

    let missing_skills = |skills: &[String], importance: Importance| -> Vec<Gap> {
        skills
            .iter()
            .filter(|skill| !skill_matches(&resume_skills, &normalize_skill(skill)))
            .map(|skill| Gap {
                gap_type: GapType::Skill,
                missing: skill.clone(),
                frequency: None,
                importance,
            })
            .collect()
    };

    let mut gaps = missing_skills(&job.required_skills, Importance::High);
    gaps.extend(missing_skills(&job.preferred_skills, Importance::Medium));

    gaps.extend(
        job.keywords
            .iter()
            .filter(|keyword| !keyword_present(&resume_text, keyword))
            .map(|keyword| Gap {
                gap_type: GapType::Keyword,
                missing: keyword.word.clone(),
                frequency: Some(keyword.frequency),
                importance: keyword_importance(keyword.frequency),
            }),
    );

    gaps
}

fn keyword_importance(frequency: u32) -> Importance {
    if frequency >= 5 {
        Importance::High
    } else if frequency >= 2 {
        Importance::Medium
    } else {
        Importance::Low
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::models::Keyword;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn kw(word: &str, frequency: u32) -> Keyword {
        Keyword {
            word: word.to_string(),
            frequency,
        }
    }

    #[test]
    fn test_unmatched_required_skill_is_high_gap() {
        let resume = Resume {
            skills: strings(&["React", "Node"]),
            ..Default::default()
        };
        let job = Job {
            required_skills: strings(&["React.js", "Python"]),
            ..Default::default()
        };

        let gaps = identify_gaps(&resume, &job);
        assert_eq!(
            gaps,
            vec![Gap {
                gap_type: GapType::Skill,
                missing: "Python".to_string(),
                frequency: None,
                importance: Importance::High,
            }]
        );
    }

    #[test]
    fn test_emission_order_required_preferred_keywords() {
        let resume = Resume {
            skills: strings(&["rust"]),
            text: "rust engineer".to_string(),
            ..Default::default()
        };
        let job = Job {
            required_skills: strings(&["Go", "Rust", "Java"]),
            preferred_skills: strings(&["Kafka"]),
            keywords: vec![kw("kubernetes", 5), kw("rust", 9), kw("terraform", 1)],
            description: String::new(),
        };

        let gaps = identify_gaps(&resume, &job);
        let missing: Vec<&str> = gaps.iter().map(|g| g.missing.as_str()).collect();
        assert_eq!(missing, vec!["Go", "Java", "Kafka", "kubernetes", "terraform"]);

        assert_eq!(gaps[0].importance, Importance::High);
        assert_eq!(gaps[1].importance, Importance::High);
        assert_eq!(gaps[2].importance, Importance::Medium);
        assert_eq!(gaps[3].gap_type, GapType::Keyword);
        assert_eq!(gaps[3].frequency, Some(5));
        assert_eq!(gaps[3].importance, Importance::High);
        assert_eq!(gaps[4].importance, Importance::Low);
    }

    #[test]
    fn test_keyword_importance_thresholds() {
        assert_eq!(keyword_importance(0), Importance::Low);
        assert_eq!(keyword_importance(1), Importance::Low);
        assert_eq!(keyword_importance(2), Importance::Medium);
        assert_eq!(keyword_importance(4), Importance::Medium);
        assert_eq!(keyword_importance(5), Importance::High);
        assert_eq!(keyword_importance(40), Importance::High);
    }

    #[test]
    fn test_fully_covered_job_has_no_gaps() {
        let resume = Resume {
            skills: strings(&["TypeScript", "PostgreSQL"]),
            text: "TypeScript and PostgreSQL daily".to_string(),
            ..Default::default()
        };
        let job = Job {
            required_skills: strings(&["typescript"]),
            preferred_skills: strings(&["Postgres"]),
            keywords: vec![kw("postgresql", 3)],
            description: String::new(),
        };
        assert!(identify_gaps(&resume, &job).is_empty());
    }

    #[test]
    fn test_reserved_gap_types_never_emitted() {
        let resume = Resume::default();
        let job = Job {
            required_skills: strings(&["Rust"]),
            preferred_skills: strings(&["Go"]),
            keywords: vec![kw("cloud", 2)],
            description: "Rust role requiring a degree and 5 years".to_string(),
        };
        assert!(identify_gaps(&resume, &job)
            .iter()
            .all(|g| matches!(g.gap_type, GapType::Skill | GapType::Keyword)));
    }
}
