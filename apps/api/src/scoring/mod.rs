//! Compatibility scoring engine.
//!
//! Pure, synchronous functions over a parsed [`Resume`] and [`Job`]. Four
//! independent scorers feed a fixed-weight synthesis; gaps and recommendations
//! are derived from the same inputs. No I/O and no shared state: identical
//! inputs always produce an identical [`Analysis`].

pub mod education;
pub mod experience;
pub mod gaps;
pub mod keywords;
pub mod models;
pub mod recommendations;
pub mod skills;
pub mod text;

use tracing::debug;

pub use models::{
    Analysis, ComponentScore, EducationEntry, ExperienceEntry, Gap, GapType, Importance, Job,
    Keyword, Recommendation, Resume, ScoreBreakdown,
};

use crate::scoring::text::round_score;

pub const SKILLS_WEIGHT: f64 = 0.40;
pub const EXPERIENCE_WEIGHT: f64 = 0.30;
pub const KEYWORDS_WEIGHT: f64 = 0.20;
pub const EDUCATION_WEIGHT: f64 = 0.10;

/// Scores a resume against a job and assembles the full analysis.
pub fn analyze(resume: &Resume, job: &Job) -> Analysis {
    let breakdown = ScoreBreakdown {
        skills: ComponentScore {
            score: skills::skill_score(&resume.skills, &job.required_skills, &job.preferred_skills),
            weight: SKILLS_WEIGHT,
        },
        experience: ComponentScore {
            score: experience::experience_score(
                &resume.experience,
                &job.required_skills,
                &job.description,
            ),
            weight: EXPERIENCE_WEIGHT,
        },
        keywords: ComponentScore {
            score: keywords::keyword_score(&resume.text, &job.keywords),
            weight: KEYWORDS_WEIGHT,
        },
        education: ComponentScore {
            score: education::education_score(&resume.education, &job.description),
            weight: EDUCATION_WEIGHT,
        },
    };

    let overall_score = overall_score(&breakdown);
    let gaps = gaps::identify_gaps(resume, job);
    let recommendations = recommendations::generate_recommendations(resume, &gaps);

    debug!(
        overall_score,
        skills = breakdown.skills.score,
        experience = breakdown.experience.score,
        keywords = breakdown.keywords.score,
        education = breakdown.education.score,
        gaps = gaps.len(),
        "compatibility scored"
    );

    Analysis {
        overall_score,
        breakdown,
        gaps,
        recommendations,
    }
}

/// Weighted sum of the already-rounded component scores, rounded again.
pub fn overall_score(breakdown: &ScoreBreakdown) -> u32 {
    round_score(
        f64::from(breakdown.skills.score) * breakdown.skills.weight
            + f64::from(breakdown.experience.score) * breakdown.experience.weight
            + f64::from(breakdown.keywords.score) * breakdown.keywords.weight
            + f64::from(breakdown.education.score) * breakdown.education.weight,
    )
}
