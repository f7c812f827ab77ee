use crate::scoring::models::{Gap, GapType, Importance, Recommendation, Resume};

/// Maximum number of gaps named in a single recommendation.
const MAX_NAMED_GAPS: usize = 3;
/// Keyword gaps below this frequency are not worth a recommendation.
const KEYWORD_FREQUENCY_THRESHOLD: u32 = 3;
/// A description longer than this counts as detailed.
const DETAILED_DESCRIPTION_CHARS: usize = 50;

/// Builds suggestions from the identified gaps and the resume's shape.
/// Output order: skills, keywords, experience.
pub fn generate_recommendations(resume: &Resume, gaps: &[Gap]) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();

    let critical_skills = first_named(gaps, |gap| {
        gap.gap_type == GapType::Skill && gap.importance == Importance::High
    });
    if !critical_skills.is_empty() {
        recommendations.push(Recommendation {
            section: "skills".to_string(),
            current: format!("Missing critical skills: {}", critical_skills.join(", ")),
            suggested: "Consider adding these required skills to your resume. If you have \
                experience with these technologies, highlight them in your experience section."
                .to_string(),
        });
    }

    let frequent_keywords = first_named(gaps, |gap| {
        gap.gap_type == GapType::Keyword
            && gap
                .frequency
                .is_some_and(|f| f >= KEYWORD_FREQUENCY_THRESHOLD)
    });
    if !frequent_keywords.is_empty() {
        recommendations.push(Recommendation {
            section: "keywords".to_string(),
            current: format!(
                "Missing important keywords: {}",
                frequent_keywords.join(", ")
            ),
            suggested: "Incorporate these keywords naturally into your resume, especially in \
                your experience descriptions."
                .to_string(),
        });
    }

    if resume.experience.is_empty() {
        recommendations.push(Recommendation {
            section: "experience".to_string(),
            current: "No professional experience listed".to_string(),
            suggested: "Add your professional experience with detailed descriptions of your \
                achievements and responsibilities."
                .to_string(),
        });
    } else if !resume.experience.iter().any(|entry| {
        entry
            .description
            .as_deref()
            // Counted in chars, like `tokens_longer_than`.
            .is_some_and(|d| d.chars().count() > DETAILED_DESCRIPTION_CHARS)
    }) {
        recommendations.push(Recommendation {
            section: "experience".to_string(),
            current: "Experience entries lack detailed descriptions".to_string(),
            suggested: "Expand your experience descriptions to include specific achievements, \
                technologies used, and impact you made. Use action verbs and quantifiable results."
                .to_string(),
        });
    }

    recommendations
}

fn first_named(gaps: &[Gap], predicate: impl Fn(&Gap) -> bool) -> Vec<&str> {
    gaps.iter()
        .filter(|gap| predicate(gap))
        .take(MAX_NAMED_GAPS)
        .map(|gap| gap.missing.as_str())
        .collect()
}
