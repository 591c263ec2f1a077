//! Suggestion and summary text for keyword match results

/// Below this score the resume is considered poorly tailored.
const LOW_SCORE: u8 = 50;
/// At or above this score the keyword coverage is considered good.
const GOOD_SCORE: u8 = 70;
const DECENT_TIER: u8 = 60;
const STRONG_TIER: u8 = 80;

/// How many missing terms the "incorporate" suggestion names.
const SUGGESTED_TERMS: usize = 5;

/// Build improvement suggestions. Every rule whose condition holds adds one
/// line, in a fixed order.
pub fn build_suggestions(score: u8, ranked_missing: &[String]) -> Vec<String> {
    let mut suggestions = Vec::new();

    if score < LOW_SCORE {
        suggestions.push(
            "Your resume is missing many keywords from the job description. \
             Consider tailoring it more specifically."
                .to_string(),
        );
    }

    if score < GOOD_SCORE {
        let terms: Vec<&str> = ranked_missing
            .iter()
            .take(SUGGESTED_TERMS)
            .map(String::as_str)
            .collect();
        suggestions.push(format!(
            "Try to incorporate these terms naturally: {}",
            terms.join(", ")
        ));
    }

    if ranked_missing.len() > SUGGESTED_TERMS {
        suggestions.push(
            "Focus on adding technical skills and tools mentioned in the job posting.".to_string(),
        );
    }

    if score >= GOOD_SCORE {
        suggestions.push("Good keyword match! Focus on quantifying your achievements.".to_string());
    }

    suggestions
}

/// One-paragraph summary: the score followed by a tier verdict.
pub fn build_summary(score: u8) -> String {
    let verdict = match score {
        s if s >= STRONG_TIER => "Strong match - your background aligns well with this role.",
        s if s >= DECENT_TIER => "Decent match - some tailoring could improve your chances.",
        _ => "Consider customizing your resume more for this specific position.",
    };

    format!(
        "Your resume matches {}% of keywords from the job description. {}",
        score, verdict
    )
}
