use serde::Serialize;

use super::profile::{DegreeLevel, ProfileDraft};

/// One lakh in rupees; the wire contract quotes budgets in lakhs.
pub const LAKH_RUPEES: f64 = 100_000.0;

/// Wire payload for `POST /api/recommend`. Derived, immutable, one per
/// submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationRequest {
    pub degree: String,
    pub gpa: f64,
    pub major: String,
    pub budget: f64,
    pub priority: String,
    pub funding_source: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub countries: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_intake: Option<String>,
}

/// Builds the wire payload from a draft. Pure and idempotent: the same draft
/// yields an identical payload on every call, which is what makes
/// resubmission safe. Empty optional fields get the documented defaults.
pub fn normalize(draft: &ProfileDraft) -> RecommendationRequest {
    let degree = match draft.degree {
        DegreeLevel::Unset => DegreeLevel::Bachelors,
        other => other,
    };

    let major = draft.major.trim();
    let major = if major.is_empty() { "General" } else { major };

    RecommendationRequest {
        degree: degree.label().to_string(),
        gpa: draft.gpa.trim().parse::<f64>().unwrap_or(0.0),
        major: major.to_string(),
        budget: draft.budget_max as f64 / LAKH_RUPEES,
        priority: draft.priority_goal.label().to_string(),
        funding_source: draft.funding_source.label().to_string(),
        countries: draft.preferred_countries.clone(),
        target_intake: draft.target_intake.map(|term| term.label().to_string()),
    }
}
