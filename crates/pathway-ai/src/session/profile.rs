use super::request::{normalize, RecommendationRequest};

/// Slider bounds for the total-budget field, in whole rupees.
pub const BUDGET_MIN_RUPEES: u64 = 500_000;
pub const BUDGET_MAX_RUPEES: u64 = 10_000_000;
pub const BUDGET_STEP_RUPEES: u64 = 100_000;

const GPA_MAX_CHARS: usize = 4;

/// Degree levels offered by the intake form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DegreeLevel {
    #[default]
    Unset,
    HighSchool,
    Bachelors,
    Masters,
}

impl DegreeLevel {
    pub const fn label(self) -> &'static str {
        match self {
            DegreeLevel::Unset => "",
            DegreeLevel::HighSchool => "HS",
            DegreeLevel::Bachelors => "Bachelors",
            DegreeLevel::Masters => "Masters",
        }
    }
}

/// The applicant's absolute priority for the recommendation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PriorityGoal {
    #[default]
    HighRoi,
    LowCost,
    Immigration,
}

impl PriorityGoal {
    pub const fn label(self) -> &'static str {
        match self {
            PriorityGoal::HighRoi => "High ROI",
            PriorityGoal::LowCost => "Low Cost",
            PriorityGoal::Immigration => "Immigration",
        }
    }
}

/// How the applicant plans to pay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FundingSource {
    #[default]
    Unset,
    SelfFunded,
    EducationLoan,
    Scholarship,
}

impl FundingSource {
    pub const fn label(self) -> &'static str {
        match self {
            FundingSource::Unset => "",
            FundingSource::SelfFunded => "Self",
            FundingSource::EducationLoan => "Education Loan",
            FundingSource::Scholarship => "Scholarship",
        }
    }
}

/// Intake term the applicant is aiming for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntakeTerm {
    Fall,
    Spring,
    Summer,
}

impl IntakeTerm {
    pub const fn label(self) -> &'static str {
        match self {
            IntakeTerm::Fall => "Fall",
            IntakeTerm::Spring => "Spring",
            IntakeTerm::Summer => "Summer",
        }
    }
}

/// Mutable draft of the intake form, owned by exactly one session and reset
/// only by dropping the session.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileDraft {
    pub degree: DegreeLevel,
    pub gpa: String,
    pub major: String,
    pub budget_max: u64,
    pub priority_goal: PriorityGoal,
    pub funding_source: FundingSource,
    pub preferred_countries: Vec<String>,
    pub target_intake: Option<IntakeTerm>,
}

impl Default for ProfileDraft {
    fn default() -> Self {
        Self {
            degree: DegreeLevel::Unset,
            gpa: String::new(),
            major: String::new(),
            budget_max: 2_500_000,
            priority_goal: PriorityGoal::HighRoi,
            funding_source: FundingSource::Unset,
            preferred_countries: Vec::new(),
            target_intake: None,
        }
    }
}

/// A single field edit coming from the form layer.
#[derive(Debug, Clone, PartialEq)]
pub enum ProfileUpdate {
    Degree(DegreeLevel),
    Gpa(String),
    Major(String),
    BudgetMax(u64),
    Priority(PriorityGoal),
    Funding(FundingSource),
    ToggleCountry(String),
    Intake(Option<IntakeTerm>),
}

/// Form-boundary failures that block a submission. These never reach the
/// submission controller; the caller surfaces them inline and the applicant
/// corrects the draft.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("required field '{field}' is empty")]
    MissingRequiredField { field: &'static str },
    #[error("field '{field}' must be a number greater than zero")]
    InvalidNumericField { field: &'static str },
}

impl ProfileDraft {
    /// Applies one field edit. Total: out-of-range numeric input is clamped
    /// at the boundary rather than rejected, and free-text fields are taken
    /// as typed to be validated at submit time.
    pub fn apply(&mut self, update: ProfileUpdate) {
        match update {
            ProfileUpdate::Degree(degree) => self.degree = degree,
            ProfileUpdate::Gpa(raw) => self.gpa = clamp_gpa(&raw),
            ProfileUpdate::Major(major) => self.major = major,
            ProfileUpdate::BudgetMax(value) => self.budget_max = snap_budget(value),
            ProfileUpdate::Priority(priority) => self.priority_goal = priority,
            ProfileUpdate::Funding(funding) => self.funding_source = funding,
            ProfileUpdate::ToggleCountry(country) => {
                if let Some(position) = self
                    .preferred_countries
                    .iter()
                    .position(|existing| *existing == country)
                {
                    self.preferred_countries.remove(position);
                } else {
                    self.preferred_countries.push(country);
                }
            }
            ProfileUpdate::Intake(term) => self.target_intake = term,
        }
    }

    /// Gate before the network call: a blank major or a missing/non-positive
    /// GPA blocks the submission; otherwise this yields the normalized wire
    /// payload.
    pub fn validate_for_submit(&self) -> Result<RecommendationRequest, ValidationError> {
        if self.major.trim().is_empty() {
            return Err(ValidationError::MissingRequiredField { field: "major" });
        }
        match self.gpa.trim().parse::<f64>() {
            Ok(value) if value > 0.0 => {}
            _ => return Err(ValidationError::InvalidNumericField { field: "gpa" }),
        }
        Ok(normalize(self))
    }
}

/// Clamps a raw GPA keystroke the way the form field does: at most four
/// characters, and any parseable number is pulled into [0, 10]. Unparseable
/// text is kept as typed and rejected at submit time instead.
pub fn clamp_gpa(raw: &str) -> String {
    let mut value: String = raw.chars().take(GPA_MAX_CHARS).collect();
    if let Ok(number) = value.parse::<f64>() {
        let clamped = number.clamp(0.0, 10.0);
        value = format!("{clamped}");
    }
    value
}

/// Pulls a budget value onto the slider lattice: clamped to the range and
/// snapped to the nearest step.
pub fn snap_budget(value: u64) -> u64 {
    let clamped = value.clamp(BUDGET_MIN_RUPEES, BUDGET_MAX_RUPEES);
    let offset = clamped - BUDGET_MIN_RUPEES;
    let snapped =
        BUDGET_MIN_RUPEES + ((offset + BUDGET_STEP_RUPEES / 2) / BUDGET_STEP_RUPEES) * BUDGET_STEP_RUPEES;
    snapped.min(BUDGET_MAX_RUPEES)
}
