use std::sync::Mutex;

use crate::advisory::client::{RecommendationClient, TransportError};
use crate::advisory::{Advisory, PathwayOption, ResultSet, RiskColor, StrategyBuckets};
use crate::session::request::RecommendationRequest;
use crate::session::{
    AdvisorSession, DegreeLevel, ExpansionPolicy, FundingSource, PriorityGoal, ProfileUpdate,
};

pub(super) fn option(country: &str, match_score: u8) -> PathwayOption {
    PathwayOption {
        country: country.to_string(),
        flag: String::new(),
        tagline: format!("{country} pathway"),
        match_score,
        total_cost: 30.0,
        financial_gap: Some(0.0),
        financial_health: None,
        financial_status: None,
        pr_timeline: Some("Fast (2 Years)".to_string()),
        pr_risk_color: RiskColor::Green,
        timeline_steps: vec!["Masters (2y)".to_string(), "Job Search (1y)".to_string()],
        costs: None,
        pr_branches: Vec::new(),
        policy_alerts: Vec::new(),
        deadlines: Vec::new(),
        insider_insight: None,
        reasoning: Vec::new(),
        roi_verdict: None,
        archetype: None,
    }
}

pub(super) fn ranked_advisory(countries: &[(&str, u8)]) -> Advisory {
    Advisory {
        result: ResultSet::Ranked(
            countries
                .iter()
                .map(|(country, score)| option(country, *score))
                .collect(),
        ),
        consultant_note: "ranked note".to_string(),
        risk_advisory: None,
        meta: None,
    }
}

pub(super) fn buckets_advisory() -> Advisory {
    Advisory {
        result: ResultSet::Buckets(StrategyBuckets {
            safe_bets: vec![option("Germany", 92), option("Australia", 74)],
            fast_track: Vec::new(),
            moonshots: vec![option("USA", 61)],
        }),
        consultant_note: "buckets note".to_string(),
        risk_advisory: Some("check visa risk".to_string()),
        meta: None,
    }
}

/// Session with a draft that passes validation.
pub(super) fn ready_session() -> AdvisorSession {
    let mut session = AdvisorSession::new(ExpansionPolicy::Single);
    session.update_profile(ProfileUpdate::Degree(DegreeLevel::Bachelors));
    session.update_profile(ProfileUpdate::Gpa("8.5".to_string()));
    session.update_profile(ProfileUpdate::Major("Computer Science".to_string()));
    session.update_profile(ProfileUpdate::BudgetMax(2_500_000));
    session.update_profile(ProfileUpdate::Priority(PriorityGoal::HighRoi));
    session.update_profile(ProfileUpdate::Funding(FundingSource::SelfFunded));
    session
}

/// Client that records every request and answers with a fixed advisory.
pub(super) struct StaticClient {
    advisory: Advisory,
    pub(super) requests: Mutex<Vec<RecommendationRequest>>,
}

impl StaticClient {
    pub(super) fn new(advisory: Advisory) -> Self {
        Self {
            advisory,
            requests: Mutex::new(Vec::new()),
        }
    }
}

impl RecommendationClient for StaticClient {
    fn recommend(&self, request: &RecommendationRequest) -> Result<Advisory, TransportError> {
        self.requests
            .lock()
            .expect("request mutex poisoned")
            .push(request.clone());
        Ok(self.advisory.clone())
    }
}

/// Client that always fails with the given transport error.
pub(super) struct FailingClient(pub(super) TransportError);

impl RecommendationClient for FailingClient {
    fn recommend(&self, _request: &RecommendationRequest) -> Result<Advisory, TransportError> {
        Err(self.0.clone())
    }
}
