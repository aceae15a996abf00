//! Data returned by the recommendation service.
//!
//! Everything in here is an opaque value object from the session's point of
//! view: the service computes match scores, financial gaps, and timelines,
//! and this layer only carries, reorders, and filters them. The one piece of
//! logic the client owns is deciding which of the two observed response
//! shapes a body uses.

pub mod client;

use serde::{Deserialize, Serialize};

use client::TransportError;

/// Traffic-light rating used for PR risk and branch coloring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskColor {
    Green,
    Yellow,
    Red,
}

/// Tone of an upstream policy alert.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertTone {
    Positive,
    Negative,
    #[default]
    Neutral,
}

/// Cost breakdown in lakhs, rendered verbatim.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    #[serde(default)]
    pub tuition: f64,
    #[serde(default)]
    pub living: f64,
    #[serde(default)]
    pub visa_fees: f64,
    #[serde(default)]
    pub insurance: f64,
}

/// One branch of the permanent-residency outlook.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PrBranch {
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub timeline: String,
    #[serde(default)]
    pub success: String,
    #[serde(default)]
    pub color: Option<RiskColor>,
}

/// Immigration policy alert rendered verbatim.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PolicyAlert {
    #[serde(default, rename = "type")]
    pub kind: AlertTone,
    #[serde(default)]
    pub text: String,
}

/// Application deadline row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Deadline {
    #[serde(default)]
    pub task: String,
    #[serde(default)]
    pub date: String,
}

/// One candidate country/strategy as scored upstream.
///
/// The identity key and match score are required; every other field
/// tolerates absence because the observed service builds disagree on which
/// display metrics they attach.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathwayOption {
    pub country: String,
    #[serde(default)]
    pub flag: String,
    #[serde(default)]
    pub tagline: String,
    pub match_score: u8,
    #[serde(default)]
    pub total_cost: f64,
    #[serde(default)]
    pub financial_gap: Option<f64>,
    #[serde(default)]
    pub financial_health: Option<String>,
    #[serde(default)]
    pub financial_status: Option<String>,
    #[serde(default)]
    pub pr_timeline: Option<String>,
    pub pr_risk_color: RiskColor,
    #[serde(default)]
    pub timeline_steps: Vec<String>,
    #[serde(default)]
    pub costs: Option<CostBreakdown>,
    #[serde(default)]
    pub pr_branches: Vec<PrBranch>,
    #[serde(default)]
    pub policy_alerts: Vec<PolicyAlert>,
    #[serde(default)]
    pub deadlines: Vec<Deadline>,
    #[serde(default)]
    pub insider_insight: Option<String>,
    #[serde(default)]
    pub reasoning: Vec<String>,
    #[serde(default)]
    pub roi_verdict: Option<String>,
    #[serde(default)]
    pub archetype: Option<String>,
}

impl PathwayOption {
    /// Identity key used for promotion and expansion tracking.
    pub fn key(&self) -> &str {
        &self.country
    }
}

/// Three named strategy buckets, each independently ordered upstream. Empty
/// buckets are preserved so the renderer can show its empty-state marker.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StrategyBuckets {
    #[serde(default)]
    pub safe_bets: Vec<PathwayOption>,
    #[serde(default)]
    pub fast_track: Vec<PathwayOption>,
    #[serde(default)]
    pub moonshots: Vec<PathwayOption>,
}

/// Immutable snapshot of one successful submission, replaced wholesale on
/// the next one. Rank 0 of a ranked set is the primary recommendation.
#[derive(Debug, Clone, PartialEq)]
pub enum ResultSet {
    Ranked(Vec<PathwayOption>),
    Buckets(StrategyBuckets),
}

impl ResultSet {
    pub fn is_ranked(&self) -> bool {
        matches!(self, ResultSet::Ranked(_))
    }

    pub fn len(&self) -> usize {
        match self {
            ResultSet::Ranked(options) => options.len(),
            ResultSet::Buckets(buckets) => {
                buckets.safe_bets.len() + buckets.fast_track.len() + buckets.moonshots.len()
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains_key(&self, key: &str) -> bool {
        match self {
            ResultSet::Ranked(options) => options.iter().any(|option| option.key() == key),
            ResultSet::Buckets(buckets) => [
                &buckets.safe_bets,
                &buckets.fast_track,
                &buckets.moonshots,
            ]
            .iter()
            .any(|bucket| bucket.iter().any(|option| option.key() == key)),
        }
    }
}

/// Bookkeeping counts some service builds attach to a response.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseMeta {
    #[serde(default)]
    pub total_options: u32,
    #[serde(default)]
    pub safe_count: u32,
    #[serde(default)]
    pub fast_count: u32,
    #[serde(default)]
    pub moonshot_count: u32,
}

/// Everything the session keeps from one successful submission.
#[derive(Debug, Clone, PartialEq)]
pub struct Advisory {
    pub result: ResultSet,
    pub consultant_note: String,
    pub risk_advisory: Option<String>,
    pub meta: Option<ResponseMeta>,
}

/// Raw wire shape of a service response, before the result shape is decided.
#[derive(Debug, Deserialize)]
pub struct RecommendationResponse {
    pub status: String,
    #[serde(default)]
    pub recommendations: Option<Vec<PathwayOption>>,
    #[serde(default)]
    pub strategies: Option<StrategyBuckets>,
    #[serde(default)]
    pub consultant_note: String,
    #[serde(default)]
    pub risk_advisory: Option<String>,
    #[serde(default)]
    pub meta: Option<ResponseMeta>,
}

impl RecommendationResponse {
    /// Decides the result shape by which field the service populated;
    /// `strategies` wins when a body carries both. Any status other than
    /// `"success"` is a submission failure.
    pub fn into_advisory(self) -> Result<Advisory, TransportError> {
        if self.status != "success" {
            return Err(TransportError::ServiceStatus(self.status));
        }

        let result = if let Some(buckets) = self.strategies {
            ResultSet::Buckets(buckets)
        } else if let Some(options) = self.recommendations {
            ResultSet::Ranked(options)
        } else {
            return Err(TransportError::Malformed(
                "response carries neither 'strategies' nor 'recommendations'".to_string(),
            ));
        };

        Ok(Advisory {
            result,
            consultant_note: self.consultant_note,
            risk_advisory: self.risk_advisory,
            meta: self.meta,
        })
    }
}
