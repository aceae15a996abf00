//! The session state controller.
//!
//! One [`AdvisorSession`] lives for the lifetime of an intake interaction.
//! It owns the profile draft, the submission state machine, the current
//! result snapshot, and the promote/expansion interaction state. All
//! transitions happen on the caller's single event loop; the only hazard is
//! out-of-order completion of overlapping submissions, which the ticket
//! guard in [`AdvisorSession::complete`] closes.

pub mod expansion;
pub mod profile;
pub mod reorder;
pub mod request;

#[cfg(test)]
mod tests;

pub use expansion::{ExpansionPolicy, ExpansionTracker};
pub use profile::{
    clamp_gpa, snap_budget, DegreeLevel, FundingSource, IntakeTerm, PriorityGoal, ProfileDraft,
    ProfileUpdate, ValidationError,
};
pub use reorder::ReorderError;
pub use request::{normalize, RecommendationRequest};

use tracing::{debug, info, warn};

use crate::advisory::client::{RecommendationClient, TransportError};
use crate::advisory::{Advisory, ResultSet};

/// Annotation attached when an alternative is promoted over the original
/// top recommendation.
pub const PROMOTED_NOTE: &str =
    "Alternative pathway promoted. The detailed analysis still reflects the original top recommendation.";

/// Handle for one in-flight submission. Completions carrying anything other
/// than the latest ticket are discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmissionTicket {
    seq: u64,
}

impl SubmissionTicket {
    pub fn seq(self) -> u64 {
        self.seq
    }
}

/// Lifecycle of the one network operation a session performs. There is no
/// terminal state; `Succeeded` and `Failed` both re-enter `Submitting` on
/// the next submission.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionPhase {
    Idle,
    Submitting { seq: u64 },
    Succeeded { seq: u64 },
    Failed { seq: u64, error: TransportError },
}

/// Whether a completion was applied or discarded as out of date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionStatus {
    Applied,
    Stale,
}

/// Deferred UI work the controller schedules and the front end drains.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEffect {
    ScrollToResults,
}

/// Owns all mutable state for one intake session.
#[derive(Debug)]
pub struct AdvisorSession {
    profile: ProfileDraft,
    phase: SubmissionPhase,
    next_seq: u64,
    advisory: Option<Advisory>,
    annotation: Option<String>,
    show_result: bool,
    expansion: ExpansionTracker,
    effects: Vec<SessionEffect>,
}

impl AdvisorSession {
    pub fn new(expansion_policy: ExpansionPolicy) -> Self {
        Self {
            profile: ProfileDraft::default(),
            phase: SubmissionPhase::Idle,
            next_seq: 1,
            advisory: None,
            annotation: None,
            show_result: false,
            expansion: ExpansionTracker::new(expansion_policy),
            effects: Vec::new(),
        }
    }

    pub fn profile(&self) -> &ProfileDraft {
        &self.profile
    }

    pub fn update_profile(&mut self, update: ProfileUpdate) {
        self.profile.apply(update);
    }

    pub fn validate_for_submit(&self) -> Result<RecommendationRequest, ValidationError> {
        self.profile.validate_for_submit()
    }

    pub fn phase(&self) -> &SubmissionPhase {
        &self.phase
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.phase, SubmissionPhase::Submitting { .. })
    }

    /// Whether the front end should render the result section.
    pub fn show_result(&self) -> bool {
        self.show_result
    }

    pub fn advisory(&self) -> Option<&Advisory> {
        self.advisory.as_ref()
    }

    pub fn annotation(&self) -> Option<&str> {
        self.annotation.as_deref()
    }

    /// The transport error of the most recent submission, if it failed.
    pub fn last_error(&self) -> Option<&TransportError> {
        match &self.phase {
            SubmissionPhase::Failed { error, .. } => Some(error),
            _ => None,
        }
    }

    /// Starts a new submission, superseding whatever was in flight. Clears
    /// the prior error, the promote annotation, and the show-result flag.
    pub fn begin_submit(&mut self) -> SubmissionTicket {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.phase = SubmissionPhase::Submitting { seq };
        self.show_result = false;
        self.annotation = None;
        info!(seq, "submission started");
        SubmissionTicket { seq }
    }

    /// Applies a finished submission if it is still the latest one. A
    /// completion for a superseded ticket returns [`CompletionStatus::Stale`]
    /// and leaves every piece of session state untouched.
    pub fn complete(
        &mut self,
        ticket: SubmissionTicket,
        outcome: Result<Advisory, TransportError>,
    ) -> CompletionStatus {
        match self.phase {
            SubmissionPhase::Submitting { seq } if seq == ticket.seq => {}
            _ => {
                warn!(seq = ticket.seq, "discarding stale submission completion");
                return CompletionStatus::Stale;
            }
        }

        match outcome {
            Ok(advisory) => {
                info!(
                    seq = ticket.seq,
                    options = advisory.result.len(),
                    "submission succeeded"
                );
                self.advisory = Some(advisory);
                self.show_result = true;
                self.phase = SubmissionPhase::Succeeded { seq: ticket.seq };
                self.effects.push(SessionEffect::ScrollToResults);
            }
            Err(error) => {
                // A failure keeps whatever advisory an earlier submission
                // produced; only a success replaces the snapshot.
                info!(seq = ticket.seq, %error, "submission failed");
                self.phase = SubmissionPhase::Failed {
                    seq: ticket.seq,
                    error,
                };
            }
        }
        CompletionStatus::Applied
    }

    /// Runs one full submission against `client`. Validation stays at the
    /// form boundary: an incomplete draft returns the error without touching
    /// the state machine or issuing a network call.
    pub fn submit(
        &mut self,
        client: &dyn RecommendationClient,
    ) -> Result<CompletionStatus, ValidationError> {
        let request = self.validate_for_submit()?;
        let ticket = self.begin_submit();
        let outcome = client.recommend(&request);
        Ok(self.complete(ticket, outcome))
    }

    /// Promotes `key` to rank 0 of a ranked result set, replacing the
    /// snapshot with the reordered value. Promoting the current rank 0 is a
    /// no-op; a key that is no longer present (stale interaction across a
    /// result replacement) fails with [`ReorderError::KeyNotFound`].
    pub fn promote(&mut self, key: &str) -> Result<(), ReorderError> {
        let advisory = self
            .advisory
            .as_mut()
            .ok_or_else(|| ReorderError::KeyNotFound(key.to_string()))?;

        let options = match &advisory.result {
            ResultSet::Ranked(options) => options,
            ResultSet::Buckets(_) => return Err(ReorderError::NotRanked),
        };

        if options.first().map(|option| option.key() == key) == Some(true) {
            return Ok(());
        }

        let reordered = reorder::promote(options, key)?;
        advisory.result = ResultSet::Ranked(reordered);
        self.annotation = Some(PROMOTED_NOTE.to_string());
        self.effects.push(SessionEffect::ScrollToResults);
        debug!(key, "alternative promoted to rank 0");
        Ok(())
    }

    pub fn toggle_detail(&mut self, key: &str) {
        self.expansion.toggle(key);
    }

    pub fn is_expanded(&self, key: &str) -> bool {
        self.expansion.is_expanded(key)
    }

    pub fn expansion(&self) -> &ExpansionTracker {
        &self.expansion
    }

    /// Drains the deferred UI work scheduled since the last call.
    pub fn take_effects(&mut self) -> Vec<SessionEffect> {
        std::mem::take(&mut self.effects)
    }
}
