//! Client-side core for the pathway recommendation service.
//!
//! The crate owns everything between the intake form and the wire: the
//! mutable profile draft and its validation, the request normalizer, the
//! submission state machine with its stale-response guard, the returned
//! result set, and the promote/expansion interactions layered on top of it.
//! The recommendation engine itself is an external HTTP collaborator reached
//! through [`advisory::client::RecommendationClient`].

pub mod advisory;
pub mod config;
pub mod session;
pub mod telemetry;
