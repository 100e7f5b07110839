//! Workmatch - mutual-consent matching service for a freelance marketplace
//!
//! Clients approve freelancers for their projects, freelancers approve
//! projects, and the matching engine durably records exactly one Match per
//! (freelancer, project) pair once both sides agree, under concurrent and
//! repeated requests.

pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{apply_exclusions, derive_pair_state, CandidateRanking, MatchStore, MatchingEngine, StoreError};
pub use error::MatchError;
pub use models::{ConsentDecision, Match, PairState, Project, RankedCandidate, RankingWeights, Role, User};
pub use services::score_candidate;
