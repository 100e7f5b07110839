// Core matching exports
pub mod engine;
pub mod ranking;
pub mod state;
pub mod store;

pub use engine::{ConsentOutcome, MatchingEngine};
pub use ranking::{apply_exclusions, CandidateRanking};
pub use state::derive_pair_state;
pub use store::{MatchStore, StoreError};
