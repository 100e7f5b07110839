// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{ConsentDecision, Match, PairState, Project, RankedCandidate, RankingWeights, Role, User};
pub use requests::{ConsentQuery, MatchQuery, PairStateQuery};
pub use responses::{CandidateListResponse, ConsentResponse, ErrorResponse, HealthResponse, PairStateResponse};
