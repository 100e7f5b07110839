use crate::models::domain::{PairState, RankedCandidate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Response for a recorded like/dislike.
///
/// Both racers of a concurrent reciprocal like receive the same `matched`
/// flag and `match_id`, regardless of which one performed the insert.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsentResponse {
    pub state: PairState,
    pub matched: bool,
    #[serde(rename = "matchId")]
    pub match_id: Option<Uuid>,
}

/// Ranked candidates for a project
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateListResponse {
    #[serde(rename = "projectId")]
    pub project_id: Uuid,
    pub candidates: Vec<RankedCandidate>,
    pub total: usize,
}

/// Derived pair state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PairStateResponse {
    #[serde(rename = "freelancerId")]
    pub freelancer_id: Uuid,
    #[serde(rename = "projectId")]
    pub project_id: Uuid,
    pub state: PairState,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
