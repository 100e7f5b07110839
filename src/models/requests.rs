use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Query for the ranked-candidate endpoint
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MatchQuery {
    #[serde(alias = "project_id", rename = "projectId")]
    pub project_id: Uuid,
    #[serde(default = "default_limit")]
    #[validate(range(min = 1, max = 100))]
    pub limit: u16,
}

fn default_limit() -> u16 {
    20
}

/// Query naming the project a consent call applies to
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsentQuery {
    #[serde(alias = "project_id", rename = "projectId")]
    pub project_id: Uuid,
}

/// Query for the derived pair-state endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PairStateQuery {
    #[serde(alias = "freelancer_id", rename = "freelancerId")]
    pub freelancer_id: Uuid,
    #[serde(alias = "project_id", rename = "projectId")]
    pub project_id: Uuid,
}
