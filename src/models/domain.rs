use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Marketplace user. Clients post projects, freelancers are candidates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub role: Role,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(rename = "hourlyRate", default)]
    pub hourly_rate: Option<f64>,
    #[serde(rename = "isActive", default = "default_true")]
    pub is_active: bool,
    #[serde(rename = "createdAt")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

fn default_true() -> bool {
    true
}

/// Which side of the marketplace a user is on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
pub enum Role {
    Client,
    Freelancer,
}

/// A project posted by a client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: Uuid,
    #[serde(rename = "clientId")]
    pub client_id: Uuid,
    pub title: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub budget: Option<f64>,
    #[serde(rename = "createdAt")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// One side's current decision about a (freelancer, project) pair.
///
/// A pair has at most one decision row per side, so a counterpart can never
/// sit in both the approved and declined sets at once. Re-deciding replaces
/// the row in a single upsert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "consent_decision", rename_all = "lowercase")]
pub enum ConsentDecision {
    Approved,
    Declined,
}

/// Confirmed mutual pairing. Immutable once created; the storage-level
/// uniqueness of (freelancer_id, project_id) is what makes concurrent
/// reciprocal likes converge on a single record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Match {
    pub id: Uuid,
    #[serde(rename = "freelancerId")]
    pub freelancer_id: Uuid,
    #[serde(rename = "projectId")]
    pub project_id: Uuid,
    #[serde(rename = "clientId")]
    pub client_id: Uuid,
    #[serde(rename = "createdAt")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// State of a (freelancer, project) pair, derived from the two consent sides
/// and the match ledger. Never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PairState {
    Undecided,
    FreelancerInterested,
    ClientApproved,
    /// Terminal: both sides approved and a Match record exists.
    Matched,
    Rejected,
}

/// Scored candidate produced by the ranking port
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedCandidate {
    #[serde(rename = "userId")]
    pub user_id: Uuid,
    pub name: String,
    #[serde(rename = "sharedSkills")]
    pub shared_skills: Vec<String>,
    #[serde(rename = "hourlyRate")]
    pub hourly_rate: Option<f64>,
    pub score: f64,
}

/// Weights for the reference skill/rate ranker
#[derive(Debug, Clone, Copy)]
pub struct RankingWeights {
    pub skills: f64,
    pub rate: f64,
}

impl Default for RankingWeights {
    fn default() -> Self {
        Self {
            skills: 0.7,
            rate: 0.3,
        }
    }
}
