use crate::models::{ConsentDecision, Match, Project, User};
use uuid::Uuid;

/// Opaque storage failure. The engine treats all storage errors as one
/// retryable class; every operation is idempotent, so callers may repeat.
#[derive(Debug, thiserror::Error)]
#[error("storage failure: {0}")]
pub struct StoreError(#[source] Box<dyn std::error::Error + Send + Sync>);

impl StoreError {
    pub fn new<E>(source: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self(source.into())
    }
}

/// Persistence seam for the matching engine: entity reads, the two consent
/// sides, and the match ledger.
///
/// Implementations must guarantee two things:
/// - recording a decision replaces the pair's previous decision in a single
///   atomic update (one current decision per pair per side), and
/// - `create_match_if_absent` enforces uniqueness of
///   `(freelancer_id, project_id)` at the storage level, so concurrent
///   callers cannot both create a record for the same pair.
#[allow(async_fn_in_trait)]
pub trait MatchStore {
    async fn user(&self, id: Uuid) -> Result<Option<User>, StoreError>;

    async fn project(&self, id: Uuid) -> Result<Option<Project>, StoreError>;

    /// Record the client side's decision about a freelancer for a project.
    /// Idempotent upsert.
    async fn record_client_decision(
        &self,
        project_id: Uuid,
        freelancer_id: Uuid,
        decision: ConsentDecision,
    ) -> Result<(), StoreError>;

    /// Record the freelancer side's decision about a project.
    /// Idempotent upsert.
    async fn record_freelancer_decision(
        &self,
        freelancer_id: Uuid,
        project_id: Uuid,
        decision: ConsentDecision,
    ) -> Result<(), StoreError>;

    async fn client_decision(
        &self,
        project_id: Uuid,
        freelancer_id: Uuid,
    ) -> Result<Option<ConsentDecision>, StoreError>;

    async fn freelancer_decision(
        &self,
        freelancer_id: Uuid,
        project_id: Uuid,
    ) -> Result<Option<ConsentDecision>, StoreError>;

    /// Freelancer ids the client has declined for this project. Ranking
    /// output must never contain any of these.
    async fn declined_freelancers(&self, project_id: Uuid) -> Result<Vec<Uuid>, StoreError>;

    /// Insert a match for the pair unless one already exists. Returns the
    /// surviving record and whether this call performed the creation. A
    /// losing concurrent insert is not an error.
    async fn create_match_if_absent(
        &self,
        freelancer_id: Uuid,
        project_id: Uuid,
        client_id: Uuid,
    ) -> Result<(Match, bool), StoreError>;

    async fn find_match(
        &self,
        freelancer_id: Uuid,
        project_id: Uuid,
    ) -> Result<Option<Match>, StoreError>;
}
