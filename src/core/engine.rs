use crate::core::ranking::{apply_exclusions, CandidateRanking};
use crate::core::state::derive_pair_state;
use crate::core::store::MatchStore;
use crate::error::MatchError;
use crate::models::{ConsentDecision, PairState, Project, RankedCandidate, Role, User};
use std::collections::HashSet;
use uuid::Uuid;

/// Result of a recorded like/dislike
#[derive(Debug, Clone)]
pub struct ConsentOutcome {
    pub state: PairState,
    pub match_id: Option<Uuid>,
    /// Whether this call inserted the Match record. The loser of a
    /// concurrent reciprocal like sees `false` with the same `match_id`.
    pub newly_created: bool,
}

/// The mutual-consent state machine.
///
/// Receives like/dislike calls from either side of the marketplace, records
/// the decision, and creates a Match when both sides have approved each
/// other. The reciprocity check and insert are not serialized here; the
/// store's uniqueness constraint on the pair is what makes racing callers
/// converge on a single record.
pub struct MatchingEngine<S> {
    store: S,
}

impl<S: MatchStore> MatchingEngine<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Client approves a freelancer for one of their projects. Creates a
    /// Match if the freelancer has already approved the project.
    pub async fn client_approves(
        &self,
        actor_id: Uuid,
        freelancer_id: Uuid,
        project_id: Uuid,
    ) -> Result<ConsentOutcome, MatchError> {
        self.require_role(actor_id, Role::Client).await?;
        let project = self.require_project(project_id).await?;
        let freelancer = self.require_role(freelancer_id, Role::Freelancer).await?;

        self.store
            .record_client_decision(project_id, freelancer_id, ConsentDecision::Approved)
            .await?;

        let reciprocal = self.store.freelancer_decision(freelancer_id, project_id).await?;
        if reciprocal == Some(ConsentDecision::Approved) {
            return self.close_match(&freelancer, &project).await;
        }

        self.pair_outcome(freelancer_id, project_id, reciprocal, Some(ConsentDecision::Approved))
            .await
    }

    /// Client declines a freelancer for a project. Never creates a Match and
    /// never retracts one.
    pub async fn client_declines(
        &self,
        actor_id: Uuid,
        freelancer_id: Uuid,
        project_id: Uuid,
    ) -> Result<ConsentOutcome, MatchError> {
        self.require_role(actor_id, Role::Client).await?;
        self.require_project(project_id).await?;
        self.require_role(freelancer_id, Role::Freelancer).await?;

        self.store
            .record_client_decision(project_id, freelancer_id, ConsentDecision::Declined)
            .await?;

        let reciprocal = self.store.freelancer_decision(freelancer_id, project_id).await?;
        self.pair_outcome(freelancer_id, project_id, reciprocal, Some(ConsentDecision::Declined))
            .await
    }

    /// Freelancer approves a project. Creates a Match if the project's
    /// client has already approved the freelancer.
    pub async fn freelancer_approves(
        &self,
        actor_id: Uuid,
        project_id: Uuid,
    ) -> Result<ConsentOutcome, MatchError> {
        let freelancer = self.require_role(actor_id, Role::Freelancer).await?;
        let project = self.require_project(project_id).await?;

        self.store
            .record_freelancer_decision(actor_id, project_id, ConsentDecision::Approved)
            .await?;

        let reciprocal = self.store.client_decision(project_id, actor_id).await?;
        if reciprocal == Some(ConsentDecision::Approved) {
            return self.close_match(&freelancer, &project).await;
        }

        self.pair_outcome(actor_id, project_id, Some(ConsentDecision::Approved), reciprocal)
            .await
    }

    /// Freelancer declines a project
    pub async fn freelancer_declines(
        &self,
        actor_id: Uuid,
        project_id: Uuid,
    ) -> Result<ConsentOutcome, MatchError> {
        self.require_role(actor_id, Role::Freelancer).await?;
        self.require_project(project_id).await?;

        self.store
            .record_freelancer_decision(actor_id, project_id, ConsentDecision::Declined)
            .await?;

        let reciprocal = self.store.client_decision(project_id, actor_id).await?;
        self.pair_outcome(actor_id, project_id, Some(ConsentDecision::Declined), reciprocal)
            .await
    }

    /// Derived state of a (freelancer, project) pair
    pub async fn pair_state(
        &self,
        freelancer_id: Uuid,
        project_id: Uuid,
    ) -> Result<PairState, MatchError> {
        self.require_role(freelancer_id, Role::Freelancer).await?;
        self.require_project(project_id).await?;

        let freelancer_side = self.store.freelancer_decision(freelancer_id, project_id).await?;
        let client_side = self.store.client_decision(project_id, freelancer_id).await?;
        let matched = self.store.find_match(freelancer_id, project_id).await?.is_some();

        Ok(derive_pair_state(freelancer_side, client_side, matched))
    }

    /// Ranked candidates for a project, with declined freelancers and
    /// duplicates stripped regardless of what the ranking port returned.
    pub async fn ranked_candidates<R: CandidateRanking>(
        &self,
        actor_id: Uuid,
        ranker: &R,
        project_id: Uuid,
        limit: usize,
    ) -> Result<Vec<RankedCandidate>, MatchError> {
        self.require_role(actor_id, Role::Client).await?;
        let project = self.require_project(project_id).await?;
        if project.client_id != actor_id {
            return Err(MatchError::NotProjectOwner(actor_id, project_id));
        }

        let declined: HashSet<Uuid> = self
            .store
            .declined_freelancers(project_id)
            .await?
            .into_iter()
            .collect();

        // Over-fetch so exclusions don't eat into the requested page
        let ranked = ranker.rank(&project, limit.saturating_mul(5)).await?;
        let mut candidates = apply_exclusions(ranked, &declined);
        candidates.truncate(limit);

        tracing::debug!(
            "Serving {} candidates for project {} ({} declined excluded)",
            candidates.len(),
            project_id,
            declined.len()
        );

        Ok(candidates)
    }

    /// Record the pair in the ledger if absent. Both racers of a concurrent
    /// reciprocal like end up here; exactly one insert wins and both observe
    /// the same record.
    async fn close_match(
        &self,
        freelancer: &User,
        project: &Project,
    ) -> Result<ConsentOutcome, MatchError> {
        let (record, created) = self
            .store
            .create_match_if_absent(freelancer.id, project.id, project.client_id)
            .await?;

        if created {
            tracing::info!(
                "Match created: freelancer {} and project {} (client {})",
                freelancer.id,
                project.id,
                project.client_id
            );
        } else {
            tracing::debug!(
                "Match already exists for freelancer {} and project {}, converging",
                freelancer.id,
                project.id
            );
        }

        Ok(ConsentOutcome {
            state: PairState::Matched,
            match_id: Some(record.id),
            newly_created: created,
        })
    }

    /// Outcome for a call that did not insert a Match. Consults the ledger
    /// so the reported state never downgrades an existing match, whatever
    /// the two decision rows currently say.
    async fn pair_outcome(
        &self,
        freelancer_id: Uuid,
        project_id: Uuid,
        freelancer_side: Option<ConsentDecision>,
        client_side: Option<ConsentDecision>,
    ) -> Result<ConsentOutcome, MatchError> {
        let existing = self.store.find_match(freelancer_id, project_id).await?;
        let state = derive_pair_state(freelancer_side, client_side, existing.is_some());

        Ok(ConsentOutcome {
            state,
            match_id: existing.map(|m| m.id),
            newly_created: false,
        })
    }

    async fn require_project(&self, id: Uuid) -> Result<Project, MatchError> {
        self.store
            .project(id)
            .await?
            .ok_or(MatchError::ProjectNotFound(id))
    }

    async fn require_role(&self, id: Uuid, expected: Role) -> Result<User, MatchError> {
        let user = self.store.user(id).await?.ok_or(MatchError::UserNotFound(id))?;
        if user.role != expected {
            return Err(MatchError::RoleMismatch { id, expected });
        }
        Ok(user)
    }
}
