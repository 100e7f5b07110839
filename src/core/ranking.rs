use crate::core::store::StoreError;
use crate::models::{Project, RankedCandidate};
use std::collections::HashSet;
use uuid::Uuid;

/// Candidate Ranking Port.
///
/// Given a project, produce an ordered, scored list of candidate
/// freelancers. Implementations choose the scoring; the engine guarantees
/// the served list is deduplicated and contains no freelancer the client
/// has declined, whatever the port returns.
#[allow(async_fn_in_trait)]
pub trait CandidateRanking {
    async fn rank(&self, project: &Project, limit: usize) -> Result<Vec<RankedCandidate>, StoreError>;
}

/// Strip declined freelancers and duplicate ids, preserving rank order
pub fn apply_exclusions(
    candidates: Vec<RankedCandidate>,
    declined: &HashSet<Uuid>,
) -> Vec<RankedCandidate> {
    let mut seen = HashSet::new();
    candidates
        .into_iter()
        .filter(|c| !declined.contains(&c.user_id) && seen.insert(c.user_id))
        .collect()
}
