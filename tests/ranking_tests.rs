// Candidate ranking port tests: the engine's exclusion and ownership
// guarantees hold regardless of what a ranker implementation returns

mod common;

use common::MemoryStore;
use uuid::Uuid;
use workmatch::core::{CandidateRanking, MatchingEngine, StoreError};
use workmatch::error::MatchError;
use workmatch::models::{Project, RankedCandidate, Role};

/// Ranker stub returning a fixed list, duplicates and all
struct FixedRanker {
    candidates: Vec<RankedCandidate>,
}

impl CandidateRanking for FixedRanker {
    async fn rank(&self, _project: &Project, limit: usize) -> Result<Vec<RankedCandidate>, StoreError> {
        let mut out = self.candidates.clone();
        out.truncate(limit);
        Ok(out)
    }
}

fn candidate(id: Uuid, score: f64) -> RankedCandidate {
    RankedCandidate {
        user_id: id,
        name: format!("candidate-{}", id),
        shared_skills: vec!["rust".to_string()],
        hourly_rate: Some(60.0),
        score,
    }
}

#[tokio::test]
async fn test_declined_freelancer_never_reappears() {
    let store = MemoryStore::default();
    let client = store.add_user("Acme Inc", Role::Client);
    let liked = store.add_user("Dana", Role::Freelancer);
    let declined = store.add_user("Riley", Role::Freelancer);
    let project = store.add_project(client, "Backend rewrite");
    let engine = MatchingEngine::new(store.clone());

    engine.client_declines(client, declined, project).await.unwrap();

    // The ranker still returns the declined freelancer; the engine must not
    let ranker = FixedRanker {
        candidates: vec![candidate(declined, 95.0), candidate(liked, 80.0)],
    };

    let result = engine.ranked_candidates(client, &ranker, project, 10).await.unwrap();

    assert_eq!(result.len(), 1);
    assert_eq!(result[0].user_id, liked);
}

#[tokio::test]
async fn test_duplicates_are_collapsed() {
    let store = MemoryStore::default();
    let client = store.add_user("Acme Inc", Role::Client);
    let freelancer = store.add_user("Dana", Role::Freelancer);
    let project = store.add_project(client, "Backend rewrite");
    let engine = MatchingEngine::new(store.clone());

    let ranker = FixedRanker {
        candidates: vec![candidate(freelancer, 90.0), candidate(freelancer, 70.0)],
    };

    let result = engine.ranked_candidates(client, &ranker, project, 10).await.unwrap();

    assert_eq!(result.len(), 1);
    assert_eq!(result[0].score, 90.0);
}

#[tokio::test]
async fn test_limit_is_respected() {
    let store = MemoryStore::default();
    let client = store.add_user("Acme Inc", Role::Client);
    let project = store.add_project(client, "Backend rewrite");
    let engine = MatchingEngine::new(store.clone());

    let candidates: Vec<RankedCandidate> = (0..20)
        .map(|i| candidate(Uuid::new_v4(), 100.0 - i as f64))
        .collect();
    let ranker = FixedRanker { candidates };

    let result = engine.ranked_candidates(client, &ranker, project, 5).await.unwrap();

    assert_eq!(result.len(), 5);
    // Rank order preserved
    for pair in result.windows(2) {
        assert!(pair[0].score >= pair[1].score);
    }
}

#[tokio::test]
async fn test_only_the_owning_client_can_rank() {
    let store = MemoryStore::default();
    let owner = store.add_user("Acme Inc", Role::Client);
    let other_client = store.add_user("Globex", Role::Client);
    let freelancer = store.add_user("Dana", Role::Freelancer);
    let project = store.add_project(owner, "Backend rewrite");
    let engine = MatchingEngine::new(store.clone());

    let ranker = FixedRanker { candidates: vec![] };

    assert!(matches!(
        engine.ranked_candidates(other_client, &ranker, project, 10).await,
        Err(MatchError::NotProjectOwner(actor, pid)) if actor == other_client && pid == project
    ));

    assert!(matches!(
        engine.ranked_candidates(freelancer, &ranker, project, 10).await,
        Err(MatchError::RoleMismatch { expected: Role::Client, .. })
    ));
}

#[tokio::test]
async fn test_unknown_project_is_rejected() {
    let store = MemoryStore::default();
    let client = store.add_user("Acme Inc", Role::Client);
    let engine = MatchingEngine::new(store.clone());

    let missing = Uuid::new_v4();
    let ranker = FixedRanker { candidates: vec![] };

    assert!(matches!(
        engine.ranked_candidates(client, &ranker, missing, 10).await,
        Err(MatchError::ProjectNotFound(id)) if id == missing
    ));
}
