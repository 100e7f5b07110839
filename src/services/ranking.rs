use crate::core::ranking::CandidateRanking;
use crate::core::store::StoreError;
use crate::models::{Project, RankedCandidate, RankingWeights, User};
use crate::services::postgres::PostgresStore;

/// Reference implementation of the Candidate Ranking Port.
///
/// Ranks active freelancers for a project by weighted skill overlap and
/// hourly-rate fit against the project budget. Advisory only: reads are not
/// transactional and the engine applies consent exclusions on top.
pub struct SkillRanker {
    store: PostgresStore,
    weights: RankingWeights,
}

impl SkillRanker {
    pub fn new(store: PostgresStore, weights: RankingWeights) -> Self {
        Self { store, weights }
    }
}

impl CandidateRanking for SkillRanker {
    async fn rank(&self, project: &Project, limit: usize) -> Result<Vec<RankedCandidate>, StoreError> {
        let freelancers = self.store.list_freelancers().await.map_err(StoreError::new)?;

        let mut ranked: Vec<RankedCandidate> = freelancers
            .into_iter()
            .map(|f| {
                let (score, shared_skills) = score_candidate(project, &f, &self.weights);
                RankedCandidate {
                    user_id: f.id,
                    name: f.name,
                    shared_skills,
                    hourly_rate: f.hourly_rate,
                    score,
                }
            })
            .collect();

        // Sort by score descending, id as a stable tiebreak
        ranked.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.user_id.cmp(&b.user_id))
        });

        ranked.truncate(limit);

        Ok(ranked)
    }
}

/// Score a freelancer (0-100) against a project.
///
/// score = (skill_score * w.skills + rate_score * w.rate) * 100
pub fn score_candidate(
    project: &Project,
    freelancer: &User,
    weights: &RankingWeights,
) -> (f64, Vec<String>) {
    let (skill_score, shared_skills) = calculate_skill_score(&project.skills, &freelancer.skills);
    let rate_score = calculate_rate_score(freelancer.hourly_rate, project.budget);

    let total = (skill_score * weights.skills + rate_score * weights.rate) * 100.0;

    (total.clamp(0.0, 100.0), shared_skills)
}

/// Fraction of the project's required skills the freelancer covers (0-1).
/// A project with no listed skills scores everyone equally.
#[inline]
fn calculate_skill_score(required: &[String], offered: &[String]) -> (f64, Vec<String>) {
    if required.is_empty() {
        return (1.0, vec![]);
    }

    let offered_lower: Vec<String> = offered.iter().map(|s| s.to_lowercase()).collect();
    let shared: Vec<String> = required
        .iter()
        .filter(|s| offered_lower.contains(&s.to_lowercase()))
        .cloned()
        .collect();

    (shared.len() as f64 / required.len() as f64, shared)
}

/// Rate fit score (0-1). Full score at or under the budgeted hourly ceiling,
/// exponentially decaying above it. Neutral when either side is unpriced.
#[inline]
fn calculate_rate_score(hourly_rate: Option<f64>, budget: Option<f64>) -> f64 {
    let (rate, ceiling) = match (hourly_rate, budget) {
        (Some(r), Some(b)) if b > 0.0 => (r, b),
        _ => return 0.5,
    };

    if rate <= ceiling {
        return 1.0;
    }

    (-(rate - ceiling) / ceiling).exp()
}
