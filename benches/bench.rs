// Criterion benchmarks for the pure ranking path

use chrono::Utc;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::collections::HashSet;
use uuid::Uuid;
use workmatch::core::apply_exclusions;
use workmatch::models::{Project, RankedCandidate, RankingWeights, Role, User};
use workmatch::services::score_candidate;

fn create_freelancer(i: usize) -> User {
    User {
        id: Uuid::new_v4(),
        name: format!("Freelancer {}", i),
        role: Role::Freelancer,
        skills: vec!["rust".to_string(), "sql".to_string(), "docker".to_string()],
        hourly_rate: Some(40.0 + (i % 60) as f64),
        is_active: true,
        created_at: Utc::now(),
    }
}

fn create_project() -> Project {
    Project {
        id: Uuid::new_v4(),
        client_id: Uuid::new_v4(),
        title: "Backend rewrite".to_string(),
        skills: vec!["rust".to_string(), "sql".to_string()],
        budget: Some(80.0),
        created_at: Utc::now(),
    }
}

fn bench_score_candidate(c: &mut Criterion) {
    let project = create_project();
    let freelancer = create_freelancer(0);
    let weights = RankingWeights::default();

    c.bench_function("score_candidate", |b| {
        b.iter(|| score_candidate(black_box(&project), black_box(&freelancer), black_box(&weights)));
    });
}

fn bench_scoring_pipeline(c: &mut Criterion) {
    let project = create_project();
    let weights = RankingWeights::default();

    let mut group = c.benchmark_group("scoring");

    for candidate_count in [10, 100, 1000].iter() {
        let freelancers: Vec<User> = (0..*candidate_count).map(create_freelancer).collect();

        group.bench_with_input(
            BenchmarkId::new("score_and_sort", candidate_count),
            candidate_count,
            |b, _| {
                b.iter(|| {
                    let mut ranked: Vec<RankedCandidate> = freelancers
                        .iter()
                        .map(|f| {
                            let (score, shared_skills) = score_candidate(&project, f, &weights);
                            RankedCandidate {
                                user_id: f.id,
                                name: f.name.clone(),
                                shared_skills,
                                hourly_rate: f.hourly_rate,
                                score,
                            }
                        })
                        .collect();
                    ranked.sort_by(|a, b| {
                        b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal)
                    });
                    black_box(ranked)
                });
            },
        );
    }

    group.finish();
}

fn bench_apply_exclusions(c: &mut Criterion) {
    let candidates: Vec<RankedCandidate> = (0..1000)
        .map(|i| RankedCandidate {
            user_id: Uuid::new_v4(),
            name: format!("Freelancer {}", i),
            shared_skills: vec![],
            hourly_rate: None,
            score: 50.0,
        })
        .collect();

    let declined: HashSet<Uuid> = candidates.iter().step_by(10).map(|c| c.user_id).collect();

    c.bench_function("apply_exclusions_1000", |b| {
        b.iter(|| apply_exclusions(black_box(candidates.clone()), black_box(&declined)));
    });
}

criterion_group!(benches, bench_score_candidate, bench_scoring_pipeline, bench_apply_exclusions);
criterion_main!(benches);
