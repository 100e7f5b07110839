use crate::core::{ConsentOutcome, MatchStore, MatchingEngine};
use crate::error::MatchError;
use crate::models::{
    CandidateListResponse, ConsentQuery, ErrorResponse, HealthResponse, MatchQuery, PairState,
    PairStateQuery, PairStateResponse,
};
use crate::routes::auth::AuthenticatedUser;
use crate::services::{CacheKey, CacheManager, PostgresStore, SkillRanker};
use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<MatchingEngine<PostgresStore>>,
    pub ranker: Arc<SkillRanker>,
    pub cache: Option<Arc<CacheManager>>,
}

/// Configure all matching routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/projects/match", web::get().to(find_candidates))
        .route("/freelancers/{freelancerId}/ok", web::post().to(client_ok))
        .route("/freelancers/{freelancerId}/nok", web::post().to(client_nok))
        .route("/projects/{projectId}/ok", web::post().to(freelancer_ok))
        .route("/projects/{projectId}/nok", web::post().to(freelancer_nok))
        .route("/pairs/state", web::get().to(pair_state));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let pg_healthy = state.engine.store().health_check().await.unwrap_or(false);

    let status = if pg_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Ranked candidate freelancers for a project
///
/// GET /api/v1/projects/match?projectId=P&limit=N
///
/// The caller must be the project's owning client. Results may come from
/// cache; declined freelancers are filtered out on every path.
async fn find_candidates(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
    query: web::Query<MatchQuery>,
) -> Result<HttpResponse, MatchError> {
    if let Err(errors) = query.validate() {
        tracing::info!("Validation failed for candidate query: {:?}", errors);
        return Ok(HttpResponse::BadRequest().json(ErrorResponse {
            error: "validation_failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        }));
    }

    let project_id = query.project_id;
    let limit = query.limit.min(100) as usize;

    // Ownership gate before touching the cache; the engine re-validates on
    // the uncached path.
    let project = state
        .engine
        .store()
        .project(project_id)
        .await?
        .ok_or(MatchError::ProjectNotFound(project_id))?;
    if project.client_id != auth.0 {
        return Err(MatchError::NotProjectOwner(auth.0, project_id));
    }

    let cache_key = CacheKey::candidates(project_id, limit);
    if let Some(cache) = &state.cache {
        if let Ok(cached) = cache.get::<CandidateListResponse>(&cache_key).await {
            tracing::debug!("Serving cached candidates for project {}", project_id);
            return Ok(HttpResponse::Ok().json(cached));
        }
    }

    let candidates = state
        .engine
        .ranked_candidates(auth.0, state.ranker.as_ref(), project_id, limit)
        .await?;

    let response = CandidateListResponse {
        project_id,
        total: candidates.len(),
        candidates,
    };

    if let Some(cache) = &state.cache {
        if let Err(e) = cache.set(&cache_key, &response).await {
            tracing::warn!("Failed to cache candidates for {}: {}", project_id, e);
        }
    }

    tracing::info!(
        "Returning {} candidates for project {}",
        response.total,
        project_id
    );

    Ok(HttpResponse::Ok().json(response))
}

/// Client approves a freelancer for a project
///
/// POST /api/v1/freelancers/{freelancerId}/ok?projectId=P
///
/// May create a Match as a side effect when the freelancer has already
/// approved the project.
async fn client_ok(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
    path: web::Path<Uuid>,
    query: web::Query<ConsentQuery>,
) -> Result<HttpResponse, MatchError> {
    let freelancer_id = path.into_inner();

    let outcome = state
        .engine
        .client_approves(auth.0, freelancer_id, query.project_id)
        .await?;

    Ok(consent_response(outcome))
}

/// Client declines a freelancer for a project
///
/// POST /api/v1/freelancers/{freelancerId}/nok?projectId=P
async fn client_nok(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
    path: web::Path<Uuid>,
    query: web::Query<ConsentQuery>,
) -> Result<HttpResponse, MatchError> {
    let freelancer_id = path.into_inner();
    let project_id = query.project_id;

    let outcome = state
        .engine
        .client_declines(auth.0, freelancer_id, project_id)
        .await?;

    // Declined freelancers must never resurface in cached candidate lists
    if let Some(cache) = &state.cache {
        let pattern = CacheKey::candidates_pattern(project_id);
        if let Err(e) = cache.invalidate_pattern(&pattern).await {
            tracing::warn!("Failed to invalidate candidate cache for {}: {}", project_id, e);
        }
    }

    Ok(consent_response(outcome))
}

/// Freelancer approves a project (actor id from the authenticated caller)
///
/// POST /api/v1/projects/{projectId}/ok
async fn freelancer_ok(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, MatchError> {
    let project_id = path.into_inner();

    let outcome = state.engine.freelancer_approves(auth.0, project_id).await?;

    Ok(consent_response(outcome))
}

/// Freelancer declines a project
///
/// POST /api/v1/projects/{projectId}/nok
async fn freelancer_nok(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, MatchError> {
    let project_id = path.into_inner();

    let outcome = state.engine.freelancer_declines(auth.0, project_id).await?;

    Ok(consent_response(outcome))
}

/// Derived state of a (freelancer, project) pair, for diagnostics
///
/// GET /api/v1/pairs/state?freelancerId=F&projectId=P
async fn pair_state(
    state: web::Data<AppState>,
    _auth: AuthenticatedUser,
    query: web::Query<PairStateQuery>,
) -> Result<HttpResponse, MatchError> {
    let derived = state
        .engine
        .pair_state(query.freelancer_id, query.project_id)
        .await?;

    Ok(HttpResponse::Ok().json(PairStateResponse {
        freelancer_id: query.freelancer_id,
        project_id: query.project_id,
        state: derived,
    }))
}

fn consent_response(outcome: ConsentOutcome) -> HttpResponse {
    HttpResponse::Ok().json(crate::models::ConsentResponse {
        matched: outcome.state == PairState::Matched,
        match_id: outcome.match_id,
        state: outcome.state,
    })
}
