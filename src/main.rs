use actix_cors::Cors;
use actix_web::{error, http::StatusCode, middleware, web, App, HttpResponse, HttpServer};
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use workmatch::config::Settings;
use workmatch::core::MatchingEngine;
use workmatch::models::RankingWeights;
use workmatch::routes;
use workmatch::routes::matching::AppState;
use workmatch::services::{CacheManager, PostgresStore, SkillRanker};

/// JSON error response for payload errors
#[derive(Debug, serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for JsonError {}

impl error::ResponseError for JsonError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::BAD_REQUEST))
            .content_type("application/json")
            .body(serde_json::to_string(self).unwrap())
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &actix_web::HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    JsonError {
        error: "invalid_json".to_string(),
        message: format!("Invalid JSON: {}", err),
        status_code: 400,
    }
    .into()
}

/// Handle query payload errors
pub fn handle_query_payload_error(err: error::QueryPayloadError, _req: &actix_web::HttpRequest) -> actix_web::Error {
    JsonError {
        error: "invalid_query".to_string(),
        message: format!("Invalid query: {}", err),
        status_code: 400,
    }
    .into()
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Load configuration before the subscriber exists; RUST_LOG still wins
    // over the configured level.
    let settings = Settings::load()
        .unwrap_or_else(|e| panic!("Configuration error: {}", e));

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.logging.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if settings.logging.format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }

    info!("Starting Workmatch matching service...");
    info!("Configuration loaded successfully");

    // Initialize PostgreSQL store (runs migrations on startup)
    let db_max_conn = settings.database.max_connections.unwrap_or(10);

    let store = PostgresStore::from_settings(
        &settings.database.url,
        settings.database.max_connections,
        settings.database.min_connections,
    )
    .await
    .unwrap_or_else(|e| {
        error!("Failed to connect to PostgreSQL: {}", e);
        panic!("PostgreSQL connection error: {}", e);
    });

    info!("PostgreSQL store initialized (max: {} connections)", db_max_conn);

    // Initialize the candidate-list cache. Candidate lists are advisory, so
    // the service runs uncached when Redis is unavailable.
    let cache = match &settings.cache.redis_url {
        Some(redis_url) => {
            let ttl = settings.cache.ttl_secs.unwrap_or(300);
            let l1_size = settings.cache.l1_cache_size.unwrap_or(1000);

            match CacheManager::new(redis_url, l1_size, ttl).await {
                Ok(c) => {
                    info!("Cache initialized (L1: {} entries, TTL: {}s)", l1_size, ttl);
                    Some(Arc::new(c))
                }
                Err(e) => {
                    warn!("Redis unavailable ({}), serving candidate lists uncached", e);
                    None
                }
            }
        }
        None => {
            info!("No Redis configured, serving candidate lists uncached");
            None
        }
    };

    // Initialize the ranker with configured weights
    let weights = RankingWeights {
        skills: settings.ranking.weights.skills,
        rate: settings.ranking.weights.rate,
    };

    let ranker = Arc::new(SkillRanker::new(store.clone(), weights));

    info!("Ranker initialized with weights: {:?}", weights);

    // Build application state
    let app_state = AppState {
        engine: Arc::new(MatchingEngine::new(store)),
        ranker,
        cache,
    };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
