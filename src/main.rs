use actix_cors::Cors;
use actix_web::{web, App, HttpServer, HttpResponse, middleware, error, http::StatusCode};
use std::io::{Error as IoError, ErrorKind};
use std::sync::Arc;
use tracing::{info, warn, error};
use tracing_subscriber::EnvFilter;

use study_buddy::config::{LoggingSettings, Settings, StorageBackend};
use study_buddy::core::Ranker;
use study_buddy::models::ScoringWeights;
use study_buddy::routes::{self, AppState};
use study_buddy::services::{
    AppwriteProfileStore, CacheManager, CachedProfileStore, CandidateService, InMemoryStore,
    LikeService, LikeStore, PostgresLikeStore, ProfileStore, TokenVerifier,
};

/// JSON error response for JSON payload errors
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
            .json(self)
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

fn init_tracing(logging: &LoggingSettings) {
    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if logging.format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.json().init();
    }
}

fn startup_error(message: String) -> IoError {
    error!("{}", message);
    IoError::new(ErrorKind::Other, message)
}

/// Build the profile and like stores for the configured backend
async fn build_stores(settings: &Settings) -> std::io::Result<(Arc<dyn ProfileStore>, Arc<dyn LikeStore>)> {
    match settings.storage.backend {
        StorageBackend::Memory => {
            warn!("Using in-memory stores; data is lost on restart");
            let store = Arc::new(InMemoryStore::new());
            Ok((store.clone(), store))
        }
        StorageBackend::Remote => {
            let appwrite_settings = settings
                .appwrite
                .as_ref()
                .ok_or_else(|| startup_error("Remote storage requires an [appwrite] section".to_string()))?;

            let appwrite = AppwriteProfileStore::new(
                appwrite_settings.endpoint.clone(),
                appwrite_settings.api_key.clone(),
                appwrite_settings.project_id.clone(),
                appwrite_settings.database_id.clone(),
                settings.collection.profiles.clone(),
                settings.collection.list_limit,
            )
            .map_err(|e| startup_error(format!("Failed to create Appwrite client: {}", e)))?;

            info!("Appwrite profile store initialized");

            // Cache is optional: without Redis the profile cache runs L1-only
            let cache_ttl = settings.cache.ttl_secs.unwrap_or(300);
            let l1_cache_size = settings.cache.l1_cache_size.unwrap_or(1000);

            let cache = match settings.cache.redis_url.as_deref() {
                Some(url) => match CacheManager::new(url, l1_cache_size, cache_ttl).await {
                    Ok(cache) => cache,
                    Err(e) => {
                        error!("Failed to connect to Redis ({}), running with L1 cache only", e);
                        CacheManager::in_memory(l1_cache_size, cache_ttl)
                    }
                },
                None => CacheManager::in_memory(l1_cache_size, cache_ttl),
            };

            info!(
                "Cache manager initialized (L1: {} entries, TTL: {}s, Redis: {})",
                l1_cache_size,
                cache_ttl,
                cache.has_redis()
            );

            let profiles = CachedProfileStore::new(appwrite, Arc::new(cache));

            let db = settings
                .database
                .as_ref()
                .ok_or_else(|| startup_error("Remote storage requires a [database] section".to_string()))?;

            let likes = PostgresLikeStore::from_settings(
                &db.url,
                db.max_connections,
                db.min_connections,
                db.acquire_timeout_secs,
                db.idle_timeout_secs,
            )
            .await
            .map_err(|e| startup_error(format!("Failed to connect to PostgreSQL: {}", e)))?;

            info!("PostgreSQL like store initialized");

            Ok((Arc::new(profiles), Arc::new(likes)))
        }
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = Settings::load().map_err(|e| {
        eprintln!("Configuration error: {}", e);
        IoError::new(ErrorKind::InvalidInput, e.to_string())
    })?;

    init_tracing(&settings.logging);

    info!("Starting studyBUddy matching service...");

    let (profiles, like_store) = build_stores(&settings).await?;

    let weights = ScoringWeights::from(&settings.ranking.weights);
    let ranker = Ranker::new(weights);

    info!("Ranker initialized with weights: {:?}", weights);

    let likes = LikeService::new(like_store);
    let candidates = CandidateService::new(
        profiles.clone(),
        likes.clone(),
        ranker,
        settings.session.capacity,
        settings.session.idle_secs,
    );

    let app_state = AppState {
        profiles,
        likes,
        candidates: Arc::new(candidates),
        verifier: Arc::new(TokenVerifier::new(&settings.auth.jwt_secret)),
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
