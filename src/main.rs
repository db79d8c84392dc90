use actix_cors::Cors;
use actix_web::{web, App, HttpServer, HttpResponse, middleware, error, http::StatusCode};
use matcha_discovery::config::{LoggingSettings, Settings, StorageBackend};
use matcha_discovery::core::DiscoveryEngine;
use matcha_discovery::models::ScoringWeights;
use matcha_discovery::routes::{self, AppState};
use matcha_discovery::services::{InMemoryStore, PostgresClient, ProfileStore, UserStore};
use std::sync::Arc;
use tracing::{info, error};
use tracing_subscriber::EnvFilter;

/// JSON error response for malformed request payloads
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

/// Handle query string errors, e.g. a missing or non-numeric userId
pub fn handle_query_payload_error(err: error::QueryPayloadError, req: &actix_web::HttpRequest) -> actix_web::Error {
    tracing::info!("Query error on {}: {}", req.path(), err);
    JsonError {
        error: "invalid_query".to_string(),
        message: format!("Invalid query: {}", err),
        status_code: 400,
    }
    .into()
}

/// Initialize logging
///
/// `LOG_LEVEL` and `LOG_FORMAT` win over the configured values; `RUST_LOG`
/// wins over both when set.
fn init_tracing(logging: &LoggingSettings) {
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| logging.level.clone());
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| logging.format.clone());

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if log_format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }
}

fn startup_error(context: &str, err: impl std::fmt::Display) -> std::io::Error {
    error!("{}: {}", context, err);
    std::io::Error::new(std::io::ErrorKind::Other, format!("{}: {}", context, err))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()));
        }
    };

    init_tracing(&settings.logging);

    info!("Starting Matcha discovery service...");
    info!("Configuration loaded successfully");

    // Initialize the configured store backend
    let (profiles, users, postgres): (Arc<dyn ProfileStore>, Arc<dyn UserStore>, Option<Arc<PostgresClient>>) =
        match settings.storage.backend {
            StorageBackend::Postgres => {
                let db_max_conn = settings.database.max_connections.unwrap_or(10);
                let db_min_conn = settings.database.min_connections.unwrap_or(1);

                let client = PostgresClient::from_settings(
                    &settings.database.url,
                    Some(db_max_conn),
                    Some(db_min_conn),
                    settings.database.acquire_timeout_secs,
                    settings.database.idle_timeout_secs,
                )
                .await
                .map_err(|e| startup_error("Failed to connect to PostgreSQL", e))?;

                info!("PostgreSQL client initialized (max: {} connections)", db_max_conn);

                let client = Arc::new(client);
                (client.clone(), client.clone(), Some(client))
            }
            StorageBackend::Memory => {
                info!("Using in-memory store; data is not persisted");
                let store = Arc::new(InMemoryStore::new());
                (store.clone(), store, None)
            }
        };

    let weights = ScoringWeights::from(&settings.scoring.weights);
    let engine = DiscoveryEngine::new(profiles, users, weights)
        .with_search_batch_size(settings.discovery.search_batch_size);

    info!("Discovery engine initialized with weights: {:?}", weights);

    // Build application state
    let app_state = AppState {
        engine,
        discovery: settings.discovery.clone(),
        postgres,
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
