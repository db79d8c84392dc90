use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::config::DiscoverySettings;
use crate::core::{DiscoveryEngine, DiscoveryError};
use crate::models::{
    resolve_page, ErrorResponse, HealthResponse, SearchQuery, SearchResponse, SuggestionsQuery,
    SuggestionsResponse,
};
use crate::services::{PostgresClient, ProfileStore, UserStore};
use std::sync::Arc;

const PROFILE_INCOMPLETE_MESSAGE: &str =
    "Please complete your profile (gender, biography, birth date, location, at least one tag and a profile photo) to browse other profiles.";

/// Discovery engine over whichever store backend is configured
pub type Engine = DiscoveryEngine<dyn ProfileStore, dyn UserStore>;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub engine: Engine,
    pub discovery: DiscoverySettings,
    /// Present when the Postgres backend is in use
    pub postgres: Option<Arc<PostgresClient>>,
}

/// Configure all browse routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/browse/suggestions", web::get().to(get_suggestions))
        .route("/browse/search", web::get().to(search_profiles));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let healthy = match &state.postgres {
        Some(postgres) => postgres.health_check().await.unwrap_or(false),
        None => true,
    };

    let status = if healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Suggested profiles endpoint
///
/// GET /api/v1/browse/suggestions?userId={id}&limit={n}&offset={n}
async fn get_suggestions(
    state: web::Data<AppState>,
    query: web::Query<SuggestionsQuery>,
) -> impl Responder {
    if let Err(errors) = query.validate() {
        tracing::info!("Validation failed for suggestions request: {:?}", errors);
        return validation_failed(errors);
    }

    let (limit, offset) = resolve_page(
        query.limit,
        query.offset,
        state.discovery.default_limit,
        state.discovery.max_limit,
    );

    tracing::info!("Browsing suggestions for user: {}, limit: {}, offset: {}", query.user_id, limit, offset);

    match state.engine.get_suggestions(query.user_id, limit, offset).await {
        Ok(suggestions) => HttpResponse::Ok().json(SuggestionsResponse {
            suggestions,
            profile_incomplete: false,
            message: None,
        }),
        Err(DiscoveryError::ProfileIncomplete) => HttpResponse::Ok().json(SuggestionsResponse {
            suggestions: Vec::new(),
            profile_incomplete: true,
            message: Some(PROFILE_INCOMPLETE_MESSAGE.to_string()),
        }),
        Err(DiscoveryError::Store(e)) => {
            tracing::error!("Failed to build suggestions for {}: {}", query.user_id, e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to fetch suggestions".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}

/// Advanced search endpoint
///
/// GET /api/v1/browse/search?userId={id}&min_age=&max_age=&min_fame=&max_fame=&max_distance=&tags=&sort_by=&sort_order=&limit=&offset=
async fn search_profiles(
    state: web::Data<AppState>,
    query: web::Query<SearchQuery>,
) -> impl Responder {
    if let Err(errors) = query.validate() {
        tracing::info!("Validation failed for search request: {:?}", errors);
        return validation_failed(errors);
    }

    let filters = query.to_filters();
    let (limit, offset) = resolve_page(
        query.limit,
        query.offset,
        state.discovery.default_limit,
        state.discovery.max_limit,
    );

    tracing::info!("Searching profiles for user: {}, filters: {:?}", query.user_id, filters);

    match state
        .engine
        .search_profiles(query.user_id, &filters, limit, offset)
        .await
    {
        Ok(results) => HttpResponse::Ok().json(SearchResponse {
            results,
            profile_incomplete: false,
            message: None,
        }),
        Err(DiscoveryError::ProfileIncomplete) => HttpResponse::Ok().json(SearchResponse {
            results: Vec::new(),
            profile_incomplete: true,
            message: Some(PROFILE_INCOMPLETE_MESSAGE.to_string()),
        }),
        Err(DiscoveryError::Store(e)) => {
            tracing::error!("Failed to search profiles for {}: {}", query.user_id, e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to search profiles".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}

fn validation_failed(errors: validator::ValidationErrors) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse {
        error: "Validation failed".to_string(),
        message: errors.to_string(),
        status_code: 400,
    })
}
