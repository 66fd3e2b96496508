use std::time::Duration;

use axum::http::Method;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use pra_service::StorageService;

use crate::endpoint;
use crate::handler;

/// Permissive CORS: any origin and header, preflight cached for an hour.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any)
        .max_age(Duration::from_secs(3600))
}

/// Build the axum router with all storage endpoints under `/api/v1`.
pub fn build_router(service: StorageService) -> Router {
    let api = Router::new()
        .route(endpoint::STORE_CODE, post(handler::store_code))
        .route(endpoint::STORE_CODE_FOR_PR, post(handler::store_code_for_pr))
        .route(endpoint::STORE_SUMMARY_FOR_PR, post(handler::store_summary_for_pr))
        .route(endpoint::STORE_SUMMARY, post(handler::store_summary))
        .route(endpoint::RETRIEVE_SUMMARY, post(handler::retrieve_summary))
        .route(endpoint::RETRIEVE_SUMMARY_FOR_PR, get(handler::retrieve_summary_for_pr))
        .route(endpoint::RETRIEVE_CODE, post(handler::retrieve_code))
        .route(endpoint::RETRIEVE_CODE_FOR_PR, get(handler::retrieve_code_for_pr))
        .route(endpoint::HEALTH, get(handler::health))
        .with_state(service);

    Router::new()
        .nest(endpoint::API_PREFIX, api)
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
}
