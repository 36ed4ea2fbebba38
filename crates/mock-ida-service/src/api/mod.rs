//! HTTP API for the mock authenticator

pub mod error;
pub mod handlers;

use axum::{
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use handlers::AppState;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// GET /health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".into(),
        version: env!("CARGO_PKG_VERSION").into(),
    })
}

/// Create the API router
pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/v1/send-otp/{relying_party_id}/{client_id}", post(handlers::send_otp))
        .route("/v1/kyc/auth/{relying_party_id}/{client_id}", post(handlers::kyc_auth))
        .route("/v1/kyc/exchange/{relying_party_id}/{client_id}", post(handlers::kyc_exchange))
        .route("/v1/identity/{individual_id}", get(handlers::get_identity))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
