//! API request handlers
//!
//! Thin adapters from HTTP to `AuthenticationService`. Relying party and
//! client identifiers come from the path, bodies are camelCase JSON.

use axum::{
    extract::{Path, State},
    Json,
};
use mock_ida_core::{
    IdaError, IdentityRecord, KycAuthRequest, KycAuthResult, KycExchangeRequest,
    KycExchangeResult, SendOtpRequest, SendOtpResult,
};
use std::sync::Arc;

use crate::api::error::ApiError;
use crate::service::AuthenticationService;

/// Application state shared across handlers
pub struct AppState {
    pub service: AuthenticationService,
}

/// POST /v1/send-otp/{relying_party_id}/{client_id}
pub async fn send_otp(
    State(state): State<Arc<AppState>>,
    Path((relying_party_id, client_id)): Path<(String, String)>,
    Json(request): Json<SendOtpRequest>,
) -> Result<Json<SendOtpResult>, ApiError> {
    let result = state
        .service
        .send_otp(&relying_party_id, &client_id, request)
        .await?;
    Ok(Json(result))
}

/// POST /v1/kyc/auth/{relying_party_id}/{client_id}
pub async fn kyc_auth(
    State(state): State<Arc<AppState>>,
    Path((relying_party_id, client_id)): Path<(String, String)>,
    Json(request): Json<KycAuthRequest>,
) -> Result<Json<KycAuthResult>, ApiError> {
    let result = state
        .service
        .kyc_auth(&relying_party_id, &client_id, request)
        .await?;
    Ok(Json(result))
}

/// POST /v1/kyc/exchange/{relying_party_id}/{client_id}
pub async fn kyc_exchange(
    State(state): State<Arc<AppState>>,
    Path((relying_party_id, client_id)): Path<(String, String)>,
    Json(request): Json<KycExchangeRequest>,
) -> Result<Json<KycExchangeResult>, ApiError> {
    let result = state
        .service
        .kyc_exchange(&relying_party_id, &client_id, request)
        .await?;
    Ok(Json(result))
}

/// GET /v1/identity/{individual_id}
pub async fn get_identity(
    State(state): State<Arc<AppState>>,
    Path(individual_id): Path<String>,
) -> Result<Json<IdentityRecord>, ApiError> {
    state
        .service
        .identities()
        .get_identity(&individual_id)
        .await
        .map(Json)
        .ok_or_else(|| IdaError::InvalidIndividualId(individual_id).into())
}
