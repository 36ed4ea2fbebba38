//! API error types and responses

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use mock_ida_core::IdaError;
use serde::Serialize;
use thiserror::Error;

/// API error type
#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Ida(#[from] IdaError),
}

/// API error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl ApiError {
    /// HTTP status for this error
    pub fn status(&self) -> StatusCode {
        let ApiError::Ida(err) = self;
        match err {
            IdaError::InvalidIndividualId(_) | IdaError::TransactionNotFound => {
                StatusCode::NOT_FOUND
            }
            IdaError::InvalidTransactionId
            | IdaError::InvalidOtpChannel(_)
            | IdaError::NoContactChannelFound => StatusCode::BAD_REQUEST,
            IdaError::InvalidTransaction | IdaError::AuthFailed => StatusCode::UNAUTHORIZED,
            IdaError::TransactionExpired { .. } => StatusCode::GONE,
            IdaError::EncryptionUnsupported(_) => StatusCode::NOT_IMPLEMENTED,
            IdaError::ExchangeFailed
            | IdaError::PsutGenerationFailed(_)
            | IdaError::TransactionPersistFailed(_)
            | IdaError::SigningFailed(_)
            | IdaError::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let ApiError::Ida(err) = &self;

        let body = ErrorResponse {
            error: err.to_string(),
            code: err.code().to_string(),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_per_kind() {
        assert_eq!(
            ApiError::from(IdaError::InvalidIndividualId("x".into())).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(ApiError::from(IdaError::AuthFailed).status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            ApiError::from(IdaError::TransactionExpired { elapsed_secs: 61 }).status(),
            StatusCode::GONE
        );
        assert_eq!(
            ApiError::from(IdaError::ExchangeFailed).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_response_carries_stable_code() {
        let response = ApiError::from(IdaError::NoContactChannelFound).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
