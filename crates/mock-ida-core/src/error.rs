//! Error types for the mock identity authenticator

use thiserror::Error;

/// Result type alias using IdaError
pub type Result<T> = std::result::Result<T, IdaError>;

/// Errors surfaced by the authentication and exchange operations
///
/// Every variant maps to a stable identifier (see [`IdaError::code`]) that
/// client code under test can match on.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdaError {
    /// No identity record exists for the individual identifier
    #[error("Invalid individual id: {0}")]
    InvalidIndividualId(String),

    /// OTP authentication was requested without a transaction identifier
    #[error("Invalid transaction id")]
    InvalidTransactionId,

    /// No pending OTP challenge for the transaction/individual pair
    #[error("Invalid transaction: no pending OTP challenge")]
    InvalidTransaction,

    /// Wrong OTP, PIN or token
    #[error("Authentication failed")]
    AuthFailed,

    /// Requested OTP channel is not in the allow-list
    #[error("Unsupported OTP channel: {0}")]
    InvalidOtpChannel(String),

    /// Identity has neither an email nor a phone for the requested channels
    #[error("Neither email nor mobile number found for individual")]
    NoContactChannelFound,

    /// No ACTIVE transaction matches the exchange request
    #[error("KYC auth transaction not found")]
    TransactionNotFound,

    /// Exchange attempted outside the transaction validity window
    #[error("KYC auth transaction expired ({elapsed_secs}s elapsed)")]
    TransactionExpired { elapsed_secs: i64 },

    /// Claims build, signing or encryption failed; the cause is only logged
    #[error("Failed to build KYC data")]
    ExchangeFailed,

    /// Partner specific user token could not be derived
    #[error("Failed to generate partner specific user token: {0}")]
    PsutGenerationFailed(String),

    /// Transaction record could not be persisted
    #[error("Failed to persist KYC auth transaction: {0}")]
    TransactionPersistFailed(String),

    /// Relying party public key resolution is not available
    #[error("KYC encryption not supported for relying party: {0}")]
    EncryptionUnsupported(String),

    /// Signing collaborator failed
    #[error("Signing failed: {0}")]
    SigningFailed(String),

    /// Payload could not be serialized
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl IdaError {
    /// Stable identifier reported to callers
    pub fn code(&self) -> &'static str {
        match self {
            IdaError::InvalidIndividualId(_) => "invalid_individual_id",
            IdaError::InvalidTransactionId => "invalid_transaction_id",
            IdaError::InvalidTransaction => "invalid_transaction",
            IdaError::AuthFailed => "auth_failed",
            IdaError::InvalidOtpChannel(_) => "invalid_otp_channel",
            IdaError::NoContactChannelFound => "no_email_mobile_found",
            IdaError::TransactionNotFound => "mock-ida-006",
            IdaError::TransactionExpired { .. } => "mock-ida-007",
            IdaError::ExchangeFailed => "mock-ida-008",
            IdaError::PsutGenerationFailed(_) => "mock-ida-004",
            IdaError::TransactionPersistFailed(_) => "mock-ida-005",
            IdaError::EncryptionUnsupported(_) => "jwe-not-implemented",
            IdaError::SigningFailed(_) | IdaError::Serialization(_) => "mock-ida-008",
        }
    }
}

impl From<serde_json::Error> for IdaError {
    fn from(err: serde_json::Error) -> Self {
        IdaError::Serialization(err.to_string())
    }
}

/// Errors raised while assembling a claims document
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClaimsError {
    /// Two selected values resolved to the same output key
    #[error("Ambiguous locale values for claim key '{0}'")]
    AmbiguousLocaleValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_are_stable() {
        assert_eq!(IdaError::InvalidIndividualId("x".into()).code(), "invalid_individual_id");
        assert_eq!(IdaError::TransactionNotFound.code(), "mock-ida-006");
        assert_eq!(IdaError::TransactionExpired { elapsed_secs: 61 }.code(), "mock-ida-007");
        assert_eq!(IdaError::ExchangeFailed.code(), "mock-ida-008");
        assert_eq!(IdaError::NoContactChannelFound.code(), "no_email_mobile_found");
    }

    #[test]
    fn test_exchange_failure_hides_cause() {
        let err = IdaError::ExchangeFailed;
        assert_eq!(err.to_string(), "Failed to build KYC data");
    }
}
