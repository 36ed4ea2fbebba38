//! Mock IDA Service
//!
//! A stand-in identity authenticator for exercising relying parties and
//! identity-provider frontends without a real identity backend:
//! - Issues fixed-value OTP challenges over masked contact channels
//! - Authenticates individuals by OTP, PIN, biometrics or bearer token
//! - Mints single-use KYC auth transactions
//! - Exchanges them, within a validity window, for signed claims documents
//!
//! ## API Endpoints
//!
//! - `GET /health` - Liveness check
//! - `POST /v1/send-otp/{relying_party_id}/{client_id}` - Issue an OTP challenge
//! - `POST /v1/kyc/auth/{relying_party_id}/{client_id}` - Authenticate and mint a kyc token
//! - `POST /v1/kyc/exchange/{relying_party_id}/{client_id}` - Redeem a kyc token for claims
//! - `GET /v1/identity/{individual_id}` - Inspect a seeded identity

pub mod api;
pub mod identity;
pub mod otp;
pub mod service;
pub mod storage;

pub use api::create_router;
pub use api::error::{ApiError, ErrorResponse};
pub use api::handlers::AppState;
pub use identity::{IdentityLookup, IdentitySeedError, InMemoryIdentityStore};
pub use otp::{OtpChallengeManager, FIXED_OTP};
pub use service::AuthenticationService;
pub use storage::{MemoryTransactionStore, StorageError, TransactionStore};
