//! # Mock IDA Core
//!
//! Domain types and primitives for a mock identity authenticator that speaks
//! the KYC-auth / KYC-exchange protocol of a real identity backend, with
//! deterministic stand-ins for secrets and identity data.
//!
//! ## Key Concepts
//!
//! - **KYC auth transaction**: minted by a successful authentication, consumed
//!   exactly once by an exchange within the validity window
//! - **PSUT**: partner specific user token, a deterministic pseudonym of an
//!   individual per relying party
//! - **Claims policy**: maps an identity record to the claims a relying party
//!   was granted, resolved for the requested locale
//! - **Packaging**: the claims document is signed and optionally encrypted

pub mod claims;
pub mod config;
pub mod crypto;
pub mod error;
pub mod types;

pub use claims::{ClaimTransform, ClaimsPolicyEngine, LocaleSelection};
pub use config::{ConfigError, MockIdaConfig};
pub use crypto::{JwsSigner, KycEncrypter, KycPackager, KycSigner, UnresolvedKeyEncrypter};
pub use error::{ClaimsError, IdaError, Result};
pub use types::{
    IdentityRecord, KycAuthRequest, KycAuthResult, KycAuthTransaction, KycDocument,
    KycExchangeRequest, KycExchangeResult, LanguageValue, SendOtpRequest, SendOtpResult, Validity,
};
