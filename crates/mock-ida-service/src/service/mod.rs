//! Authentication service
//!
//! Orchestrates the three protocol operations over the shared components:
//!
//! - `send_otp`: issue an OTP challenge for an individual
//! - `kyc_auth`: check the presented factors and mint a KYC auth transaction
//! - `kyc_exchange`: redeem the transaction for a signed claims document
//!
//! Relying party and client identifiers are accepted on every call but not
//! validated.

mod kyc_auth;
mod kyc_exchange;
mod send_otp;

use mock_ida_core::{ClaimsPolicyEngine, IdaError, IdentityRecord, KycPackager, MockIdaConfig, Result};
use std::sync::Arc;
use tracing::warn;

use crate::identity::IdentityLookup;
use crate::otp::OtpChallengeManager;
use crate::storage::TransactionStore;

/// The mock authenticator
pub struct AuthenticationService {
    config: Arc<MockIdaConfig>,
    identities: Arc<dyn IdentityLookup>,
    transactions: Arc<dyn TransactionStore>,
    otp: OtpChallengeManager,
    claims: ClaimsPolicyEngine,
    packager: KycPackager,
}

impl AuthenticationService {
    pub fn new(
        config: Arc<MockIdaConfig>,
        identities: Arc<dyn IdentityLookup>,
        transactions: Arc<dyn TransactionStore>,
        packager: KycPackager,
    ) -> Self {
        let claims = ClaimsPolicyEngine::new(config.default_language.clone());
        Self {
            config,
            identities,
            transactions,
            otp: OtpChallengeManager::new(),
            claims,
            packager,
        }
    }

    pub fn config(&self) -> &MockIdaConfig {
        &self.config
    }

    pub fn otp(&self) -> &OtpChallengeManager {
        &self.otp
    }

    pub fn transactions(&self) -> &Arc<dyn TransactionStore> {
        &self.transactions
    }

    pub fn identities(&self) -> &Arc<dyn IdentityLookup> {
        &self.identities
    }

    async fn resolve_identity(&self, individual_id: &str) -> Result<IdentityRecord> {
        self.identities.get_identity(individual_id).await.ok_or_else(|| {
            warn!(individual_id = %individual_id, "Individual id not found");
            IdaError::InvalidIndividualId(individual_id.to_string())
        })
    }
}
