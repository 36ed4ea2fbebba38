//! KYC exchange
//!
//! Redeems an ACTIVE transaction within its validity window for a signed
//! (optionally encrypted) claims document. State changes are kept even when a
//! later step fails: an expired transaction stays EXPIRED and a transaction
//! whose signing fails stays PROCESSED.

use mock_ida_core::{IdaError, KycExchangeRequest, KycExchangeResult, Result};
use serde_json::Value;
use tracing::{error, info, warn};

use super::AuthenticationService;

impl AuthenticationService {
    /// Exchange a kyc token for the accepted claims
    pub async fn kyc_exchange(
        &self,
        relying_party_id: &str,
        client_id: &str,
        request: KycExchangeRequest,
    ) -> Result<KycExchangeResult> {
        let identity = self.resolve_identity(&request.individual_id).await?;

        let transaction = self
            .transactions
            .find_active(&request.kyc_token, &request.transaction_id, &request.individual_id)
            .await?
            .ok_or_else(|| {
                warn!(transaction_id = %request.transaction_id, "No active KYC auth transaction");
                IdaError::TransactionNotFound
            })?;

        let elapsed_secs = (request.request_date_time - transaction.response_time).num_seconds();
        if elapsed_secs < 0 || elapsed_secs > self.config.transaction_timeout_secs {
            self.transactions.mark_expired(&transaction.kyc_token).await?;
            warn!(
                transaction_id = %request.transaction_id,
                elapsed_secs = elapsed_secs,
                timeout_secs = self.config.transaction_timeout_secs,
                "KYC auth transaction expired"
            );
            return Err(IdaError::TransactionExpired { elapsed_secs });
        }

        let mut document = self
            .claims
            .build(&identity, &request.accepted_claims, &request.claim_locales)
            .map_err(|e| {
                error!(error = %e, "Failed to build KYC data");
                IdaError::ExchangeFailed
            })?;
        document.insert(
            "sub".into(),
            Value::String(transaction.partner_specific_user_token.clone()),
        );

        match self.transactions.mark_processed(&transaction.kyc_token).await {
            Ok(true) => {}
            Ok(false) => {
                warn!(
                    transaction_id = %request.transaction_id,
                    "KYC auth transaction no longer active"
                );
                return Err(IdaError::TransactionNotFound);
            }
            Err(e) => {
                error!(error = %e, "Failed to mark KYC auth transaction processed");
                return Err(IdaError::ExchangeFailed);
            }
        }

        let kyc = self
            .packager
            .package(relying_party_id, &document)
            .map_err(|e| {
                error!(error = %e, code = e.code(), "Failed to package KYC data");
                IdaError::ExchangeFailed
            })?;

        info!(
            relying_party_id = %relying_party_id,
            client_id = %client_id,
            transaction_id = %request.transaction_id,
            claims = document.len(),
            encrypted = self.packager.encrypts(),
            "KYC exchange completed"
        );

        Ok(KycExchangeResult { kyc })
    }
}
