//! KYC authentication
//!
//! Factors are checked in a fixed order: OTP, PIN, biometrics, tokens. Each
//! present factor overwrites the running auth status. A wrong PIN or an
//! empty first token aborts immediately; a wrong OTP aborts but leaves the
//! challenge pending; biometrics always pass.

use mock_ida_core::{IdaError, KycAuthRequest, KycAuthResult, Result};
use tracing::{info, warn};

use super::AuthenticationService;

impl AuthenticationService {
    /// Authenticate an individual and mint a KYC auth transaction
    pub async fn kyc_auth(
        &self,
        relying_party_id: &str,
        client_id: &str,
        request: KycAuthRequest,
    ) -> Result<KycAuthResult> {
        let identity = self.resolve_identity(&request.individual_id).await?;
        let mut auth_status = false;

        if let Some(otp) = &request.otp {
            if request.transaction_id.is_empty() {
                warn!("OTP authentication without transaction id");
                return Err(IdaError::InvalidTransactionId);
            }
            auth_status = self
                .otp
                .verify(&request.transaction_id, &request.individual_id, otp)?;
        }

        if let Some(pin) = &request.pin {
            auth_status = identity.pin.as_deref() == Some(pin.as_str());
            if !auth_status {
                warn!(individual_id = %request.individual_id, "PIN mismatch");
                return Err(IdaError::AuthFailed);
            }
        }

        if request.biometrics.is_some() {
            // Biometric matching is not simulated
            auth_status = true;
        }

        if let Some(first_token) = request.tokens.as_ref().and_then(|t| t.first()) {
            auth_status = !first_token.is_empty();
            if !auth_status {
                warn!(individual_id = %request.individual_id, "Empty bearer token");
                return Err(IdaError::AuthFailed);
            }
        }

        let transaction = self
            .transactions
            .create(&request.transaction_id, relying_party_id, &request.individual_id)
            .await?;

        info!(
            relying_party_id = %relying_party_id,
            client_id = %client_id,
            transaction_id = %request.transaction_id,
            auth_status = auth_status,
            "KYC auth completed"
        );

        Ok(KycAuthResult {
            auth_status,
            kyc_token: transaction.kyc_token,
            partner_specific_user_token: transaction.partner_specific_user_token,
        })
    }
}
