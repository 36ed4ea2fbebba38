//! OTP issuance

use mock_ida_core::{IdaError, Result, SendOtpRequest, SendOtpResult};
use tracing::{info, warn};

use super::AuthenticationService;
use crate::otp::{mask_email, mask_mobile};

impl AuthenticationService {
    /// Issue an OTP challenge and report where it was "sent"
    ///
    /// All requested channels must be allowed, and at least one of them must
    /// resolve to a contact on the identity. Nothing is issued otherwise.
    pub async fn send_otp(
        &self,
        relying_party_id: &str,
        client_id: &str,
        request: SendOtpRequest,
    ) -> Result<SendOtpResult> {
        let identity = self.resolve_identity(&request.individual_id).await?;

        if let Some(channel) = request
            .otp_channels
            .iter()
            .find(|c| !self.config.is_supported_otp_channel(c))
        {
            warn!(channel = %channel, "Unsupported OTP channel");
            return Err(IdaError::InvalidOtpChannel(channel.clone()));
        }

        let mut masked_email = None;
        let mut masked_mobile = None;
        for channel in &request.otp_channels {
            match channel.to_lowercase().as_str() {
                "email" => masked_email = identity.email.as_deref().and_then(mask_email),
                "phone" | "mobile" => masked_mobile = identity.phone.as_deref().and_then(mask_mobile),
                _ => {}
            }
        }

        if masked_email.is_none() && masked_mobile.is_none() {
            warn!(
                individual_id = %request.individual_id,
                "Neither email nor mobile number found for individual"
            );
            return Err(IdaError::NoContactChannelFound);
        }

        self.otp.issue(&request.transaction_id, &request.individual_id);
        info!(
            relying_party_id = %relying_party_id,
            client_id = %client_id,
            transaction_id = %request.transaction_id,
            channels = ?request.otp_channels,
            "OTP sent"
        );

        Ok(SendOtpResult {
            transaction_id: request.transaction_id,
            masked_email,
            masked_mobile,
        })
    }
}
