//! Common types used across the mock identity authenticator

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Claims document handed to the signer
pub type KycDocument = serde_json::Map<String, serde_json::Value>;

/// A value tagged with the language it is written in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageValue {
    /// Language tag (e.g., "eng", "fra", "eng-US")
    pub language: String,
    pub value: String,
}

impl LanguageValue {
    pub fn new(language: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            value: value.into(),
        }
    }
}

/// Identity record as returned by the identity lookup
///
/// Read-only to the authenticator. Per-locale fields keep their original
/// order so that claim resolution is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityRecord {
    pub individual_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pin: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<Vec<LanguageValue>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Vec<LanguageValue>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street_address: Option<Vec<LanguageValue>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locality: Option<Vec<LanguageValue>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<Vec<LanguageValue>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<Vec<LanguageValue>>,

    /// Base64 encoded photo
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encoded_photo: Option<String>,
}

impl IdentityRecord {
    /// Create a record with only the individual identifier set
    pub fn new(individual_id: impl Into<String>) -> Self {
        Self {
            individual_id: individual_id.into(),
            ..Default::default()
        }
    }

    pub fn with_pin(mut self, pin: impl Into<String>) -> Self {
        self.pin = Some(pin.into());
        self
    }

    pub fn with_full_name(mut self, values: Vec<LanguageValue>) -> Self {
        self.full_name = Some(values);
        self
    }

    pub fn with_gender(mut self, values: Vec<LanguageValue>) -> Self {
        self.gender = Some(values);
        self
    }

    pub fn with_date_of_birth(mut self, dob: impl Into<String>) -> Self {
        self.date_of_birth = Some(dob.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn with_street_address(mut self, values: Vec<LanguageValue>) -> Self {
        self.street_address = Some(values);
        self
    }

    pub fn with_locality(mut self, values: Vec<LanguageValue>) -> Self {
        self.locality = Some(values);
        self
    }

    pub fn with_region(mut self, values: Vec<LanguageValue>) -> Self {
        self.region = Some(values);
        self
    }

    pub fn with_country(mut self, values: Vec<LanguageValue>) -> Self {
        self.country = Some(values);
        self
    }

    pub fn with_postal_code(mut self, postal_code: impl Into<String>) -> Self {
        self.postal_code = Some(postal_code.into());
        self
    }

    pub fn with_encoded_photo(mut self, photo: impl Into<String>) -> Self {
        self.encoded_photo = Some(photo.into());
        self
    }
}

/// Validity state of a KYC auth transaction
///
/// `Active` is the only non-terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Validity {
    Active,
    Expired,
    Processed,
}

impl Validity {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Validity::Active)
    }
}

impl std::fmt::Display for Validity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Validity::Active => write!(f, "ACTIVE"),
            Validity::Expired => write!(f, "EXPIRED"),
            Validity::Processed => write!(f, "PROCESSED"),
        }
    }
}

/// A KYC authentication transaction minted by a successful kyc-auth call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KycAuthTransaction {
    /// Opaque, unguessable token handed to the relying party
    pub kyc_token: String,

    /// Deterministic pseudonym of (individual, relying party)
    pub partner_specific_user_token: String,

    /// When the transaction was created (UTC)
    pub response_time: DateTime<Utc>,

    pub validity: Validity,

    pub transaction_id: String,

    pub individual_id: String,
}

/// Request to send an OTP
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendOtpRequest {
    pub individual_id: String,
    pub transaction_id: String,
    #[serde(default)]
    pub otp_channels: Vec<String>,
}

/// Result of sending an OTP
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendOtpResult {
    pub transaction_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub masked_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub masked_mobile: Option<String>,
}

/// Request to authenticate an individual
///
/// Each factor is optional; the authenticator evaluates whichever are present.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KycAuthRequest {
    pub individual_id: String,
    #[serde(default)]
    pub transaction_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub otp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pin: Option<String>,
    /// Biometric capture in whatever shape the client sends; only its presence counts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub biometrics: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tokens: Option<Vec<String>>,
}

impl KycAuthRequest {
    pub fn new(individual_id: impl Into<String>, transaction_id: impl Into<String>) -> Self {
        Self {
            individual_id: individual_id.into(),
            transaction_id: transaction_id.into(),
            ..Default::default()
        }
    }

    pub fn with_otp(mut self, otp: impl Into<String>) -> Self {
        self.otp = Some(otp.into());
        self
    }

    pub fn with_pin(mut self, pin: impl Into<String>) -> Self {
        self.pin = Some(pin.into());
        self
    }

    pub fn with_biometrics(mut self, biometrics: impl Into<serde_json::Value>) -> Self {
        self.biometrics = Some(biometrics.into());
        self
    }

    pub fn with_tokens(mut self, tokens: Vec<String>) -> Self {
        self.tokens = Some(tokens);
        self
    }
}

/// Result of a kyc-auth call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KycAuthResult {
    pub auth_status: bool,
    pub kyc_token: String,
    pub partner_specific_user_token: String,
}

/// Request to exchange a kyc token for a claims document
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KycExchangeRequest {
    pub individual_id: String,
    pub transaction_id: String,
    pub kyc_token: String,
    pub request_date_time: DateTime<Utc>,
    #[serde(default)]
    pub accepted_claims: Vec<String>,
    #[serde(default)]
    pub claim_locales: Vec<String>,
}

/// Result of a kyc-exchange call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KycExchangeResult {
    /// Signed (and optionally encrypted) claims document
    pub kyc: String,
}
