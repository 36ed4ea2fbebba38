//! Authenticator configuration
//!
//! Built once at startup and shared by reference with the components that
//! need it. Every option has a default so an empty environment yields a
//! working authenticator.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default transaction validity window in seconds
pub const DEFAULT_TRANSACTION_TIMEOUT_SECS: i64 = 60;

/// Default claims locale
pub const DEFAULT_LANGUAGE: &str = "eng";

/// Errors raised while reading configuration
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}

/// Mock authenticator configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MockIdaConfig {
    /// Seconds after kyc-auth within which kyc-exchange must happen
    pub transaction_timeout_secs: i64,

    /// Encrypt the signed claims document for the relying party
    pub encrypt_kyc: bool,

    /// Locale used when an exchange requests none
    pub default_language: String,

    /// Allowed OTP channels (lower case)
    pub otp_channels: Vec<String>,
}

impl Default for MockIdaConfig {
    fn default() -> Self {
        Self {
            transaction_timeout_secs: DEFAULT_TRANSACTION_TIMEOUT_SECS,
            encrypt_kyc: false,
            default_language: DEFAULT_LANGUAGE.to_string(),
            otp_channels: vec!["email".into(), "phone".into(), "mobile".into()],
        }
    }
}

impl MockIdaConfig {
    /// Read configuration from `MOCK_IDA_*` environment variables
    ///
    /// - `MOCK_IDA_TRANSACTION_TIMEOUT_SECS`
    /// - `MOCK_IDA_ENCRYPT_KYC`
    /// - `MOCK_IDA_DEFAULT_LANGUAGE`
    /// - `MOCK_IDA_OTP_CHANNELS` (comma separated)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup("MOCK_IDA_TRANSACTION_TIMEOUT_SECS") {
            config.transaction_timeout_secs = value
                .trim()
                .parse::<i64>()
                .ok()
                .filter(|secs| *secs >= 0)
                .ok_or_else(|| ConfigError::InvalidValue {
                    key: "MOCK_IDA_TRANSACTION_TIMEOUT_SECS".into(),
                    value: value.clone(),
                })?;
        }

        if let Some(value) = lookup("MOCK_IDA_ENCRYPT_KYC") {
            config.encrypt_kyc = value.trim().parse::<bool>().map_err(|_| {
                ConfigError::InvalidValue {
                    key: "MOCK_IDA_ENCRYPT_KYC".into(),
                    value: value.clone(),
                }
            })?;
        }

        if let Some(value) = lookup("MOCK_IDA_DEFAULT_LANGUAGE") {
            let value = value.trim();
            if value.is_empty() {
                return Err(ConfigError::InvalidValue {
                    key: "MOCK_IDA_DEFAULT_LANGUAGE".into(),
                    value: value.to_string(),
                });
            }
            config.default_language = value.to_string();
        }

        if let Some(value) = lookup("MOCK_IDA_OTP_CHANNELS") {
            config.otp_channels = value
                .split(',')
                .map(|c| c.trim().to_lowercase())
                .filter(|c| !c.is_empty())
                .collect();
        }

        Ok(config)
    }

    /// Check a requested OTP channel against the allow-list
    pub fn is_supported_otp_channel(&self, channel: &str) -> bool {
        let channel = channel.to_lowercase();
        self.otp_channels.iter().any(|c| *c == channel)
    }
}
