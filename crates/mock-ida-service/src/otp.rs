//! OTP challenges
//!
//! The mock never delivers an OTP; the expected value is always
//! [`FIXED_OTP`]. A challenge is pending from `issue` until it is verified
//! with the right value. A wrong value leaves it pending so the caller can
//! retry.

use mock_ida_core::crypto::challenge_key;
use mock_ida_core::{IdaError, Result};
use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, info, warn};

/// The OTP every challenge expects
pub const FIXED_OTP: &str = "111111";

/// Pending OTP challenges keyed by (transaction, individual)
#[derive(Debug, Default)]
pub struct OtpChallengeManager {
    pending: Mutex<HashSet<String>>,
}

impl OtpChallengeManager {
    pub fn new() -> Self {
        Self::default()
    }

    fn pending(&self) -> MutexGuard<'_, HashSet<String>> {
        // Inserts and removes are single operations; a poisoned set is still consistent
        self.pending.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Issue a challenge for the transaction/individual pair
    pub fn issue(&self, transaction_id: &str, individual_id: &str) {
        let key = challenge_key(transaction_id, individual_id, FIXED_OTP);
        let newly_pending = self.pending().insert(key);
        debug!(
            transaction_id = %transaction_id,
            newly_pending = newly_pending,
            "Issued OTP challenge"
        );
    }

    /// Verify `supplied_otp` against the pending challenge
    ///
    /// Lookup, comparison and removal happen under one lock, so a challenge
    /// is consumed at most once.
    pub fn verify(&self, transaction_id: &str, individual_id: &str, supplied_otp: &str) -> Result<bool> {
        let key = challenge_key(transaction_id, individual_id, FIXED_OTP);
        let mut pending = self.pending();

        if !pending.contains(&key) {
            warn!(transaction_id = %transaction_id, "No pending OTP challenge");
            return Err(IdaError::InvalidTransaction);
        }

        if supplied_otp != FIXED_OTP {
            warn!(transaction_id = %transaction_id, "OTP mismatch; challenge left pending");
            return Err(IdaError::AuthFailed);
        }

        pending.remove(&key);
        info!(transaction_id = %transaction_id, "OTP challenge verified");
        Ok(true)
    }

    /// Whether a challenge is pending for the pair
    pub fn is_pending(&self, transaction_id: &str, individual_id: &str) -> bool {
        let key = challenge_key(transaction_id, individual_id, FIXED_OTP);
        self.pending().contains(&key)
    }

    pub fn pending_count(&self) -> usize {
        self.pending().len()
    }
}

/// Mask a phone number: the first `len / 2 + 1` characters become `X`
pub fn mask_mobile(phone: &str) -> Option<String> {
    if phone.is_empty() {
        return None;
    }
    let chars: Vec<char> = phone.chars().collect();
    let masked_len = (chars.len() / 2 + 1).min(chars.len());
    Some(
        chars
            .iter()
            .enumerate()
            .map(|(i, c)| if i < masked_len { 'X' } else { *c })
            .collect(),
    )
}

/// Mask an email address
///
/// Within the local part, every character except each third one becomes `X`.
/// The domain is kept.
pub fn mask_email(email: &str) -> Option<String> {
    if email.is_empty() {
        return None;
    }
    let local_len = email.split('@').next().map(|l| l.chars().count()).unwrap_or(0);
    Some(
        email
            .chars()
            .enumerate()
            .map(|(i, c)| {
                let position = i + 1;
                if position <= local_len && position % 3 != 0 {
                    'X'
                } else {
                    c
                }
            })
            .collect(),
    )
}
