//! Storage abstraction for KYC auth transactions
//!
//! Transactions are created ACTIVE and leave that state at most once, either
//! to EXPIRED or to PROCESSED. Backends implement the transition as a
//! compare-and-set so two concurrent exchanges cannot both advance the same
//! record. Records are never deleted.

pub mod memory;

pub use memory::MemoryTransactionStore;

use async_trait::async_trait;
use chrono::Utc;
use mock_ida_core::crypto::{derive_psut, generate_kyc_token};
use mock_ida_core::{IdaError, KycAuthTransaction, Validity};
use std::fmt::Debug;
use tracing::info;

/// Error type for storage operations
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Transaction already exists: {0}")]
    AlreadyExists(String),

    #[error("Storage lock poisoned")]
    Poisoned,
}

impl From<StorageError> for IdaError {
    fn from(err: StorageError) -> Self {
        IdaError::TransactionPersistFailed(err.to_string())
    }
}

/// Storage backend trait for KYC auth transactions
///
/// Implementations must be thread-safe and support concurrent access.
#[async_trait]
pub trait TransactionStore: Send + Sync + Debug {
    /// Persist a new transaction
    async fn save(&self, transaction: KycAuthTransaction) -> Result<(), StorageError>;

    /// Get a transaction by kyc token, whatever its validity
    async fn get(&self, kyc_token: &str) -> Result<Option<KycAuthTransaction>, StorageError>;

    /// Find the ACTIVE transaction matching all three identifiers
    async fn find_active(
        &self,
        kyc_token: &str,
        transaction_id: &str,
        individual_id: &str,
    ) -> Result<Option<KycAuthTransaction>, StorageError>;

    /// Move an ACTIVE transaction to `to`
    ///
    /// Returns `true` only for the call that performed the transition; a
    /// transaction that is already terminal (or unknown) is left untouched.
    async fn transition(&self, kyc_token: &str, to: Validity) -> Result<bool, StorageError>;

    /// Number of stored transactions
    async fn count(&self) -> Result<usize, StorageError>;

    /// Mint and persist a new ACTIVE transaction
    async fn create(
        &self,
        transaction_id: &str,
        relying_party_id: &str,
        individual_id: &str,
    ) -> mock_ida_core::Result<KycAuthTransaction> {
        let partner_specific_user_token = derive_psut(individual_id, relying_party_id);

        let transaction = KycAuthTransaction {
            kyc_token: generate_kyc_token(),
            partner_specific_user_token,
            response_time: Utc::now(),
            validity: Validity::Active,
            transaction_id: transaction_id.to_string(),
            individual_id: individual_id.to_string(),
        };

        self.save(transaction.clone()).await?;
        info!(
            transaction_id = %transaction_id,
            relying_party_id = %relying_party_id,
            "Created KYC auth transaction"
        );
        Ok(transaction)
    }

    /// Mark an ACTIVE transaction EXPIRED
    async fn mark_expired(&self, kyc_token: &str) -> Result<bool, StorageError> {
        self.transition(kyc_token, Validity::Expired).await
    }

    /// Mark an ACTIVE transaction PROCESSED
    async fn mark_processed(&self, kyc_token: &str) -> Result<bool, StorageError> {
        self.transition(kyc_token, Validity::Processed).await
    }
}
