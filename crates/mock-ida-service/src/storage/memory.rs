//! In-memory transaction store
//!
//! Default storage implementation using an in-memory hashmap keyed by kyc
//! token. Data is lost on restart, which is enough for a test run.

use async_trait::async_trait;
use mock_ida_core::{KycAuthTransaction, Validity};
use std::collections::HashMap;
use std::sync::RwLock;
use tracing::{debug, info};

use super::{StorageError, TransactionStore};

/// In-memory transaction store implementation
#[derive(Debug, Default)]
pub struct MemoryTransactionStore {
    transactions: RwLock<HashMap<String, KycAuthTransaction>>,
}

impl MemoryTransactionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TransactionStore for MemoryTransactionStore {
    async fn save(&self, transaction: KycAuthTransaction) -> Result<(), StorageError> {
        let mut transactions = self.transactions.write().map_err(|_| StorageError::Poisoned)?;
        if transactions.contains_key(&transaction.kyc_token) {
            return Err(StorageError::AlreadyExists(transaction.transaction_id));
        }
        debug!(transaction_id = %transaction.transaction_id, "Saving KYC auth transaction");
        transactions.insert(transaction.kyc_token.clone(), transaction);
        Ok(())
    }

    async fn get(&self, kyc_token: &str) -> Result<Option<KycAuthTransaction>, StorageError> {
        let transactions = self.transactions.read().map_err(|_| StorageError::Poisoned)?;
        Ok(transactions.get(kyc_token).cloned())
    }

    async fn find_active(
        &self,
        kyc_token: &str,
        transaction_id: &str,
        individual_id: &str,
    ) -> Result<Option<KycAuthTransaction>, StorageError> {
        let transactions = self.transactions.read().map_err(|_| StorageError::Poisoned)?;
        Ok(transactions
            .get(kyc_token)
            .filter(|t| {
                t.validity == Validity::Active
                    && t.transaction_id == transaction_id
                    && t.individual_id == individual_id
            })
            .cloned())
    }

    async fn transition(&self, kyc_token: &str, to: Validity) -> Result<bool, StorageError> {
        let mut transactions = self.transactions.write().map_err(|_| StorageError::Poisoned)?;
        match transactions.get_mut(kyc_token) {
            Some(transaction) if transaction.validity == Validity::Active && to.is_terminal() => {
                transaction.validity = to;
                info!(
                    transaction_id = %transaction.transaction_id,
                    validity = %to,
                    "KYC auth transaction transitioned"
                );
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn count(&self) -> Result<usize, StorageError> {
        let transactions = self.transactions.read().map_err(|_| StorageError::Poisoned)?;
        Ok(transactions.len())
    }
}
