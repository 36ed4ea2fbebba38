//! Identity lookup
//!
//! The authenticator only reads identity records. `IdentityLookup` is the
//! seam for plugging in whatever backs them; `InMemoryIdentityStore` is the
//! default, optionally seeded from a JSON file.

use async_trait::async_trait;
use mock_ida_core::IdentityRecord;
use std::collections::HashMap;
use std::path::Path;
use std::sync::RwLock;
use thiserror::Error;
use tracing::{info, warn};

/// Errors raised while seeding an identity store
#[derive(Debug, Error)]
pub enum IdentitySeedError {
    #[error("Failed to read identities file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid identities file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Backend trait for identity lookups
#[async_trait]
pub trait IdentityLookup: Send + Sync {
    /// Return the identity for `individual_id`, or `None` if unknown
    async fn get_identity(&self, individual_id: &str) -> Option<IdentityRecord>;
}

/// In-memory identity store for testing
#[derive(Debug, Default)]
pub struct InMemoryIdentityStore {
    identities: RwLock<HashMap<String, IdentityRecord>>,
}

impl InMemoryIdentityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding `records`
    pub fn with_identities(records: impl IntoIterator<Item = IdentityRecord>) -> Self {
        let store = Self::new();
        for record in records {
            store.insert(record);
        }
        store
    }

    /// Load a JSON array of identity records
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, IdentitySeedError> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let records: Vec<IdentityRecord> = serde_json::from_str(&raw)?;
        info!(
            path = %path.as_ref().display(),
            count = records.len(),
            "Loaded identities"
        );
        Ok(Self::with_identities(records))
    }

    /// Add or replace an identity
    pub fn insert(&self, record: IdentityRecord) {
        match self.identities.write() {
            Ok(mut identities) => {
                identities.insert(record.individual_id.clone(), record);
            }
            Err(_) => warn!("Identity store lock poisoned; identity not inserted"),
        }
    }

    pub fn len(&self) -> usize {
        self.identities.read().map(|i| i.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl IdentityLookup for InMemoryIdentityStore {
    async fn get_identity(&self, individual_id: &str) -> Option<IdentityRecord> {
        let identities = self.identities.read().ok()?;
        identities.get(individual_id).cloned()
    }
}
