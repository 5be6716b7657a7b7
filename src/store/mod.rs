//! Record store adapter: the single boundary between the handlers and the
//! table holding records.
//!
//! Every operation is a single-key (or whole-table scan) call with no
//! retries; any failure comes back as an `anyhow::Error`.

pub mod memory;
pub mod spanner;

use anyhow::Result;

use crate::config::{Config, StoreConfig};
use crate::models::Record;

pub use memory::MemoryStore;
pub use spanner::SpannerStore;

/// Shareable handle to the record table, built once at startup
#[derive(Clone)]
pub enum RecordStore {
    Spanner(SpannerStore),
    Memory(MemoryStore),
}

impl RecordStore {
    pub async fn from_config(config: &Config) -> Result<Self> {
        match &config.store {
            StoreConfig::Spanner(spanner) => {
                Ok(RecordStore::Spanner(SpannerStore::from_config(spanner).await?))
            }
            StoreConfig::Memory => {
                tracing::info!("Using in-memory record store");
                Ok(RecordStore::Memory(MemoryStore::new()))
            }
        }
    }

    /// Fetch one record; `Ok(None)` when no record has this id
    pub async fn get(&self, id: &str) -> Result<Option<Record>> {
        match self {
            RecordStore::Spanner(store) => store.get(id).await,
            RecordStore::Memory(store) => store.get(id).await,
        }
    }

    /// Insert or fully overwrite the record stored under `record.id`
    pub async fn put(&self, record: &Record) -> Result<()> {
        match self {
            RecordStore::Spanner(store) => store.put(record).await,
            RecordStore::Memory(store) => store.put(record).await,
        }
    }

    /// Remove a record; removing a missing id succeeds
    pub async fn delete(&self, id: &str) -> Result<()> {
        match self {
            RecordStore::Spanner(store) => store.delete(id).await,
            RecordStore::Memory(store) => store.delete(id).await,
        }
    }

    /// Every record in the table, in no particular order and without paging
    pub async fn scan_all(&self) -> Result<Vec<Record>> {
        match self {
            RecordStore::Spanner(store) => store.scan_all().await,
            RecordStore::Memory(store) => store.scan_all().await,
        }
    }
}
