use anyhow::Result;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::models::Record;

/// Process-local record table
///
/// Clones share the same table. Each operation holds the lock only for its
/// own key (or the scan), matching the single-key atomicity of a remote
/// table.
#[derive(Clone, Default)]
pub struct MemoryStore {
    records: Arc<RwLock<HashMap<String, Record>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, id: &str) -> Result<Option<Record>> {
        let record = self.records.read().await.get(id).cloned();
        tracing::debug!("Read record with id: {} (found: {})", id, record.is_some());
        Ok(record)
    }

    pub async fn put(&self, record: &Record) -> Result<()> {
        self.records
            .write()
            .await
            .insert(record.id.clone(), record.clone());
        tracing::debug!("Stored record with id: {}", record.id);
        Ok(())
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        self.records.write().await.remove(id);
        tracing::debug!("Deleted record with id: {}", id);
        Ok(())
    }

    pub async fn scan_all(&self) -> Result<Vec<Record>> {
        let records: Vec<Record> = self.records.read().await.values().cloned().collect();
        tracing::debug!("Scanned {} records", records.len());
        Ok(records)
    }
}
