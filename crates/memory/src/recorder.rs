use async_trait::async_trait;
use dashmap::DashMap;

use dropgate_coordinator::{BackendError, MetadataRecorder};
use dropgate_core::UploadRecord;

use crate::failure::FailureSwitch;

/// In-memory [`MetadataRecorder`] using `DashMap`. Suitable for development
/// and testing.
///
/// Records are kept per table in insertion order. Every write appends; no
/// record is ever replaced.
#[derive(Debug, Default)]
pub struct MemoryRecorder {
    tables: DashMap<String, Vec<UploadRecord>>,
    failure: FailureSwitch,
}

impl MemoryRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent write and health check fail with `message`.
    pub fn fail_with(&self, message: impl Into<String>) {
        self.failure.set(Some(message.into()));
    }

    pub fn recover(&self) {
        self.failure.set(None);
    }

    /// Records written to `table`, oldest first.
    pub fn records(&self, table: &str) -> Vec<UploadRecord> {
        self.tables
            .get(table)
            .map(|records| records.value().clone())
            .unwrap_or_default()
    }

    /// Total number of records across all tables.
    pub fn len(&self) -> usize {
        self.tables.iter().map(|entry| entry.value().len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl MetadataRecorder for MemoryRecorder {
    #[allow(clippy::unnecessary_literal_bound)]
    fn name(&self) -> &str {
        "memory"
    }

    async fn put_record(&self, table: &str, record: &UploadRecord) -> Result<(), BackendError> {
        self.failure.check()?;
        self.tables
            .entry(table.to_owned())
            .or_default()
            .push(record.clone());
        Ok(())
    }

    async fn health_check(&self) -> Result<(), BackendError> {
        self.failure.check()
    }
}
