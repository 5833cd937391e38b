//! In-memory state store

use check_reconcile::{StateStore, StoredRecord};

/// Keeps every persisted record in order.
#[derive(Debug, Default)]
pub struct MemoryStateStore {
    records: Vec<StoredRecord>,
}

impl MemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recently persisted record
    pub fn current(&self) -> Option<&StoredRecord> {
        self.records.last()
    }

    pub fn writes(&self) -> usize {
        self.records.len()
    }
}

impl StateStore for MemoryStateStore {
    fn persist(&mut self, record: StoredRecord) {
        self.records.push(record);
    }
}
