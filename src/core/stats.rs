use serde::{Serialize, Deserialize};
use crate::core::error::Result;

/// Snapshot of store and index counters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreStats {
    // Store
    pub total_records: usize,
    pub deleted_records: usize,
    pub live_records: usize,

    // Index
    pub indexed_keys: usize,
    pub tree_height: usize,

    // Live records no index entry points at (rejected duplicates)
    pub orphaned_records: usize,
}

impl StoreStats {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
