use tracing::{debug, info};
use crate::core::config::Config;
use crate::core::error::{Error, ErrorKind, Result};
use crate::core::stats::StoreStats;
use crate::core::types::{Position, Record};
use crate::index::entry::IndexEntry;
use crate::index::tree::IndexTree;
use crate::materialize::rebuild::{build_index, rebuild_ordered};
use crate::storage::record_store::RecordStore;

/// Record file plus key index, kept in step.
///
/// Every record is appended to the store first and indexed second, so a
/// rejected duplicate leaves an orphaned slot behind. Orphans are counted in
/// `stats()` and dropped by `compact()`; they are never rebound to the key.
pub struct IndexedStore {
    config: Config,

    store: RecordStore,
    index: IndexTree,
}

impl IndexedStore {
    pub fn open(config: Config) -> Self {
        let store = RecordStore::with_capacity(config.store_capacity);
        Self {
            config,
            store,
            index: IndexTree::new(),
        }
    }

    pub fn new() -> Self {
        Self::open(Config::default())
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn index(&self) -> &IndexTree {
        &self.index
    }

    /// Append `record` and index it under its key
    pub fn insert(&mut self, record: Record) -> Result<Position> {
        if record.key.is_empty() {
            return Err(Error::new(
                ErrorKind::InvalidArgument,
                "record key must not be empty".to_string(),
            ));
        }

        let key = record.key.clone();
        let position = self.store.append(record);
        self.index.insert(IndexEntry::new(&key, position))?;

        debug!(key = %key, %position, "record inserted");
        Ok(position)
    }

    pub fn position_of(&self, key: &str) -> Option<Position> {
        self.index.search(key)
    }

    pub fn find(&self, key: &str) -> Option<&Record> {
        let position = self.index.search(key)?;
        self.store.get(position).ok()
    }

    pub fn get(&self, position: Position) -> Result<&Record> {
        self.store.get(position)
    }

    /// Soft-delete the record under `key` and drop its index entry
    pub fn delete(&mut self, key: &str) -> Result<Position> {
        let position = self
            .index
            .search(key)
            .ok_or_else(|| Error::key_not_found(key))?;

        self.store.get_mut(position)?.mark_deleted();
        self.index.remove(key)?;

        debug!(key, %position, "record deleted");
        Ok(position)
    }

    /// Rewrite the slot at `position` in place. The index is not touched.
    pub fn restore(&mut self, position: Position, record: Record) -> Result<()> {
        self.store.get_mut(position)?.restore(record);
        Ok(())
    }

    pub fn rebuild_ordered(&self) -> RecordStore {
        rebuild_ordered(&self.index, &self.store)
    }

    /// Key-ordered copy holding only reachable live records, with a fresh index
    pub fn compact(&self) -> IndexedStore {
        let store = self.rebuild_ordered();
        let index = build_index(&store);

        info!(
            before = self.store.len(),
            after = store.len(),
            "store compacted"
        );

        IndexedStore {
            config: self.config.clone(),
            store,
            index,
        }
    }

    pub fn stats(&self) -> StoreStats {
        let total_records = self.store.len();
        let deleted_records = self.store.deleted_count();

        let orphaned_records = self
            .store
            .iter()
            .filter(|(position, record)| {
                !record.is_deleted() && self.index.search(&record.key) != Some(*position)
            })
            .count();

        StoreStats {
            total_records,
            deleted_records,
            live_records: total_records - deleted_records,
            indexed_keys: self.index.len(),
            tree_height: self.index.height(),
            orphaned_records,
        }
    }
}

impl Default for IndexedStore {
    fn default() -> Self {
        Self::new()
    }
}
