use tracing::{debug, warn};
use crate::index::entry::IndexEntry;
use crate::index::tree::IndexTree;
use crate::storage::record_store::RecordStore;

/// Produce a compacted copy of `store` ordered by key.
///
/// Walks `tree` in order and copies every live record an entry points at.
/// Unbound, stale or deleted referents are skipped. Neither input is
/// modified; the result gets fresh positions `0..k`.
pub fn rebuild_ordered(tree: &IndexTree, store: &RecordStore) -> RecordStore {
    let mut ordered = RecordStore::with_capacity(tree.len());

    tree.visit_in_order(|entry| {
        let Some(position) = entry.position else {
            debug!(key = %entry.key, "skipping unbound index entry");
            return;
        };
        match store.get(position) {
            Ok(record) if !record.is_deleted() => {
                ordered.append(record.clone());
            }
            Ok(_) => debug!(key = %entry.key, %position, "skipping deleted record"),
            Err(_) => debug!(key = %entry.key, %position, "skipping stale position"),
        }
    });

    ordered
}

/// Index every live record of `store` by key.
///
/// When two live records share a key the first one wins; the later slot is
/// left unindexed.
pub fn build_index(store: &RecordStore) -> IndexTree {
    let mut tree = IndexTree::new();
    for (position, record) in store.iter() {
        if record.is_deleted() {
            continue;
        }
        if tree.insert(IndexEntry::new(&record.key, position)).is_err() {
            warn!(key = %record.key, %position, "record left out of rebuilt index");
        }
    }
    tree
}
