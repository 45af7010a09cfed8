use std::cmp::Ordering;
use serde::{Serialize, Deserialize};
use crate::core::types::Position;

/// Key → store position pair held by each tree node.
///
/// Ordering and equality look at the key only; the position is payload.
/// An entry without a position is a probe used for lookups.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexEntry {
    pub key: String,
    pub position: Option<Position>,
}

impl IndexEntry {
    pub fn new(key: &str, position: Position) -> Self {
        IndexEntry {
            key: key.to_string(),
            position: Some(position),
        }
    }

    pub fn probe(key: &str) -> Self {
        IndexEntry {
            key: key.to_string(),
            position: None,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn position(&self) -> Option<Position> {
        self.position
    }
}

impl PartialEq for IndexEntry {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for IndexEntry {}

impl PartialOrd for IndexEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for IndexEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}
