use crate::core::error::{Error, Result};
use crate::core::types::{Position, Record};

/// Append-only record file kept in memory.
///
/// Slots are never reclaimed: deleting a record only flips its flag, so a
/// position handed out by `append` names the same slot for the store's life.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: Vec<Record>,
}

impl RecordStore {
    pub fn new() -> Self {
        RecordStore {
            records: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        RecordStore {
            records: Vec::with_capacity(capacity),
        }
    }

    pub fn append(&mut self, record: Record) -> Position {
        self.records.push(record);
        Position::from(self.records.len() - 1)
    }

    pub fn get(&self, position: Position) -> Result<&Record> {
        let slot = self.check_bounds(position)?;
        Ok(&self.records[slot])
    }

    pub fn get_mut(&mut self, position: Position) -> Result<&mut Record> {
        let slot = self.check_bounds(position)?;
        Ok(&mut self.records[slot])
    }

    /// Number of slots, deleted ones included
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn deleted_count(&self) -> usize {
        self.records.iter().filter(|r| r.is_deleted()).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Position, &Record)> {
        self.records
            .iter()
            .enumerate()
            .map(|(i, record)| (Position::from(i), record))
    }

    pub fn for_each<F>(&self, mut visitor: F)
    where
        F: FnMut(Position, &Record),
    {
        for (position, record) in self.iter() {
            visitor(position, record);
        }
    }

    fn check_bounds(&self, position: Position) -> Result<usize> {
        let slot = position.value();
        if slot >= self.records.len() {
            return Err(Error::out_of_range(position, self.records.len()));
        }
        Ok(slot)
    }
}
