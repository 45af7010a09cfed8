use serde::{Serialize, Deserialize};
use crate::core::error::{Error, ErrorKind, Result};

/// Zero-based slot in a record store, fixed at append time
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position(pub usize);

impl Position {
    pub fn value(&self) -> usize {
        self.0
    }
}

impl From<usize> for Position {
    fn from(index: usize) -> Self {
        Position(index)
    }
}

/// Signed caller input; negative offsets never name a slot
impl TryFrom<i64> for Position {
    type Error = Error;

    fn try_from(raw: i64) -> Result<Self> {
        usize::try_from(raw)
            .map(Position)
            .map_err(|_| Error::new(ErrorKind::OutOfRange, format!("negative position {}", raw)))
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One person entry in the store.
///
/// `key` is the national identifier the index is built on. Once a record is
/// marked deleted its attribute fields are wiped; the key survives so the
/// slot can still be reported in dumps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub key: String,
    pub name: String,
    pub birth_date: String,
    pub category: char,
    pub deleted: bool,
}

impl Default for Record {
    fn default() -> Self {
        Record {
            key: String::new(),
            name: String::new(),
            birth_date: String::new(),
            category: ' ',
            deleted: true,
        }
    }
}

impl Record {
    pub fn new(key: &str, name: &str, birth_date: &str, category: char) -> Self {
        Record {
            key: key.to_string(),
            name: name.to_string(),
            birth_date: birth_date.to_string(),
            category,
            deleted: false,
        }
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted
    }

    pub fn mark_deleted(&mut self) {
        self.deleted = true;
        self.name.clear();
        self.birth_date.clear();
        self.category = ' ';
    }

    /// Rewrite every field from `source` and bring the slot back to life
    pub fn restore(&mut self, source: Record) {
        *self = Record {
            deleted: false,
            ..source
        };
    }
}
