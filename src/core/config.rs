use serde::{Serialize, Deserialize};
use crate::core::error::Result;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub store_capacity: usize,  // Initial slots reserved by RecordStore
    pub dump: DumpLayout,       // Column widths for diagnostic dumps
}

/// Fixed-width columns used when printing records
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DumpLayout {
    pub key_width: usize,
    pub name_width: usize,
    pub date_width: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            store_capacity: 64,
            dump: DumpLayout::default(),
        }
    }
}

impl Default for DumpLayout {
    fn default() -> Self {
        DumpLayout {
            key_width: 15,
            name_width: 30,
            date_width: 15,
        }
    }
}

impl Config {
    /// Parse a JSON document; absent fields fall back to defaults
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}
