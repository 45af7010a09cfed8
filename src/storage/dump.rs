use std::fmt;
use crate::core::config::DumpLayout;
use crate::core::types::Record;
use crate::index::entry::IndexEntry;
use crate::storage::record_store::RecordStore;

// Human-readable dumps for the demo driver. No parsing back.

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_record(f, self, &DumpLayout::default())
    }
}

impl fmt::Display for IndexEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.position {
            Some(position) => write!(f, "({}, {})", self.key, position),
            None => write!(f, "({}, -)", self.key),
        }
    }
}

fn write_record(out: &mut impl fmt::Write, record: &Record, layout: &DumpLayout) -> fmt::Result {
    if record.is_deleted() {
        return write!(out, "[deleted]");
    }
    write!(
        out,
        "Key: {:<kw$}Name: {:<nw$}Born: {:<dw$}Category: {}",
        record.key,
        record.name,
        record.birth_date,
        record.category,
        kw = layout.key_width,
        nw = layout.name_width,
        dw = layout.date_width,
    )
}

/// One `Pos [i]: ...` line per slot, deleted slots included
pub fn dump_store(store: &RecordStore, layout: &DumpLayout) -> String {
    if store.is_empty() {
        return "(empty store)\n".to_string();
    }

    let mut out = String::new();
    store.for_each(|position, record| {
        out.push_str(&format!("Pos [{}]: ", position));
        // Writing into a String cannot fail
        let _ = write_record(&mut out, record, layout);
        out.push('\n');
    });
    out
}

/// Entries on one line, in the order the iterator yields them
pub fn dump_entries<'a, I>(entries: I) -> String
where
    I: IntoIterator<Item = &'a IndexEntry>,
{
    entries
        .into_iter()
        .map(|entry| entry.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Position;

    #[test]
    fn test_dump_store_lines() {
        let mut store = RecordStore::new();
        store.append(Record::new("1", "Ana", "01/01/1990", 'F'));
        let pos = store.append(Record::new("2", "Bia", "02/02/1991", 'F'));
        store.get_mut(pos).unwrap().mark_deleted();

        let layout = DumpLayout { key_width: 3, name_width: 5, date_width: 11 };
        let text = dump_store(&store, &layout);

        assert_eq!(
            text,
            "Pos [0]: Key: 1  Name: Ana  Born: 01/01/1990 Category: F\nPos [1]: [deleted]\n"
        );
    }

    #[test]
    fn test_dump_entries() {
        let entries = [IndexEntry::new("a", Position(2)), IndexEntry::probe("b")];
        assert_eq!(dump_entries(&entries), "(a, 2) (b, -)");
    }
}
