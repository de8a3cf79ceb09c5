use crate::error::TableError;
use crate::record::{seed_records, Record};

/// The `planets` table. Append is the only mutation.
#[derive(Debug, Clone)]
pub struct TableStore {
    records: Vec<Record>,
}

impl TableStore {
    pub fn seeded() -> Self {
        Self {
            records: seed_records(),
        }
    }

    pub fn snapshot(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn append(&mut self, record: Record) -> Result<(), TableError> {
        let last = self.records.last().map_or(0, |last| last.id);
        if record.id <= last {
            return Err(TableError::IdNotIncreasing {
                id: record.id,
                last,
            });
        }
        self.records.push(record);
        Ok(())
    }
}

impl Default for TableStore {
    fn default() -> Self {
        Self::seeded()
    }
}
