use crate::domain::ports::{Record, Store};

/// Records kept in insertion order.
#[derive(Debug, Clone)]
pub struct MemoryStore<T> {
    records: Vec<T>,
}

impl<T> MemoryStore<T> {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    pub fn with_records(records: Vec<T>) -> Self {
        Self { records }
    }
}

impl<T> Default for MemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Record> Store<T> for MemoryStore<T> {
    fn all(&self) -> &[T] {
        &self.records
    }

    fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.records.get_mut(index)
    }

    fn append(&mut self, record: T) {
        self.records.push(record);
    }

    fn remove_at(&mut self, index: usize) -> Option<T> {
        (index < self.records.len()).then(|| self.records.remove(index))
    }
}
