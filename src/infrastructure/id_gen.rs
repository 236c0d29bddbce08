use std::sync::atomic::{AtomicU64, Ordering};

use uuid::Uuid;

use crate::domain::ports::IdGenerator;

/// Random v4 UUIDs in simple (dash-free hex) form.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidIdGenerator;

impl IdGenerator for UuidIdGenerator {
    fn next_id(&self) -> String {
        Uuid::new_v4().simple().to_string()
    }
}

/// Predictable ids (`{prefix}1`, `{prefix}2`, ...), handy in tests and fixtures.
#[derive(Debug)]
pub struct SequentialIdGenerator {
    prefix: String,
    next: AtomicU64,
}

impl SequentialIdGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: AtomicU64::new(1),
        }
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&self) -> String {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        format!("{}{}", self.prefix, n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn uuid_ids_are_unique_hex() {
        let ids: HashSet<String> = (0..100).map(|_| UuidIdGenerator.next_id()).collect();
        assert_eq!(ids.len(), 100);
        assert!(ids
            .iter()
            .all(|id| id.len() == 32 && id.chars().all(|c| c.is_ascii_hexdigit())));
    }

    #[test]
    fn sequential_ids_count_up() {
        let ids = SequentialIdGenerator::new("dish-");
        assert_eq!(ids.next_id(), "dish-1");
        assert_eq!(ids.next_id(), "dish-2");
    }
}
