//! Identity generation for newly created entities.
//!
//! Ids are strings so fixture ids ("1", "2", ...) and generated ids share one
//! type. One generator is shared by every repository of a store.

use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> String;
}

/// Monotonic counter. Seed it above the largest numeric fixture id so
/// generated ids never collide with seeded ones.
#[derive(Debug, Default)]
pub struct SequentialIds {
    last: AtomicU64,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::starting_after(0)
    }

    pub fn starting_after(last: u64) -> Self {
        Self {
            last: AtomicU64::new(last),
        }
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&self) -> String {
        (self.last.fetch_add(1, Ordering::Relaxed) + 1).to_string()
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct UuidIds;

impl IdGenerator for UuidIds {
    fn next_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_sequential_ids_start_after_seed() {
        let ids = SequentialIds::starting_after(7);
        assert_eq!(ids.next_id(), "8");
        assert_eq!(ids.next_id(), "9");
    }

    #[test]
    fn test_sequential_ids_unique_under_rapid_creation() {
        let ids = SequentialIds::new();
        let generated: HashSet<_> = (0..10_000).map(|_| ids.next_id()).collect();
        assert_eq!(generated.len(), 10_000);
    }

    #[test]
    fn test_uuid_ids_are_distinct() {
        let ids = UuidIds;
        assert_ne!(ids.next_id(), ids.next_id());
    }
}
