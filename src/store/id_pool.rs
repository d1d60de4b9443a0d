//! Free-id recycling allocator.
//!
//! Each table owns one pool. Slot 0 holds the next fresh id (a counter
//! seeded at 1); every slot after it is an id freed by a deletion, kept
//! sorted ascending so allocation always hands out the smallest freed id
//! first. Ids therefore stay small and dense even across delete/create
//! churn.

use serde::{Deserialize, Serialize};

use crate::errors::{AppError, AppResult};

/// Position of the fresh-id counter
const COUNTER_SLOT: usize = 0;
/// Position of the highest-priority (smallest) freed id
const FIRST_FREE_SLOT: usize = 1;

/// Id pool for one table. Persisted as a plain integer array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IdPool(Vec<u32>);

impl IdPool {
    /// Fresh pool with the counter seeded at 1 and no freed ids
    pub fn seed() -> Self {
        Self(vec![1])
    }

    /// Hand out an id: the smallest freed id if any exist, otherwise the
    /// counter value (which is then incremented).
    ///
    /// A pool without its counter slot is corrupted storage.
    pub fn allocate(&mut self) -> AppResult<u32> {
        if self.0.is_empty() {
            return Err(AppError::format("id pool is missing its counter slot"));
        }
        let id = if self.0.len() == 1 {
            let next = self.0[COUNTER_SLOT];
            self.0[COUNTER_SLOT] = next + 1;
            next
        } else {
            self.0.remove(FIRST_FREE_SLOT)
        };
        tracing::debug!(id, "allocated id");
        Ok(id)
    }

    /// Return a freed id to the pool, keeping the freed tail sorted
    pub fn release(&mut self, id: u32) -> AppResult<()> {
        if self.0.is_empty() {
            return Err(AppError::format("id pool is missing its counter slot"));
        }
        let offset = self.0[FIRST_FREE_SLOT..].partition_point(|&free| free < id);
        self.0.insert(FIRST_FREE_SLOT + offset, id);
        tracing::debug!(id, "released id");
        Ok(())
    }

    /// Value the next fresh allocation would take if no ids are freed
    pub fn next_fresh(&self) -> Option<u32> {
        self.0.first().copied()
    }

    /// Freed ids awaiting reuse, smallest first
    pub fn free_ids(&self) -> &[u32] {
        self.0.get(FIRST_FREE_SLOT..).unwrap_or(&[])
    }

    /// Structural check used when loading a document from disk
    pub fn has_counter(&self) -> bool {
        !self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_pool_counts_up() {
        let mut pool = IdPool::seed();
        assert_eq!(pool.allocate().unwrap(), 1);
        assert_eq!(pool.allocate().unwrap(), 2);
        assert_eq!(pool.allocate().unwrap(), 3);
        assert_eq!(pool.next_fresh(), Some(4));
    }

    #[test]
    fn released_ids_are_reused_smallest_first() {
        let mut pool = IdPool::seed();
        for _ in 0..5 {
            pool.allocate().unwrap();
        }
        pool.release(4).unwrap();
        pool.release(2).unwrap();
        assert_eq!(pool.free_ids(), &[2, 4]);

        assert_eq!(pool.allocate().unwrap(), 2);
        assert_eq!(pool.allocate().unwrap(), 4);
        // Freed ids exhausted, back to the counter
        assert_eq!(pool.allocate().unwrap(), 6);
    }

    #[test]
    fn release_keeps_freed_tail_sorted() {
        let mut pool = IdPool::seed();
        for _ in 0..6 {
            pool.allocate().unwrap();
        }
        pool.release(5).unwrap();
        pool.release(1).unwrap();
        pool.release(3).unwrap();
        assert_eq!(pool.free_ids(), &[1, 3, 5]);
    }

    #[test]
    fn empty_pool_is_a_format_error() {
        let mut pool = IdPool(vec![]);
        assert!(matches!(pool.allocate(), Err(AppError::Format(_))));
        assert!(matches!(pool.release(1), Err(AppError::Format(_))));
    }

    #[test]
    fn pool_serializes_as_plain_array() {
        let mut pool = IdPool::seed();
        for _ in 0..3 {
            pool.allocate().unwrap();
        }
        pool.release(2).unwrap();
        let json = serde_json::to_string(&pool).unwrap();
        assert_eq!(json, "[4,2]");

        let back: IdPool = serde_json::from_str(&json).unwrap();
        assert_eq!(back, pool);
    }
}
