//! Lock-free work queue and write-once result slots for parallel workers
//!
//! Workers claim `(slot, item)` pairs from a [`WorkQueue`] and publish their
//! result into the matching [`IndexedSlots`] cell. Collecting the slots in
//! index order gives results in input order no matter which worker finished
//! first.

use std::sync::OnceLock;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Lock-free work queue distributing items to workers.
///
/// Each item carries the output slot it belongs to. Workers call
/// [`next()`](WorkQueue::next) to atomically claim the next item.
pub struct WorkQueue<S> {
    items: Vec<(usize, S)>,
    cursor: AtomicUsize,
}

impl<S> WorkQueue<S> {
    /// Create queue where each item's slot is its position
    pub fn new(items: Vec<S>) -> Self {
        Self::indexed(items.into_iter().enumerate())
    }

    /// Create queue from explicit `(slot, item)` pairs (sparse dispatch)
    pub fn indexed(items: impl IntoIterator<Item = (usize, S)>) -> Self {
        let items: Vec<(usize, S)> = items.into_iter().collect();
        log::debug!("{} items in work queue", items.len());
        Self {
            items,
            cursor: AtomicUsize::new(0),
        }
    }

    /// Claim next item to process (lock-free)
    pub fn next(&self) -> Option<(usize, &S)> {
        let i = self.cursor.fetch_add(1, Ordering::Relaxed);
        self.items.get(i).map(|(slot, item)| (*slot, item))
    }

    /// Total items in queue
    pub fn total(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Pre-sized output where each index can be written exactly once.
pub struct IndexedSlots<T> {
    cells: Vec<OnceLock<T>>,
}

impl<T> IndexedSlots<T> {
    pub fn new(len: usize) -> Self {
        Self {
            cells: (0..len).map(|_| OnceLock::new()).collect(),
        }
    }

    /// Store `value` at `index`. Returns false if the index is out of range
    /// or already filled; the first write wins.
    pub fn fill(&self, index: usize, value: T) -> bool {
        self.cells
            .get(index)
            .is_some_and(|cell| cell.set(value).is_ok())
    }

    /// Values in index order; unfilled slots are `None`.
    pub fn into_vec(self) -> Vec<Option<T>> {
        self.cells.into_iter().map(OnceLock::into_inner).collect()
    }
}
