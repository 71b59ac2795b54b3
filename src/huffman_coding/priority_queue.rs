use std::collections::VecDeque;

use crate::error::HuffmanError;

/// Minimum priority queue keyed by weight.
///
/// Entries of equal weight come out in the order they went in. The tree shape, and so every
/// code, depends on this, which is why a plain binary heap is not used here.
#[derive(Debug, Clone)]
pub struct PriorityQueue<T> {
    entries: VecDeque<(u64, T)>,
}

impl<T> PriorityQueue<T> {
    pub fn new() -> Self {
        Self {
            entries: VecDeque::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Insert behind every entry with a weight less than or equal to weight.
    pub fn insert(&mut self, weight: u64, item: T) {
        let idx = self.entries.partition_point(|&(w, _)| w <= weight);
        self.entries.insert(idx, (weight, item));
    }

    /// Remove and return the lightest entry (the earliest inserted among equals).
    pub fn extract_min(&mut self) -> Result<(u64, T), HuffmanError> {
        self.entries.pop_front().ok_or(HuffmanError::EmptyQueue)
    }
}

impl<T> Default for PriorityQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}
