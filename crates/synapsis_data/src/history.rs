use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Fixed-capacity, append-only history log with evict-oldest semantics.
///
/// This is the only mutation discipline allowed on engine histories: `push`
/// appends at the tail and drops the head once the capacity is exceeded.
/// There is no random-access deletion and no reordering.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct History<T> {
    entries: VecDeque<T>,
    capacity: usize,
}

impl<T> History<T> {
    /// Creates an empty log. A zero capacity is bumped to 1.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity.min(1024)),
            capacity,
        }
    }

    /// Appends at the tail, evicting the oldest entry past capacity.
    pub fn push(&mut self, entry: T) {
        self.entries.push_back(entry);
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
    }

    /// The last `n` entries (or fewer) in insertion order, non-destructively.
    pub fn recent(&self, n: usize) -> Vec<T>
    where
        T: Clone,
    {
        let skip = self.entries.len().saturating_sub(n);
        self.entries.iter().skip(skip).cloned().collect()
    }

    pub fn latest(&self) -> Option<&T> {
        self.entries.back()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evicts_oldest_first() {
        let mut log = History::new(3);
        for i in 0..5 {
            log.push(i);
        }
        assert_eq!(log.len(), 3);
        assert_eq!(log.recent(3), vec![2, 3, 4]);
    }

    #[test]
    fn recent_is_non_destructive_and_partial() {
        let mut log = History::new(10);
        for i in 0..4 {
            log.push(i);
        }
        assert_eq!(log.recent(2), vec![2, 3]);
        assert_eq!(log.recent(100), vec![0, 1, 2, 3]);
        assert_eq!(log.len(), 4);
    }

    #[test]
    fn zero_capacity_is_bumped() {
        let mut log = History::new(0);
        log.push(1);
        log.push(2);
        assert_eq!(log.recent(10), vec![2]);
    }
}
