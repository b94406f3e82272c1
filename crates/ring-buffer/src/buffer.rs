//! Fixed-Capacity FIFO Window

use std::collections::VecDeque;

/// Bounded FIFO buffer that drops its oldest sample once full
#[derive(Debug, Clone)]
pub struct RingBuffer<T> {
    storage: VecDeque<T>,
    capacity: usize,
}

impl<T> RingBuffer<T> {
    /// Create a new ring buffer with given capacity
    pub fn new(capacity: usize) -> Self {
        Self {
            storage: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Push a sample into the buffer, returning the evicted sample if full
    pub fn push(&mut self, item: T) -> Option<T> {
        if self.capacity == 0 {
            return Some(item);
        }

        let evicted = if self.storage.len() >= self.capacity {
            self.storage.pop_front()
        } else {
            None
        };
        self.storage.push_back(item);
        evicted
    }

    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    /// Iterate oldest to newest
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &T> + ExactSizeIterator {
        self.storage.iter()
    }

    pub fn clear(&mut self) {
        self.storage.clear();
    }
}
