//! Bounded collections used to window over lazy streams.
//!
//! Both collections are indexed by distance from the cursor: index `0` of a
//! [DropoutStack] is the most recently pushed item, index `0` of a
//! [CachedQueue] is the next item to be dequeued.

use std::collections::VecDeque;

/// A stack that only remembers its `capacity` most recent items.
///
/// Pushing onto a full stack silently drops the oldest item.
#[derive(Debug, Clone)]
pub struct DropoutStack<T> {
    items: VecDeque<T>,
    capacity: usize,
}

impl<T> DropoutStack<T> {
    /// Creates a new stack that holds at most `capacity` items
    pub fn new(capacity: usize) -> Self {
        Self {
            items: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Pushes an item, dropping the oldest one if the stack is full
    pub fn push(&mut self, item: T) {
        if self.capacity == 0 {
            return;
        }
        if self.items.len() == self.capacity {
            self.items.pop_front();
        }
        self.items.push_back(item);
    }

    /// Pops the most recent item
    pub fn pop(&mut self) -> Option<T> {
        self.items.pop_back()
    }

    /// Gets the `n`th most recent item, where `0` is the top of the stack
    pub fn peek(&self, n: usize) -> Option<&T> {
        let len = self.items.len();
        if n < len {
            self.items.get(len - 1 - n)
        } else {
            None
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Iterates from the most recent item to the oldest
    pub fn rewind(&self) -> impl Iterator<Item = &T> {
        self.items.iter().rev()
    }
}

/// A FIFO queue that allows peeking at any queued item without dequeuing it
#[derive(Debug, Clone)]
pub struct CachedQueue<T> {
    items: VecDeque<T>,
}

impl<T> Default for CachedQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> CachedQueue<T> {
    pub fn new() -> Self {
        Self {
            items: VecDeque::new(),
        }
    }

    pub fn enqueue(&mut self, item: T) {
        self.items.push_back(item);
    }

    pub fn dequeue(&mut self) -> Option<T> {
        self.items.pop_front()
    }

    /// Gets the `n`th queued item, where `0` is the next one to be dequeued
    pub fn peek(&self, n: usize) -> Option<&T> {
        self.items.get(n)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
