//! Fixed-capacity circular history carried across windows

use ecgq_core::{config_error, QualityResult};

/// Ring of the most recent `capacity` per-window values
///
/// Every slot is filled at construction, so the history is always full and
/// reads never have to special-case warm-up. Each push overwrites the oldest
/// slot and advances the write position by exactly one.
#[derive(Debug, Clone, PartialEq)]
pub struct CircularHistory<T> {
    slots: Vec<T>,
    head: usize,
}

impl<T: Copy> CircularHistory<T> {
    /// Create a history of `capacity` slots, all set to `sentinel`
    pub fn new(capacity: usize, sentinel: T) -> QualityResult<Self> {
        if capacity == 0 {
            return Err(config_error!("history capacity must be at least 1"));
        }

        Ok(Self {
            slots: vec![sentinel; capacity],
            head: 0,
        })
    }

    /// Overwrite the oldest slot with `value`
    pub fn push(&mut self, value: T) {
        self.slots[self.head] = value;
        self.head = (self.head + 1) % self.slots.len();
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Slot that the next push will overwrite
    pub fn write_position(&self) -> usize {
        self.head
    }

    /// Number of slots satisfying `predicate`
    pub fn count_where(&self, predicate: impl Fn(&T) -> bool) -> usize {
        self.slots.iter().filter(|v| predicate(v)).count()
    }

    /// Raw slot storage in write order
    pub fn as_slice(&self) -> &[T] {
        &self.slots
    }
}
