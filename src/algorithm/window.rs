//! Fixed-capacity trailing window with a running sum

use std::collections::VecDeque;

/// Keeps the last `capacity` values and their sum
///
/// Partial windows are allowed: until `capacity` values have been pushed the
/// window holds however many exist, which gives min-periods-1 semantics.
#[derive(Debug, Clone)]
pub struct TrailingWindow {
    capacity: usize,
    values: VecDeque<u64>,
    sum: u64,
}

impl TrailingWindow {
    /// Create a window; a zero capacity is treated as one
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            values: VecDeque::with_capacity(capacity),
            sum: 0,
        }
    }

    /// Push a value, evicting the oldest one once the window is full
    pub fn push(&mut self, value: u64) {
        if self.values.len() == self.capacity {
            if let Some(oldest) = self.values.pop_front() {
                self.sum -= oldest;
            }
        }
        self.values.push_back(value);
        self.sum += value;
    }

    #[must_use]
    pub const fn sum(&self) -> u64 {
        self.sum
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Mean of the values currently in the window
    #[must_use]
    pub fn mean(&self) -> Option<f64> {
        if self.values.is_empty() {
            None
        } else {
            Some(self.sum as f64 / self.values.len() as f64)
        }
    }
}
