//! Bounded per-role interaction history feeding the coaching loop.

use std::collections::{HashMap, VecDeque};

use crate::agent::PrimaryRole;

/// Default number of outputs retained per role
pub const DEFAULT_HISTORY_CAPACITY: usize = 5;

/// Fixed-capacity ring buffer of raw agent outputs, one per primary role.
///
/// Session-scoped; never persisted.
#[derive(Debug, Clone)]
pub struct InteractionHistory {
    capacity: usize,
    entries: HashMap<PrimaryRole, VecDeque<String>>,
}

impl Default for InteractionHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}

impl InteractionHistory {
    /// Create an empty history. A capacity of zero is treated as one.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            entries: HashMap::new(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Append an output, dropping the oldest once the role is at capacity.
    pub fn record(&mut self, role: PrimaryRole, output: impl Into<String>) {
        let buffer = self
            .entries
            .entry(role)
            .or_insert_with(|| VecDeque::with_capacity(self.capacity));
        buffer.push_back(output.into());
        while buffer.len() > self.capacity {
            buffer.pop_front();
        }
    }

    /// Up to `k` most recent outputs for `role`, oldest first.
    pub fn recent(&self, role: PrimaryRole, k: usize) -> Vec<&str> {
        let Some(buffer) = self.entries.get(&role) else {
            return Vec::new();
        };
        let skip = buffer.len().saturating_sub(k);
        buffer.iter().skip(skip).map(String::as_str).collect()
    }

    pub fn len(&self, role: PrimaryRole) -> usize {
        self.entries.get(&role).map_or(0, VecDeque::len)
    }

    pub fn is_empty(&self, role: PrimaryRole) -> bool {
        self.len(role) == 0
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
