// Trail memory: the bounded record of cells this bot has already occupied
//
// Membership is O(1) through a counted map; eviction order is kept in a queue.
// Positions older than the capacity are forgotten, so self-collision avoidance
// only covers the most recent `capacity` moves.

use std::collections::{HashMap, VecDeque};

use crate::types::Position;

/// Maximum number of positions remembered
pub const MAX_TRAIL_SIZE: usize = 5000;

/// Bounded FIFO history of visited positions
#[derive(Debug, Clone)]
pub struct Trail {
    /// Occurrence count per position currently held in `order`
    counts: HashMap<Position, u32>,
    /// Positions in arrival order, oldest at the front
    order: VecDeque<Position>,
    capacity: usize,
}

impl Trail {
    /// Creates an empty trail with the standard capacity
    pub fn new() -> Self {
        Self::with_capacity(MAX_TRAIL_SIZE)
    }

    /// Creates an empty trail that remembers at most `capacity` positions
    pub fn with_capacity(capacity: usize) -> Self {
        Trail {
            counts: HashMap::with_capacity(capacity.min(MAX_TRAIL_SIZE) + 1),
            order: VecDeque::with_capacity(capacity.min(MAX_TRAIL_SIZE) + 1),
            capacity,
        }
    }

    pub fn contains(&self, position: &Position) -> bool {
        self.counts.contains_key(position)
    }

    /// Appends `position` as the newest entry, evicting the oldest when over capacity.
    ///
    /// Recording a position that is already present adds a second occurrence;
    /// it stays a member until every occurrence has been evicted.
    pub fn record(&mut self, position: Position) {
        *self.counts.entry(position).or_insert(0) += 1;
        self.order.push_back(position);

        while self.order.len() > self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.forget(&oldest);
            }
        }
    }

    /// Number of recorded entries (occurrences, not distinct cells)
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Most recently recorded position
    pub fn last(&self) -> Option<&Position> {
        self.order.back()
    }

    fn forget(&mut self, position: &Position) {
        if let Some(count) = self.counts.get_mut(position) {
            *count -= 1;
            if *count == 0 {
                self.counts.remove(position);
            }
        }
    }
}

impl Default for Trail {
    fn default() -> Self {
        Self::new()
    }
}
