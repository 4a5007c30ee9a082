//! Short-term tabu memory.

use crate::moves::Move;
use std::collections::{HashMap, VecDeque};

/// Fixed-capacity FIFO of recently applied moves.
///
/// A move stays tabu while at least one copy of it is in the queue. The
/// same move may be queued more than once (when taken again through
/// aspiration), so membership is reference-counted.
#[derive(Debug, Clone)]
pub struct TabuList {
    capacity: usize,
    queue: VecDeque<Move>,
    counts: HashMap<Move, usize>,
}

impl TabuList {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            queue: VecDeque::with_capacity(capacity),
            counts: HashMap::with_capacity(capacity),
        }
    }

    pub fn contains(&self, mv: &Move) -> bool {
        self.counts.contains_key(mv)
    }

    /// Records `mv`, evicting the oldest entry when full.
    pub fn push(&mut self, mv: Move) {
        if self.capacity == 0 {
            return;
        }
        if self.queue.len() >= self.capacity {
            if let Some(old) = self.queue.pop_front() {
                if let Some(n) = self.counts.get_mut(&old) {
                    *n -= 1;
                    if *n == 0 {
                        self.counts.remove(&old);
                    }
                }
            }
        }
        self.queue.push_back(mv);
        *self.counts.entry(mv).or_insert(0) += 1;
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
