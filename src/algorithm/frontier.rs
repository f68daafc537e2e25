//! Priority frontier entries for Dijkstra and A*

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

/// A tile waiting in the priority frontier
///
/// Ordered by priority, then by insertion sequence so that equal priorities
/// leave the frontier first-in first-out.
#[derive(Debug, Clone, Copy)]
pub struct FrontierEntry {
    /// Accumulated cost, plus the heuristic estimate for A*
    pub priority: f32,
    /// Insertion order, used to break priority ties
    pub sequence: u64,
    /// Flat index of the queued tile
    pub tile: usize,
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierEntry {}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.priority
            .partial_cmp(&other.priority)
            .unwrap_or(Ordering::Equal)
            .then_with(|| self.sequence.cmp(&other.sequence))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Min-priority queue of tiles with FIFO tie-breaking
#[derive(Debug, Default)]
pub struct Frontier {
    heap: BinaryHeap<Reverse<FrontierEntry>>,
    next_sequence: u64,
}

impl Frontier {
    /// Create an empty frontier
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a tile with the given priority
    pub fn push(&mut self, tile: usize, priority: f32) {
        self.heap.push(Reverse(FrontierEntry {
            priority,
            sequence: self.next_sequence,
            tile,
        }));
        self.next_sequence += 1;
    }

    /// Remove the lowest-priority entry
    pub fn pop(&mut self) -> Option<FrontierEntry> {
        self.heap.pop().map(|Reverse(entry)| entry)
    }
}
