//! Event queue with deterministic ordering.

use crate::{Transition, TransitionKey};
use gatesim_types::{Bit, GateId, SimTime};
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Min-priority queue of pending transitions.
///
/// A binary heap ordered by [`TransitionKey`]: [`extract_min`](Self::extract_min)
/// always returns the transition with the smallest `(time, sequence)`. The
/// queue also owns the sequence counter, so two simulations never share
/// ordering state and a fresh queue always numbers from zero.
#[derive(Debug, Default)]
pub struct EventQueue {
    heap: BinaryHeap<Reverse<Transition>>,

    /// Next sequence number to hand out.
    next_sequence: u64,
}

impl EventQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve the next sequence number.
    pub fn next_sequence(&mut self) -> u64 {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        sequence
    }

    /// Create a transition with the next sequence number and queue it.
    pub fn schedule(&mut self, gate: GateId, new_output: Bit, time: SimTime) -> TransitionKey {
        let sequence = self.next_sequence();
        let transition = Transition::with_bit(gate, new_output, time, sequence);
        self.insert(transition);
        transition.key()
    }

    /// Queue a transition.
    ///
    /// Its sequence number should come from [`next_sequence`](Self::next_sequence);
    /// reusing one makes the order between the two transitions unspecified.
    pub fn insert(&mut self, transition: Transition) {
        self.heap.push(Reverse(transition));
    }

    /// The next transition, without removing it.
    pub fn peek_min(&self) -> Option<&Transition> {
        self.heap.peek().map(|Reverse(transition)| transition)
    }

    /// Remove and return the next transition.
    pub fn extract_min(&mut self) -> Option<Transition> {
        self.heap.pop().map(|Reverse(transition)| transition)
    }

    /// Number of queued transitions scheduled for exactly `time`.
    pub fn count_at(&self, time: SimTime) -> usize {
        self.heap.iter().filter(|Reverse(t)| t.time == time).count()
    }

    /// Number of queued transitions.
    pub fn size(&self) -> usize {
        self.heap.len()
    }

    /// Number of queued transitions.
    pub fn len(&self) -> usize {
        self.size()
    }

    /// Check if the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Total sequence numbers handed out so far.
    pub fn sequences_issued(&self) -> u64 {
        self.next_sequence
    }
}
