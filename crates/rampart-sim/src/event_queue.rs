//! Deadline-ordered queue of deferred cues.
//!
//! Replaces fire-and-forget timers: an event is due when the simulation
//! clock reaches its deadline, and events due on the same tick come out in
//! (deadline, insertion) order.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use rampart_core::events::AudioEvent;

#[derive(Debug, Clone)]
struct Scheduled {
    due: f64,
    seq: u64,
    event: AudioEvent,
}

impl PartialEq for Scheduled {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Scheduled {}

impl PartialOrd for Scheduled {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Scheduled {
    // Reversed so the max-heap pops the earliest deadline first.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .due
            .total_cmp(&self.due)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

#[derive(Debug, Clone, Default)]
pub struct EventQueue {
    heap: BinaryHeap<Scheduled>,
    next_seq: u64,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `event` to be released once the clock reaches `due`.
    pub fn schedule(&mut self, due: f64, event: AudioEvent) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Scheduled { due, seq, event });
    }

    /// Pop every event with `due <= now`, in order.
    pub fn release_due(&mut self, now: f64) -> Vec<AudioEvent> {
        let mut released = Vec::new();
        while self.heap.peek().is_some_and(|next| next.due <= now) {
            if let Some(next) = self.heap.pop() {
                released.push(next.event);
            }
        }
        released
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}
