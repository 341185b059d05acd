//! Pending timer queue.
//!
//! Timers never hold references into the session. Each entry carries a [`Task`]
//! naming what to do (and to which Cupid) plus the session epoch it was
//! scheduled under; the game re-checks both against current state when the
//! entry fires.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use super::CupidId;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Task {
    /// Spawner cadence; re-arms itself while the session is playing.
    Spawn { epoch: u32 },
    /// Reaper check for a Cupid that may have flown off uncaught.
    Expire { id: CupidId, epoch: u32 },
    /// Post-catch cleanup once the burst animation has played.
    Remove { id: CupidId, epoch: u32 },
}

impl Task {
    pub fn epoch(&self) -> u32 {
        match *self {
            Task::Spawn { epoch } | Task::Expire { epoch, .. } | Task::Remove { epoch, .. } => epoch,
        }
    }
}

struct Entry {
    due_ms: u64,
    seq: u64, // insertion order; breaks ties between timers due at the same instant
    task: Task,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.due_ms == other.due_ms && self.seq == other.seq
    }
}

impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    // Reversed so the max-heap pops the earliest (due, seq) first.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .due_ms
            .cmp(&self.due_ms)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

#[derive(Default)]
pub struct TimerQueue {
    heap: BinaryHeap<Entry>,
    next_seq: u64,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, due_ms: u64, task: Task) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Entry { due_ms, seq, task });
    }

    /// Pop the earliest entry if it is due at or before `now_ms`.
    pub fn pop_due(&mut self, now_ms: u64) -> Option<(u64, Task)> {
        if self.heap.peek()?.due_ms > now_ms {
            return None;
        }
        self.heap.pop().map(|e| (e.due_ms, e.task))
    }

    pub fn next_due(&self) -> Option<u64> {
        self.heap.peek().map(|e| e.due_ms)
    }

    pub fn clear(&mut self) {
        self.heap.clear();
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}
