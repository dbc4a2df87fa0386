// src/engine/queue.rs

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use tracing::debug;

use crate::job::{JobRecord, OrderingKey};

/// In-memory priority queue of loaded jobs.
///
/// Order served by [`JobQueue::pop`]:
/// 1. higher `priority` first,
/// 2. then earlier `submitted_at`,
/// 3. then earlier insertion (so identical keys come out FIFO, which keeps
///    the order stable for the lifetime of the process).
///
/// Nothing here survives a restart.
#[derive(Debug, Default)]
pub struct JobQueue {
    heap: BinaryHeap<QueuedJob>,
    next_seq: u64,
}

#[derive(Debug)]
struct QueuedJob {
    key: OrderingKey,
    seq: Reverse<u64>,
    record: JobRecord,
}

impl PartialEq for QueuedJob {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for QueuedJob {}

impl PartialOrd for QueuedJob {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueuedJob {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key
            .cmp(&other.key)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

impl JobQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a job. O(log n).
    pub fn push(&mut self, record: JobRecord) {
        let seq = self.next_seq;
        self.next_seq += 1;

        debug!(
            job = %record.id,
            priority = record.priority,
            seq,
            queued = self.heap.len() + 1,
            "pushed job onto queue"
        );

        self.heap.push(QueuedJob {
            key: record.ordering_key(),
            seq: Reverse(seq),
            record,
        });
    }

    /// Remove and return the job that should run next, or `None` when the
    /// queue is empty. O(log n).
    pub fn pop(&mut self) -> Option<JobRecord> {
        self.heap.pop().map(|queued| queued.record)
    }

    /// The job `pop` would return, without removing it.
    pub fn peek(&self) -> Option<&JobRecord> {
        self.heap.peek().map(|queued| &queued.record)
    }

    /// Returns the current number of queued jobs.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Returns true if there are no queued jobs.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Empty the queue, returning the remaining jobs in serving order.
    pub fn drain_ordered(&mut self) -> Vec<JobRecord> {
        let mut jobs = Vec::with_capacity(self.heap.len());
        while let Some(job) = self.pop() {
            jobs.push(job);
        }
        jobs
    }
}
