// src/engine/mod.rs

//! Orchestration engine for renderq.
//!
//! This module ties together:
//! - the priority queue of loaded jobs
//! - the poll/execute state machine (`Scanning → Dispatching → Executing →
//!   Idle | Scanning`, then `Stopped`)
//! - the async loop that performs scans, runs jobs and sleeps
//!
//! The pure core state machine lives in [`core`]; the async/IO shell is
//! implemented in [`runtime`].

/// Runtime options used by both the core and the async shell.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuntimeOptions {
    /// If true, stop as soon as a scan leaves the queue empty instead of
    /// idling (used for `--once`).
    pub exit_when_idle: bool,
}

/// Counters reported when the loop stops.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Jobs handed to the executor.
    pub executed: usize,
    pub succeeded: usize,
    /// Non-zero exits, launch failures and unexpected executor errors.
    pub failed: usize,
    /// Descriptor load failures, counted once per scan they were seen in.
    pub load_failures: usize,
    /// Jobs still queued when the loop stopped.
    pub discarded: usize,
}

pub mod core;
pub mod queue;
pub mod runtime;

pub use self::core::{CoreCommand, CoreRuntime, LoopEvent, LoopState};
pub use queue::JobQueue;
pub use runtime::Runtime;
