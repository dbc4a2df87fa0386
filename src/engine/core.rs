// src/engine/core.rs

//! Pure core of the poll/execute loop.
//!
//! `CoreRuntime` owns the job queue and the loop state. It is fed
//! [`LoopEvent`]s describing what the IO shell just finished doing and
//! answers with the next [`CoreCommand`]. It performs no IO, so every
//! transition can be exercised without Tokio, a filesystem or processes.
//!
//! ```text
//!            ┌──────────── JobFinished ────────────┐
//!            v                                     │
//!  start ─> Scanning ─> Dispatching ─> Executing ──┘
//!            ^   │            │
//!            │   │            └─> Idle ── IdleElapsed ─┐
//!            │   └─(shutdown)─> Stopped                │
//!            └─────────────────────────────────────────┘
//! ```
//!
//! The shutdown flag is only consulted on the way into `Scanning`, so a job
//! that is already executing always runs to completion.

use std::fmt;

use tracing::{debug, info};

use crate::engine::queue::JobQueue;
use crate::engine::RuntimeOptions;
use crate::errors::{RenderqError, Result};
use crate::job::JobRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Scanning,
    Dispatching,
    Executing,
    Idle,
    Stopped,
}

impl fmt::Display for LoopState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoopState::Scanning => write!(f, "scanning"),
            LoopState::Dispatching => write!(f, "dispatching"),
            LoopState::Executing => write!(f, "executing"),
            LoopState::Idle => write!(f, "idle"),
            LoopState::Stopped => write!(f, "stopped"),
        }
    }
}

/// What the IO shell reports back to the core.
#[derive(Debug)]
pub enum LoopEvent {
    /// A directory scan finished; these records loaded successfully.
    ScanCompleted(Vec<JobRecord>),
    /// The job handed out by the last `Execute` reached a terminal state.
    JobFinished,
    /// The idle sleep ran out (or was cut short by a wakeup).
    IdleElapsed,
}

impl LoopEvent {
    fn name(&self) -> &'static str {
        match self {
            LoopEvent::ScanCompleted(_) => "scan-completed",
            LoopEvent::JobFinished => "job-finished",
            LoopEvent::IdleElapsed => "idle-elapsed",
        }
    }
}

/// What the core wants the IO shell to do next.
#[derive(Debug)]
pub enum CoreCommand {
    ScanDirectory,
    Execute(JobRecord),
    Sleep,
    Exit,
}

/// Pure core runtime state.
#[derive(Debug)]
pub struct CoreRuntime {
    queue: JobQueue,
    state: LoopState,
    options: RuntimeOptions,
}

impl CoreRuntime {
    pub fn new(options: RuntimeOptions) -> Self {
        Self {
            queue: JobQueue::new(),
            state: LoopState::Scanning,
            options,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn queue(&self) -> &JobQueue {
        &self.queue
    }

    /// Jobs still queued; used when the loop stops.
    pub fn drain_queue(&mut self) -> Vec<JobRecord> {
        self.queue.drain_ordered()
    }

    /// First command of a run.
    pub fn start(&mut self, shutdown_requested: bool) -> CoreCommand {
        self.enter_scanning(shutdown_requested)
    }

    /// Advance the state machine by one event.
    pub fn step(&mut self, event: LoopEvent, shutdown_requested: bool) -> Result<CoreCommand> {
        match (self.state, event) {
            (LoopState::Scanning, LoopEvent::ScanCompleted(records)) => {
                for record in records {
                    self.queue.push(record);
                }
                self.state = LoopState::Dispatching;
                Ok(self.dispatch())
            }
            (LoopState::Executing, LoopEvent::JobFinished)
            | (LoopState::Idle, LoopEvent::IdleElapsed) => {
                Ok(self.enter_scanning(shutdown_requested))
            }
            (LoopState::Stopped, _) => Ok(CoreCommand::Exit),
            (state, event) => Err(RenderqError::InvalidTransition {
                state: state.to_string(),
                event: event.name().to_string(),
            }),
        }
    }

    fn enter_scanning(&mut self, shutdown_requested: bool) -> CoreCommand {
        if shutdown_requested {
            info!(queued = self.queue.len(), "shutdown observed; stopping loop");
            self.state = LoopState::Stopped;
            return CoreCommand::Exit;
        }
        self.state = LoopState::Scanning;
        CoreCommand::ScanDirectory
    }

    fn dispatch(&mut self) -> CoreCommand {
        match self.queue.pop() {
            Some(job) => {
                debug!(job = %job.id, remaining = self.queue.len(), "dispatching job");
                self.state = LoopState::Executing;
                CoreCommand::Execute(job)
            }
            None if self.options.exit_when_idle => {
                info!("queue drained; exiting (--once)");
                self.state = LoopState::Stopped;
                CoreCommand::Exit
            }
            None => {
                self.state = LoopState::Idle;
                CoreCommand::Sleep
            }
        }
    }
}
