// src/exec/mod.rs

//! Process execution layer.
//!
//! This module is responsible for actually running a job's command and
//! capturing how it ended.
//!
//! - [`command`] turns a job into an explicit program + argument list
//!   according to the configured [`ExecutionPolicy`](crate::types::ExecutionPolicy).
//! - [`task_runner`] spawns that command with `tokio::process::Command` and
//!   waits for it, capturing stdout and stderr in full.
//! - [`backend`] provides the `ExecutorBackend` trait the loop talks to and
//!   the production `ProcessExecutor`; tests swap in a fake.

use std::time::Duration;

pub mod backend;
pub mod command;
pub mod task_runner;

pub use backend::{ExecutorBackend, ProcessExecutor};
pub use command::CommandSpec;

/// Terminal state of one execution attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobOutcome {
    /// Exit status 0.
    Succeeded { stdout: String, stderr: String },
    /// Non-zero exit, or killed by a signal (`exit_code` is `None` then).
    Failed {
        exit_code: Option<i32>,
        stdout: String,
        stderr: String,
    },
    /// The process could not be started at all.
    LaunchFailed { error: String },
}

impl JobOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, JobOutcome::Succeeded { .. })
    }

    pub fn exit_code(&self) -> Option<i32> {
        match self {
            JobOutcome::Succeeded { .. } => Some(0),
            JobOutcome::Failed { exit_code, .. } => *exit_code,
            JobOutcome::LaunchFailed { .. } => None,
        }
    }

    pub fn stdout(&self) -> &str {
        match self {
            JobOutcome::Succeeded { stdout, .. } | JobOutcome::Failed { stdout, .. } => stdout,
            JobOutcome::LaunchFailed { .. } => "",
        }
    }

    pub fn stderr(&self) -> &str {
        match self {
            JobOutcome::Succeeded { stderr, .. } | JobOutcome::Failed { stderr, .. } => stderr,
            JobOutcome::LaunchFailed { .. } => "",
        }
    }
}

/// Everything known about a finished job.
#[derive(Debug, Clone)]
pub struct ExecutionReport {
    pub job_id: String,
    pub command: String,
    pub outcome: JobOutcome,
    pub duration: Duration,
}
