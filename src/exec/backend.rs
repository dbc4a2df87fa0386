// src/exec/backend.rs

//! Pluggable executor backend abstraction.
//!
//! The loop hands each dispatched job to an `ExecutorBackend` and awaits the
//! returned report before doing anything else. This keeps the queue and the
//! loader ignorant of how commands run, and lets tests substitute a fake
//! executor that records jobs instead of spawning processes.

use std::future::Future;
use std::pin::Pin;

use tracing::warn;

use crate::errors::Result;
use crate::exec::task_runner::run_job;
use crate::exec::{CommandSpec, ExecutionReport, JobOutcome};
use crate::job::JobRecord;
use crate::types::ExecutionPolicy;

/// Trait abstracting how a dispatched job is executed.
///
/// Production code uses [`ProcessExecutor`]; tests can provide their own
/// implementation that doesn't spawn real processes.
pub trait ExecutorBackend: Send {
    /// Run `job` to a terminal state and describe it.
    ///
    /// An `Err` means something went wrong *around* the job (not the job
    /// failing); the loop logs it as unexpected and moves on.
    fn execute(
        &mut self,
        job: JobRecord,
    ) -> Pin<Box<dyn Future<Output = Result<ExecutionReport>> + Send + '_>>;
}

/// Real executor backend used in production: one OS process per job.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessExecutor {
    policy: ExecutionPolicy,
}

impl ProcessExecutor {
    pub fn new(policy: ExecutionPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> ExecutionPolicy {
        self.policy
    }
}

impl ExecutorBackend for ProcessExecutor {
    fn execute(
        &mut self,
        job: JobRecord,
    ) -> Pin<Box<dyn Future<Output = Result<ExecutionReport>> + Send + '_>> {
        let policy = self.policy;

        Box::pin(async move {
            let Some(spec) = CommandSpec::from_job(&job, policy) else {
                warn!(job = %job.id, "command has no program to run");
                return Ok(ExecutionReport {
                    job_id: job.id,
                    command: job.command,
                    outcome: JobOutcome::LaunchFailed {
                        error: "command is empty".to_string(),
                    },
                    duration: Default::default(),
                });
            };

            Ok(run_job(&job.id, &job.command, &spec).await)
        })
    }
}
