// src/events.rs

//! Job lifecycle events and where they go.
//!
//! The loop never logs job outcomes directly; it reports them to a
//! [`JobEventSink`] it was given. [`TracingSink`] turns them into log lines,
//! tests use a recording sink to assert on what happened.

use std::path::PathBuf;

use tracing::{error, info, warn};

use crate::exec::{ExecutionReport, JobOutcome};

#[derive(Debug, Clone)]
pub enum JobEvent {
    /// A descriptor loaded and the job is now in the queue.
    Queued {
        id: String,
        priority: i64,
        source: PathBuf,
    },
    /// A descriptor could not be loaded (or consumed). The file stays put
    /// unless it was quarantined.
    LoadFailed { file: String, error: String },
    /// A descriptor that failed to load was moved out of the watched
    /// directory.
    Quarantined { from: PathBuf, to: PathBuf },
    /// A job was popped and its process is about to start.
    Started { id: String, command: String },
    /// A job reached a terminal state.
    Finished(ExecutionReport),
    /// The executor itself failed around a job.
    Unexpected { id: String, error: String },
    /// The loop stopped with jobs still queued; they are dropped.
    Discarded { ids: Vec<String> },
}

/// Receiver for [`JobEvent`]s.
pub trait JobEventSink: Send + Sync {
    fn record(&self, event: &JobEvent);
}

/// Default sink: structured `tracing` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl JobEventSink for TracingSink {
    fn record(&self, event: &JobEvent) {
        match event {
            JobEvent::Queued {
                id,
                priority,
                source,
            } => {
                info!(job = %id, priority, source = ?source, "queued job");
            }
            JobEvent::LoadFailed { file, error } => {
                error!(file = %file, error = %error, "failed to load job descriptor");
            }
            JobEvent::Quarantined { from, to } => {
                warn!(from = ?from, to = ?to, "moved bad descriptor to quarantine");
            }
            JobEvent::Started { id, command } => {
                info!(job = %id, command = %command, "job started");
            }
            JobEvent::Finished(report) => log_finished(report),
            JobEvent::Unexpected { id, error } => {
                error!(job = %id, error = %error, "unexpected error while executing job");
            }
            JobEvent::Discarded { ids } => {
                warn!(count = ids.len(), jobs = ?ids, "stopping with queued jobs; they will not run");
            }
        }
    }
}

fn log_finished(report: &ExecutionReport) {
    let job = report.job_id.as_str();
    let elapsed_ms = report.duration.as_millis() as u64;

    match &report.outcome {
        JobOutcome::Succeeded { stdout, stderr } => {
            if !stdout.is_empty() {
                info!(job, "stdout:\n{}", stdout.trim_end());
            }
            if !stderr.is_empty() {
                warn!(job, "stderr:\n{}", stderr.trim_end());
            }
            info!(job, elapsed_ms, "job succeeded");
        }
        JobOutcome::Failed {
            exit_code,
            stdout,
            stderr,
        } => {
            error!(
                job,
                exit_code = ?exit_code,
                elapsed_ms,
                stdout = %stdout.trim_end(),
                stderr = %stderr.trim_end(),
                "job failed"
            );
        }
        JobOutcome::LaunchFailed { error } => {
            error!(job, elapsed_ms, error = %error, "job failed to launch");
        }
    }
}
