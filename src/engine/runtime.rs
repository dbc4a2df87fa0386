// src/engine/runtime.rs

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Notify;
use tracing::{debug, info};

use crate::errors::Result;
use crate::events::{JobEvent, JobEventSink};
use crate::exec::ExecutorBackend;
use crate::job::{JobRecord, Scanner};
use crate::shutdown::ShutdownSignal;

use super::core::{CoreRuntime, LoopEvent};
use super::{CoreCommand, RunSummary};

/// Drives the poll/execute loop.
///
/// This is a pure IO shell around `CoreRuntime`, which holds the queue and
/// decides what happens next. This struct does the IO the core asks for:
/// scanning the directory, executing a job through the `ExecutorBackend`,
/// and sleeping between polls.
pub struct Runtime<E: ExecutorBackend> {
    core: CoreRuntime,
    scanner: Scanner,
    executor: E,
    sink: Arc<dyn JobEventSink>,
    shutdown: ShutdownSignal,
    poll_interval: Duration,
    wake: Option<Arc<Notify>>,
}

impl<E: ExecutorBackend> fmt::Debug for Runtime<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Runtime")
            .field("core", &self.core)
            .field("scanner", &self.scanner)
            .field("poll_interval", &self.poll_interval)
            .finish_non_exhaustive()
    }
}

impl<E: ExecutorBackend> Runtime<E> {
    pub fn new(
        core: CoreRuntime,
        scanner: Scanner,
        executor: E,
        sink: Arc<dyn JobEventSink>,
        shutdown: ShutdownSignal,
        poll_interval: Duration,
    ) -> Self {
        Self {
            core,
            scanner,
            executor,
            sink,
            shutdown,
            poll_interval,
            wake: None,
        }
    }

    /// Let an idle loop start its next scan as soon as `wake` is notified.
    pub fn with_wakeup(mut self, wake: Arc<Notify>) -> Self {
        self.wake = Some(wake);
        self
    }

    /// Main loop. Returns once shutdown is observed (or, in drain mode, once
    /// the queue is empty).
    ///
    /// Only a failure to access the watched directory ends the loop with an
    /// error; bad descriptors and failing jobs are reported to the sink.
    pub async fn run(mut self) -> Result<RunSummary> {
        info!(
            dir = ?self.scanner.dir(),
            poll_interval_ms = self.poll_interval.as_millis() as u64,
            "renderq loop started"
        );

        let mut summary = RunSummary::default();
        let mut command = self.core.start(self.shutdown.is_requested());

        loop {
            let event = match command {
                CoreCommand::ScanDirectory => LoopEvent::ScanCompleted(self.scan(&mut summary)?),
                CoreCommand::Execute(job) => {
                    self.execute(job, &mut summary).await;
                    LoopEvent::JobFinished
                }
                CoreCommand::Sleep => {
                    self.idle().await;
                    LoopEvent::IdleElapsed
                }
                CoreCommand::Exit => break,
            };

            command = self.core.step(event, self.shutdown.is_requested())?;
        }

        let leftover = self.core.drain_queue();
        if !leftover.is_empty() {
            summary.discarded = leftover.len();
            self.sink.record(&JobEvent::Discarded {
                ids: leftover.into_iter().map(|job| job.id).collect(),
            });
        }

        info!(
            executed = summary.executed,
            succeeded = summary.succeeded,
            failed = summary.failed,
            load_failures = summary.load_failures,
            "renderq loop stopped"
        );
        Ok(summary)
    }

    fn scan(&mut self, summary: &mut RunSummary) -> Result<Vec<JobRecord>> {
        let report = self.scanner.scan()?;

        for err in &report.failed {
            summary.load_failures += 1;
            self.sink.record(&JobEvent::LoadFailed {
                file: err.file.clone(),
                error: err.kind.to_string(),
            });
        }
        for (from, to) in &report.quarantined {
            self.sink.record(&JobEvent::Quarantined {
                from: from.clone(),
                to: to.clone(),
            });
        }
        for job in &report.loaded {
            self.sink.record(&JobEvent::Queued {
                id: job.id.clone(),
                priority: job.priority,
                source: job.source.clone(),
            });
        }

        Ok(report.loaded)
    }

    async fn execute(&mut self, job: JobRecord, summary: &mut RunSummary) {
        let id = job.id.clone();
        self.sink.record(&JobEvent::Started {
            id: id.clone(),
            command: job.command.clone(),
        });

        summary.executed += 1;
        match self.executor.execute(job).await {
            Ok(report) => {
                if report.outcome.is_success() {
                    summary.succeeded += 1;
                } else {
                    summary.failed += 1;
                }
                self.sink.record(&JobEvent::Finished(report));
            }
            Err(err) => {
                summary.failed += 1;
                self.sink.record(&JobEvent::Unexpected {
                    id,
                    error: format!("{err:#}"),
                });
            }
        }
    }

    async fn idle(&mut self) {
        let wake = self.wake.clone();

        tokio::select! {
            _ = tokio::time::sleep(self.poll_interval) => {}
            _ = self.shutdown.requested() => {
                debug!("shutdown requested while idle");
            }
            _ = wait_for_wakeup(wake.as_deref()) => {
                debug!("woken early by directory change");
            }
        }
    }
}

async fn wait_for_wakeup(wake: Option<&Notify>) {
    match wake {
        Some(notify) => notify.notified().await,
        None => std::future::pending().await,
    }
}
