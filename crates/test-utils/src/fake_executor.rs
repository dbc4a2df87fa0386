use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use renderq::errors::{RenderqError, Result};
use renderq::exec::{ExecutionReport, ExecutorBackend, JobOutcome};
use renderq::job::JobRecord;
use renderq::shutdown::ShutdownTrigger;

/// A fake executor that:
/// - records which jobs were "run", in order
/// - reports a scripted outcome per job id (success by default)
/// - can request shutdown while a given job is "running"
pub struct FakeExecutor {
    executed: Arc<Mutex<Vec<String>>>,
    outcomes: HashMap<String, JobOutcome>,
    errors: HashMap<String, String>,
    shutdown_during: Option<(String, ShutdownTrigger)>,
    delay: Duration,
}

impl FakeExecutor {
    pub fn new(executed: Arc<Mutex<Vec<String>>>) -> Self {
        Self {
            executed,
            outcomes: HashMap::new(),
            errors: HashMap::new(),
            shutdown_during: None,
            delay: Duration::ZERO,
        }
    }

    pub fn with_outcome(mut self, id: &str, outcome: JobOutcome) -> Self {
        self.outcomes.insert(id.to_string(), outcome);
        self
    }

    /// Make `execute` itself return an error for `id`.
    pub fn with_error(mut self, id: &str, message: &str) -> Self {
        self.errors.insert(id.to_string(), message.to_string());
        self
    }

    /// Request shutdown as soon as `id` starts, then keep "running" it for
    /// the configured delay before completing.
    pub fn shutdown_during(mut self, id: &str, trigger: ShutdownTrigger) -> Self {
        self.shutdown_during = Some((id.to_string(), trigger));
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

impl ExecutorBackend for FakeExecutor {
    fn execute(
        &mut self,
        job: JobRecord,
    ) -> Pin<Box<dyn Future<Output = Result<ExecutionReport>> + Send + '_>> {
        Box::pin(async move {
            self.executed.lock().unwrap().push(job.id.clone());

            if let Some((id, trigger)) = &self.shutdown_during {
                if *id == job.id {
                    trigger.request();
                }
            }

            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }

            if let Some(message) = self.errors.get(&job.id) {
                return Err(RenderqError::Other(anyhow::anyhow!(message.clone())));
            }

            let outcome = self
                .outcomes
                .get(&job.id)
                .cloned()
                .unwrap_or(JobOutcome::Succeeded {
                    stdout: String::new(),
                    stderr: String::new(),
                });

            Ok(ExecutionReport {
                job_id: job.id,
                command: job.command,
                outcome,
                duration: self.delay,
            })
        })
    }
}
