// src/exec/task_runner.rs

//! Runs a single job process to completion.

use std::process::Stdio;
use std::time::Instant;

use tokio::process::Command;
use tracing::{debug, info};

use crate::exec::{CommandSpec, ExecutionReport, JobOutcome};

/// Spawn `spec`, wait for it, and capture everything it wrote.
///
/// Never returns an error: a process that cannot be started is reported as
/// [`JobOutcome::LaunchFailed`], so the caller always gets a terminal state.
pub async fn run_job(job_id: &str, command: &str, spec: &CommandSpec) -> ExecutionReport {
    info!(job = %job_id, program = %spec.program, "starting job process");

    let started = Instant::now();

    let mut cmd = Command::new(&spec.program);
    cmd.args(&spec.args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    // Own process group: a Ctrl-C in the terminal goes to renderq, which
    // finishes the current job instead of having it killed underneath.
    #[cfg(unix)]
    cmd.process_group(0);

    let outcome = match cmd.output().await {
        Ok(output) => {
            let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
            let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
            let exit_code = output.status.code();

            debug!(
                job = %job_id,
                exit_code = ?exit_code,
                stdout_bytes = output.stdout.len(),
                stderr_bytes = output.stderr.len(),
                "job process exited"
            );

            if output.status.success() {
                JobOutcome::Succeeded { stdout, stderr }
            } else {
                JobOutcome::Failed {
                    exit_code,
                    stdout,
                    stderr,
                }
            }
        }
        Err(e) => JobOutcome::LaunchFailed {
            error: format!("spawning `{spec}`: {e}"),
        },
    };

    ExecutionReport {
        job_id: job_id.to_string(),
        command: command.to_string(),
        outcome,
        duration: started.elapsed(),
    }
}
