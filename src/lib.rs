// src/lib.rs

pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod events;
pub mod exec;
pub mod fs;
pub mod job;
pub mod logging;
pub mod shutdown;
pub mod types;
pub mod watch;

use std::sync::Arc;

use anyhow::Result;
use tokio::sync::Notify;
use tracing::{debug, info};

use crate::config::Settings;
use crate::engine::{CoreRuntime, JobQueue, RunSummary, Runtime, RuntimeOptions};
use crate::events::TracingSink;
use crate::exec::ProcessExecutor;
use crate::fs::{FileSystem, RealFileSystem};
use crate::job::{ScanOptions, Scanner};
use crate::watch::{spawn_watcher, DescriptorMatcher};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - the scanner over the jobs directory
/// - core runtime / queue
/// - process executor
/// - (optional) directory watcher for early wakeups
/// - SIGINT / SIGTERM handling
pub async fn run(settings: Settings) -> Result<RunSummary> {
    let fs: Arc<dyn FileSystem> = Arc::new(RealFileSystem);
    let matcher = DescriptorMatcher::new(&settings.patterns)?;

    if settings.dry_run {
        print_dry_run(fs, &settings, matcher)?;
        return Ok(RunSummary::default());
    }

    let scanner = Scanner::new(
        fs,
        &settings.jobs_dir,
        matcher.clone(),
        ScanOptions {
            consume: true,
            quarantine_dir: settings.quarantine_dir.clone(),
        },
    );
    scanner.ensure_dir()?;

    info!(
        jobs_dir = ?settings.jobs_dir,
        patterns = ?settings.patterns,
        exec_mode = %settings.exec_mode,
        once = settings.once,
        "renderq starting"
    );

    let shutdown = shutdown::install_signal_handlers()?;
    let executor = ProcessExecutor::new(settings.exec_mode);
    let core = CoreRuntime::new(RuntimeOptions {
        exit_when_idle: settings.once,
    });

    let mut runtime = Runtime::new(
        core,
        scanner,
        executor,
        Arc::new(TracingSink),
        shutdown,
        settings.poll_interval,
    );

    // Kept alive for the duration of the loop; dropping it stops watching.
    let _watcher_handle = if settings.watch {
        let wake = Arc::new(Notify::new());
        let handle = spawn_watcher(&settings.jobs_dir, matcher, Arc::clone(&wake))?;
        runtime = runtime.with_wakeup(wake);
        Some(handle)
    } else {
        None
    };

    let summary = runtime.run().await?;
    Ok(summary)
}

/// Scan without consuming and print what would run, in order.
fn print_dry_run(
    fs: Arc<dyn FileSystem>,
    settings: &Settings,
    matcher: DescriptorMatcher,
) -> Result<()> {
    let scanner = Scanner::new(fs, &settings.jobs_dir, matcher, ScanOptions::default());
    let report = scanner.scan()?;

    println!("renderq dry-run");
    println!("  jobs_dir = {}", settings.jobs_dir.display());
    println!("  exec_mode = {}", settings.exec_mode);
    println!();

    let mut queue = JobQueue::new();
    for job in report.loaded {
        queue.push(job);
    }

    println!("would run ({}):", queue.len());
    for job in queue.drain_ordered() {
        println!("  - {} (priority {})", job.id, job.priority);
        println!("      command: {}", job.command);
        println!("      source: {}", job.source.display());
    }

    if !report.failed.is_empty() {
        println!();
        println!("would fail to load ({}):", report.failed.len());
        for err in &report.failed {
            println!("  - {}: {}", err.file, err.kind);
        }
    }

    debug!("dry-run complete (no execution)");
    Ok(())
}
