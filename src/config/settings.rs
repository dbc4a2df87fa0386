// src/config/settings.rs

use std::path::PathBuf;
use std::time::Duration;

use crate::cli::CliArgs;
use crate::config::model::ConfigFile;
use crate::config::validate::{validate_poll_interval, validate_quarantine_dir};
use crate::errors::{RenderqError, Result};
use crate::types::ExecutionPolicy;

/// Effective settings after layering CLI flags over the config file.
#[derive(Debug, Clone)]
pub struct Settings {
    pub jobs_dir: PathBuf,
    pub patterns: Vec<String>,
    pub poll_interval: Duration,
    pub quarantine_dir: Option<PathBuf>,
    pub watch: bool,
    pub exec_mode: ExecutionPolicy,
    /// Full path of the log file, or `None` for stdout only.
    pub log_file: Option<PathBuf>,
    pub once: bool,
    pub dry_run: bool,
}

impl Settings {
    pub fn resolve(args: &CliArgs, cfg: ConfigFile) -> Result<Self> {
        let poll_secs = args.poll_interval.unwrap_or(cfg.queue.poll_interval);
        validate_poll_interval(poll_secs)?;
        let poll_interval = Duration::try_from_secs_f64(poll_secs)
            .map_err(|e| RenderqError::ConfigError(format!("poll interval {poll_secs}: {e}")))?;

        let log_file = if args.no_log_file || !cfg.log.enabled {
            None
        } else {
            let dir = args.log_dir.clone().unwrap_or(cfg.log.dir);
            Some(dir.join(cfg.log.file_name))
        };

        let jobs_dir = args.jobs_dir.clone().unwrap_or(cfg.queue.jobs_dir);
        validate_quarantine_dir(&jobs_dir, cfg.queue.quarantine_dir.as_deref())?;

        Ok(Self {
            jobs_dir,
            patterns: cfg.queue.patterns,
            poll_interval,
            quarantine_dir: cfg.queue.quarantine_dir,
            watch: cfg.queue.watch,
            exec_mode: args.exec_mode.unwrap_or(cfg.exec.mode),
            log_file,
            once: args.once,
            dry_run: args.dry_run,
        })
    }
}
