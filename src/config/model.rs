// src/config/model.rs

use std::path::PathBuf;

use serde::Deserialize;

use crate::types::ExecutionPolicy;

/// Configuration file as read from TOML, before validation.
///
/// ```toml
/// [queue]
/// jobs_dir = "jobs"
/// patterns = ["*.json"]
/// poll_interval = 1.0
/// quarantine_dir = "jobs/failed"
/// watch = false
///
/// [exec]
/// mode = "shell"
///
/// [log]
/// dir = "logs"
/// file_name = "renderq.log"
/// enabled = true
/// ```
///
/// Every section and key is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawConfigFile {
    #[serde(default)]
    pub queue: QueueSection,

    #[serde(default)]
    pub exec: ExecSection,

    #[serde(default)]
    pub log: LogSection,
}

/// Validated configuration. Only constructed through
/// `TryFrom<RawConfigFile>`.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub queue: QueueSection,
    pub exec: ExecSection,
    pub log: LogSection,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(queue: QueueSection, exec: ExecSection, log: LogSection) -> Self {
        Self { queue, exec, log }
    }
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self::new_unchecked(
            QueueSection::default(),
            ExecSection::default(),
            LogSection::default(),
        )
    }
}

/// `[queue]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QueueSection {
    /// Directory scanned for descriptors.
    #[serde(default = "default_jobs_dir")]
    pub jobs_dir: PathBuf,

    /// File-name globs that mark a file as a descriptor.
    #[serde(default = "default_patterns")]
    pub patterns: Vec<String>,

    /// Seconds to sleep when the queue is empty.
    #[serde(default = "default_poll_interval")]
    pub poll_interval: f64,

    /// Where descriptors that fail to load are moved. Unset means they stay
    /// in `jobs_dir` and are retried every cycle.
    #[serde(default)]
    pub quarantine_dir: Option<PathBuf>,

    /// Wake an idle loop early on directory changes.
    #[serde(default)]
    pub watch: bool,
}

fn default_jobs_dir() -> PathBuf {
    PathBuf::from("jobs")
}

fn default_patterns() -> Vec<String> {
    vec!["*.json".to_string()]
}

fn default_poll_interval() -> f64 {
    1.0
}

impl Default for QueueSection {
    fn default() -> Self {
        Self {
            jobs_dir: default_jobs_dir(),
            patterns: default_patterns(),
            poll_interval: default_poll_interval(),
            quarantine_dir: None,
            watch: false,
        }
    }
}

/// `[exec]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExecSection {
    #[serde(default)]
    pub mode: ExecutionPolicy,
}

/// `[log]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LogSection {
    #[serde(default = "default_log_dir")]
    pub dir: PathBuf,

    #[serde(default = "default_log_file_name")]
    pub file_name: String,

    /// Write a log file in addition to stdout.
    #[serde(default = "default_true")]
    pub enabled: bool,
}

fn default_log_dir() -> PathBuf {
    PathBuf::from("logs")
}

fn default_log_file_name() -> String {
    "renderq.log".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for LogSection {
    fn default() -> Self {
        Self {
            dir: default_log_dir(),
            file_name: default_log_file_name(),
            enabled: true,
        }
    }
}
