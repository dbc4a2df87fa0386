// src/config/validate.rs

use std::path::Path;

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{RenderqError, Result};
use crate::watch::DescriptorMatcher;

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = crate::errors::RenderqError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw.queue, raw.exec, raw.log))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    validate_poll_interval(cfg.queue.poll_interval)?;
    validate_dirs(cfg)?;
    validate_patterns(&cfg.queue.patterns)?;
    validate_log(cfg)?;
    Ok(())
}

/// Shared with the CLI override, which bypasses the TOML path.
pub fn validate_poll_interval(secs: f64) -> Result<()> {
    if !secs.is_finite() || secs <= 0.0 {
        return Err(RenderqError::ConfigError(format!(
            "[queue].poll_interval must be a positive number of seconds (got {secs})"
        )));
    }
    Ok(())
}

fn validate_dirs(cfg: &RawConfigFile) -> Result<()> {
    if cfg.queue.jobs_dir.as_os_str().is_empty() {
        return Err(RenderqError::ConfigError(
            "[queue].jobs_dir must not be empty".to_string(),
        ));
    }

    validate_quarantine_dir(&cfg.queue.jobs_dir, cfg.queue.quarantine_dir.as_deref())
}

/// Shared with the `--jobs-dir` override, which can change the jobs dir
/// after the file was validated.
pub fn validate_quarantine_dir(jobs_dir: &Path, quarantine: Option<&Path>) -> Result<()> {
    let Some(quarantine) = quarantine else {
        return Ok(());
    };
    if quarantine.as_os_str().is_empty() {
        return Err(RenderqError::ConfigError(
            "[queue].quarantine_dir must not be empty when set".to_string(),
        ));
    }
    if quarantine == jobs_dir {
        return Err(RenderqError::ConfigError(format!(
            "[queue].quarantine_dir must differ from jobs_dir ({jobs_dir:?})"
        )));
    }
    Ok(())
}

fn validate_patterns(patterns: &[String]) -> Result<()> {
    if patterns.iter().any(|p| p.trim().is_empty()) {
        return Err(RenderqError::ConfigError(
            "[queue].patterns must not contain empty patterns".to_string(),
        ));
    }
    // Compiling is the only reliable syntax check.
    DescriptorMatcher::new(patterns)?;
    Ok(())
}

fn validate_log(cfg: &RawConfigFile) -> Result<()> {
    if cfg.log.enabled && cfg.log.file_name.trim().is_empty() {
        return Err(RenderqError::ConfigError(
            "[log].file_name must not be empty when file logging is enabled".to_string(),
        ));
    }
    Ok(())
}
