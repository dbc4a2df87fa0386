// src/job/scanner.rs

//! One pass over the watched directory.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, warn};

use crate::errors::{LoadError, LoadErrorKind, RenderqError, Result};
use crate::fs::FileSystem;
use crate::job::{load_job_file, JobRecord};
use crate::watch::DescriptorMatcher;

/// What the scanner does with descriptor files after looking at them.
#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    /// Delete descriptors that loaded. Turning this off means every scan
    /// sees the same files again (dry runs, crash simulation).
    pub consume: bool,
    /// Move descriptors that failed to load here. `None` leaves them in the
    /// watched directory, where they are retried on every scan.
    pub quarantine_dir: Option<PathBuf>,
}

impl ScanOptions {
    pub fn consuming() -> Self {
        Self {
            consume: true,
            quarantine_dir: None,
        }
    }
}

/// Result of a single scan.
#[derive(Debug, Default)]
pub struct ScanReport {
    /// Records whose descriptors loaded (and were consumed, if enabled), in
    /// the order the files were visited.
    pub loaded: Vec<JobRecord>,
    pub failed: Vec<LoadError>,
    /// `(from, to)` for every descriptor moved into quarantine.
    pub quarantined: Vec<(PathBuf, PathBuf)>,
}

#[derive(Debug)]
pub struct Scanner {
    fs: Arc<dyn FileSystem>,
    dir: PathBuf,
    matcher: DescriptorMatcher,
    options: ScanOptions,
}

impl Scanner {
    pub fn new(
        fs: Arc<dyn FileSystem>,
        dir: impl Into<PathBuf>,
        matcher: DescriptorMatcher,
        options: ScanOptions,
    ) -> Self {
        Self {
            fs,
            dir: dir.into(),
            matcher,
            options,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Create the watched directory if it does not exist yet.
    pub fn ensure_dir(&self) -> Result<()> {
        self.fs
            .create_dir_all(&self.dir)
            .map_err(|source| RenderqError::WatchDir {
                path: self.dir.clone(),
                source,
            })
    }

    /// Load every matching descriptor currently in the directory.
    ///
    /// Only an unreadable directory is an error; problems with individual
    /// files end up in [`ScanReport::failed`].
    pub fn scan(&self) -> Result<ScanReport> {
        let mut paths = self
            .fs
            .read_dir(&self.dir)
            .map_err(|source| RenderqError::WatchDir {
                path: self.dir.clone(),
                source,
            })?;
        paths.retain(|p| self.matcher.matches(p) && self.fs.is_file(p));
        paths.sort();

        let mut report = ScanReport::default();

        for path in paths {
            match load_job_file(self.fs.as_ref(), &path) {
                Ok(record) => {
                    if self.options.consume {
                        // The record is only handed out once its file is
                        // gone, otherwise the next scan would queue it again.
                        if let Err(e) = self.fs.remove_file(&path) {
                            let kind = LoadErrorKind::Consume(e);
                            report.failed.push(LoadError::new(record.source_name(), kind));
                            continue;
                        }
                    }
                    debug!(path = ?path, id = %record.id, "loaded descriptor");
                    report.loaded.push(record);
                }
                Err(err) => {
                    if let Some(dest) = self.quarantine(&path) {
                        report.quarantined.push((path.clone(), dest));
                    }
                    report.failed.push(err);
                }
            }
        }

        Ok(report)
    }

    fn quarantine(&self, path: &Path) -> Option<PathBuf> {
        let dir = self.options.quarantine_dir.as_ref()?;
        let dest = self.free_quarantine_path(dir, path.file_name()?);
        match self.fs.rename(path, &dest) {
            Ok(()) => Some(dest),
            Err(e) => {
                warn!(path = ?path, dest = ?dest, error = %e, "failed to quarantine descriptor");
                None
            }
        }
    }

    /// `dir/name`, or `dir/name.1`, `dir/name.2`, ... if that is taken. An
    /// earlier quarantined descriptor is never overwritten.
    fn free_quarantine_path(&self, dir: &Path, name: &OsStr) -> PathBuf {
        let mut dest = dir.join(name);
        let mut n = 0u32;
        while self.fs.exists(&dest) {
            n += 1;
            let mut numbered = name.to_os_string();
            numbered.push(format!(".{n}"));
            dest = dir.join(numbered);
        }
        dest
    }
}
