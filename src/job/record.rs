// src/job/record.rs

use std::cmp::Reverse;
use std::path::PathBuf;
use std::time::SystemTime;

use serde_json::{Map, Value};

/// A parsed job descriptor, ready to be queued.
///
/// Only `priority` and `submitted_at` take part in ordering (see
/// [`JobRecord::ordering_key`]); `raw_payload` is carried along untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct JobRecord {
    pub id: String,
    /// Higher runs first.
    pub priority: i64,
    /// Last-modified time of the descriptor file. Earlier runs first among
    /// equal priorities.
    pub submitted_at: SystemTime,
    pub command: String,
    /// The whole descriptor object, unknown fields included.
    pub raw_payload: Map<String, Value>,
    /// Descriptor file this record was loaded from.
    pub source: PathBuf,
}

/// Sort key where "greater" means "serve sooner".
pub type OrderingKey = (i64, Reverse<SystemTime>);

impl JobRecord {
    pub fn ordering_key(&self) -> OrderingKey {
        (self.priority, Reverse(self.submitted_at))
    }

    /// File name of the descriptor, for log lines.
    pub fn source_name(&self) -> String {
        self.source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.source.display().to_string())
    }
}
