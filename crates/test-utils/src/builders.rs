#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use serde_json::{json, Map, Value};

use renderq::job::JobRecord;

/// Builder for descriptor JSON, written to disk with [`DescriptorBuilder::write_to`].
pub struct DescriptorBuilder {
    fields: Map<String, Value>,
}

impl DescriptorBuilder {
    pub fn new(command: &str) -> Self {
        let mut fields = Map::new();
        fields.insert("command".to_string(), json!(command));
        Self { fields }
    }

    /// A descriptor with no `command` at all.
    pub fn without_command() -> Self {
        Self { fields: Map::new() }
    }

    pub fn id(mut self, id: &str) -> Self {
        self.fields.insert("id".to_string(), json!(id));
        self
    }

    pub fn priority(mut self, priority: i64) -> Self {
        self.fields.insert("priority".to_string(), json!(priority));
        self
    }

    pub fn field(mut self, name: &str, value: Value) -> Self {
        self.fields.insert(name.to_string(), value);
        self
    }

    pub fn to_json(&self) -> String {
        Value::Object(self.fields.clone()).to_string()
    }

    /// Write `<dir>/<file_name>` and return its path.
    pub fn write_to(&self, dir: &Path, file_name: &str) -> PathBuf {
        let path = dir.join(file_name);
        std::fs::write(&path, self.to_json()).expect("failed to write descriptor");
        path
    }
}

/// Builder for in-memory `JobRecord`s, for queue and core tests.
pub struct JobRecordBuilder {
    record: JobRecord,
}

impl JobRecordBuilder {
    pub fn new(id: &str) -> Self {
        Self {
            record: JobRecord {
                id: id.to_string(),
                priority: 0,
                submitted_at: SystemTime::UNIX_EPOCH,
                command: format!("echo {id}"),
                raw_payload: Map::new(),
                source: PathBuf::from(format!("jobs/{id}.json")),
            },
        }
    }

    pub fn priority(mut self, priority: i64) -> Self {
        self.record.priority = priority;
        self
    }

    /// Submission time as seconds after the Unix epoch.
    pub fn submitted_at_secs(mut self, secs: u64) -> Self {
        self.record.submitted_at = SystemTime::UNIX_EPOCH + Duration::from_secs(secs);
        self
    }

    pub fn command(mut self, command: &str) -> Self {
        self.record.command = command.to_string();
        self
    }

    pub fn build(self) -> JobRecord {
        self.record
    }
}
