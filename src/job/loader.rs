// src/job/loader.rs

//! Turns one descriptor file into a [`JobRecord`].
//!
//! The loader only reads. Deleting the file after a successful load is the
//! scanner's responsibility, so the loader can be reused for dry runs.

use std::path::Path;

use serde_json::{Map, Value};
use tracing::trace;

use crate::errors::{LoadError, LoadErrorKind};
use crate::fs::FileSystem;
use crate::job::JobRecord;

/// Read and validate the descriptor at `path`.
///
/// ```json
/// { "id": "render-42", "priority": 5, "command": "blender -b scene.blend -a" }
/// ```
///
/// - `id` falls back to the file stem.
/// - `priority` falls back to 0 and accepts anything integer-like.
/// - `command` is required and must not be blank.
pub fn load_job_file(fs: &dyn FileSystem, path: &Path) -> Result<JobRecord, LoadError> {
    let file = file_name_of(path);
    let fail = |kind: LoadErrorKind| LoadError::new(file.clone(), kind);

    let contents = fs.read_to_string(path).map_err(|e| fail(LoadErrorKind::Read(e)))?;
    let value: Value = serde_json::from_str(&contents).map_err(|e| fail(e.into()))?;

    let payload = match value {
        Value::Object(map) => map,
        other => return Err(fail(LoadErrorKind::NotAnObject(type_name(&other)))),
    };

    let id = parse_id(&payload, path).map_err(&fail)?;
    let priority = parse_priority(payload.get("priority")).map_err(&fail)?;
    let command = parse_command(payload.get("command")).map_err(&fail)?;
    let submitted_at = fs
        .modified(path)
        .map_err(|e| fail(LoadErrorKind::Metadata(e)))?;

    trace!(file = %file, id = %id, priority, "parsed descriptor");

    Ok(JobRecord {
        id,
        priority,
        submitted_at,
        command,
        raw_payload: payload,
        source: path.to_path_buf(),
    })
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn parse_id(payload: &Map<String, Value>, path: &Path) -> Result<String, LoadErrorKind> {
    match payload.get("id") {
        None => Ok(path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(Value::Number(n)) => Ok(n.to_string()),
        Some(other) => Err(LoadErrorKind::InvalidId(type_name(other))),
    }
}

/// Integer coercion: integers as-is, floats truncated toward zero, strings
/// parsed after trimming.
pub fn parse_priority(value: Option<&Value>) -> Result<i64, LoadErrorKind> {
    let invalid = |v: &Value| LoadErrorKind::InvalidPriority(v.to_string());

    match value {
        None => Ok(0),
        Some(Value::Number(n)) => {
            if let Some(i) = n.as_i64() {
                return Ok(i);
            }
            let in_range = i64::MIN as f64..i64::MAX as f64;
            n.as_f64()
                .map(f64::trunc)
                .filter(|f| in_range.contains(f))
                .map(|f| f as i64)
                .ok_or_else(|| LoadErrorKind::InvalidPriority(n.to_string()))
        }
        Some(Value::String(s)) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| LoadErrorKind::InvalidPriority(format!("{s:?}"))),
        Some(other) => Err(invalid(other)),
    }
}

fn parse_command(value: Option<&Value>) -> Result<String, LoadErrorKind> {
    match value {
        None | Some(Value::Null) => Err(LoadErrorKind::MissingCommand),
        Some(Value::String(s)) if s.trim().is_empty() => Err(LoadErrorKind::EmptyCommand),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Err(LoadErrorKind::InvalidCommand(type_name(other))),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
