use std::str::FromStr;

use clap::ValueEnum;
use serde::Deserialize;

/// How a job's `command` string is turned into a process.
///
/// - `Shell`: hand the whole string to the platform shell (`sh -c`, or
///   `cmd /C` on Windows). Pipes, redirects and globbing work, and so does
///   anything else a descriptor author writes.
/// - `Argv`: split on whitespace, run the first token directly with the rest
///   as arguments. No shell is involved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionPolicy {
    #[default]
    Shell,
    Argv,
}

impl FromStr for ExecutionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "shell" => Ok(ExecutionPolicy::Shell),
            "argv" => Ok(ExecutionPolicy::Argv),
            other => Err(format!(
                "invalid exec mode: {other} (expected \"shell\" or \"argv\")"
            )),
        }
    }
}

impl std::fmt::Display for ExecutionPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExecutionPolicy::Shell => write!(f, "shell"),
            ExecutionPolicy::Argv => write!(f, "argv"),
        }
    }
}
