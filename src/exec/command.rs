// src/exec/command.rs

use crate::job::JobRecord;
use crate::types::ExecutionPolicy;

/// A command as the OS sees it: one program plus its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandSpec {
    /// Wrap `command` for the platform shell.
    pub fn shell(command: &str) -> Self {
        if cfg!(windows) {
            Self {
                program: "cmd".to_string(),
                args: vec!["/C".to_string(), command.to_string()],
            }
        } else {
            Self {
                program: "sh".to_string(),
                args: vec!["-c".to_string(), command.to_string()],
            }
        }
    }

    /// Split `command` on whitespace. Returns `None` for a blank command.
    ///
    /// There is no quoting: `echo "a b"` becomes `echo`, `"a`, `b"`.
    pub fn argv(command: &str) -> Option<Self> {
        let mut parts = command.split_whitespace().map(str::to_string);
        let program = parts.next()?;
        Some(Self {
            program,
            args: parts.collect(),
        })
    }

    /// Program and arguments for `job` under `policy`.
    pub fn from_job(job: &JobRecord, policy: ExecutionPolicy) -> Option<Self> {
        match policy {
            ExecutionPolicy::Shell => Some(Self::shell(&job.command)),
            ExecutionPolicy::Argv => Self::argv(&job.command),
        }
    }
}

impl std::fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg:?}")?;
        }
        Ok(())
    }
}
