// src/errors.rs

//! Crate-wide error types.
//!
//! `RenderqError` covers everything that can stop the process or reject a
//! configuration. Per-descriptor problems are [`LoadError`]s: the scanner
//! reports them and the loop carries on.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderqError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// The watched directory could not be created or listed. The loop cannot
    /// make progress without it, so this is fatal.
    #[error("cannot access jobs directory {path:?}: {source}")]
    WatchDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid loop transition: event {event} while {state}")]
    InvalidTransition { state: String, event: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// A descriptor file that could not be turned into a job.
#[derive(Error, Debug)]
#[error("failed to load job file {file}: {kind}")]
pub struct LoadError {
    /// File name of the descriptor (no directory).
    pub file: String,
    #[source]
    pub kind: LoadErrorKind,
}

#[derive(Error, Debug)]
pub enum LoadErrorKind {
    #[error("cannot read descriptor: {0}")]
    Read(#[source] std::io::Error),

    #[error("cannot read descriptor metadata: {0}")]
    Metadata(#[source] std::io::Error),

    #[error("malformed JSON: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("descriptor must be a JSON object, got {0}")]
    NotAnObject(&'static str),

    #[error("`id` must be a string or a number, got {0}")]
    InvalidId(&'static str),

    #[error("`priority` is not an integer: {0}")]
    InvalidPriority(String),

    #[error("missing required field `command`")]
    MissingCommand,

    #[error("`command` must be a string, got {0}")]
    InvalidCommand(&'static str),

    #[error("`command` is empty")]
    EmptyCommand,

    #[error("cannot remove loaded descriptor: {0}")]
    Consume(#[source] std::io::Error),
}

impl LoadError {
    pub fn new(file: impl Into<String>, kind: LoadErrorKind) -> Self {
        Self {
            file: file.into(),
            kind,
        }
    }
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, RenderqError>;
