// src/job/mod.rs

//! Job descriptors on disk and their in-memory form.
//!
//! - [`record`] defines [`JobRecord`] and its ordering key.
//! - [`loader`] parses and validates one descriptor file.
//! - [`scanner`] walks the watched directory, loads every matching
//!   descriptor and consumes (deletes) the ones that loaded.

pub mod loader;
pub mod record;
pub mod scanner;

pub use loader::load_job_file;
pub use record::{JobRecord, OrderingKey};
pub use scanner::{ScanOptions, ScanReport, Scanner};
