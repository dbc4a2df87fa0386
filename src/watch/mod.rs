// src/watch/mod.rs

//! Which files count as descriptors, and optional change notifications for
//! the watched directory.
//!
//! - [`patterns`] compiles the descriptor file-name globs (`globset`).
//! - [`watcher`] wires up `notify` so an idle loop can scan early when a
//!   descriptor lands, instead of waiting out the full poll interval.

pub mod patterns;
pub mod watcher;

pub use patterns::DescriptorMatcher;
pub use watcher::{spawn_watcher, WatcherHandle};
