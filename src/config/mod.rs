// src/config/mod.rs

//! Configuration: optional TOML file, validation, and the final
//! [`Settings`] after CLI overrides.

pub mod loader;
pub mod model;
pub mod settings;
pub mod validate;

pub use loader::{default_config_path, load_and_validate, load_from_path, load_or_default};
pub use model::{ConfigFile, ExecSection, LogSection, QueueSection, RawConfigFile};
pub use settings::Settings;
