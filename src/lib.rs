pub mod adapters;
pub mod api;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use app::{build_tracker, HttpTracker};
pub use config::toml_config::TomlConfig;
pub use core::tracker::IssTracker;
pub use utils::error::{Result, TrackerError};
