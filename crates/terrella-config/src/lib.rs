//! Configuration system for the terrella renderer.
//!
//! Provides runtime-configurable settings that persist to disk as RON files,
//! with CLI overrides via clap, hot-reload detection, and forward/backward
//! compatible serialization.

mod cli;
mod config;
mod error;

pub use cli::{CliArgs, parse_background};
pub use config::{
    AssetConfig, CameraConfig, Config, DebugConfig, OutputConfig, ServerConfig, default_config_dir,
};
pub use error::ConfigError;
