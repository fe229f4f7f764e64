//! Configuration for the globe generator.
//!
//! Settings persist to disk as a RON file, accept CLI overrides via clap, and
//! deserialize with defaults for any missing field.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{Config, DebugConfig, ElevationConfig, ExportConfig, MeshConfig, default_config_dir};
pub use error::ConfigError;
