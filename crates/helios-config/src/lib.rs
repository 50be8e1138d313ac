//! Configuration system for the helios solar system viewer.
//!
//! Settings persist to disk as a RON file, tolerate missing or unknown fields,
//! and can be overridden from the command line via clap.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    Config, CoronaConfig, DebugConfig, SceneConfig, SimulationConfig, WindowConfig,
};
pub use error::ConfigError;
