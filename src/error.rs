//! Error types.
//!
//! Startup problems (`ConfigError`, a missing platform backend) are fatal.
//! `DesktopError` values raised during a tick are logged and the loop moves on.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Problems found while loading or validating configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("interval must be a positive number of minutes, got {0}")]
    InvalidInterval(f64),
    #[error("interval must be greater than zero")]
    ZeroInterval,
    #[error("max offset must be between 1 and {max} pixels, got {value}")]
    InvalidMaxOffset { value: i64, max: u32 },
    #[error("config file not found: {}", .0.display())]
    MissingFile(PathBuf),
    #[error("failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config file {}:\n{source}", path.display())]
    ParseToml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("failed to parse config file {}: {source}", path.display())]
    ParseJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Failure of one OS capability call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DesktopError {
    #[error("pointer move failed: {0}")]
    Input(String),
    #[error("power state request failed: {0}")]
    Power(String),
    #[error("no desktop backend for this platform ({0}); use --dry-run")]
    Unsupported(&'static str),
}

/// Top-level error for the binary.
#[derive(Error, Debug)]
pub enum NudgeError {
    #[error("{0}")]
    Config(#[from] ConfigError),
    #[error("{0}")]
    Desktop(#[from] DesktopError),
    #[error("failed to install interrupt handler: {0}")]
    Signal(#[from] ctrlc::Error),
}
