//! nudgemon keeps a desktop session looking active.
//!
//! Every interval the pointer is moved by a few pixels and, optionally, the
//! OS is asked not to sleep or blank the display.

pub mod cli;
pub mod config;
pub mod desktop;
pub mod error;
pub mod jiggler;
pub mod logging;
#[cfg(windows)]
pub mod winapi_utils;

pub use error::{ConfigError, DesktopError, NudgeError};
