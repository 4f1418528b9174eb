//! Safe wrappers around Windows API calls.
//!
//! This module provides safe Rust abstractions over the unsafe WinAPI
//! functions used for pointer injection and power state requests.

pub mod input;
pub mod power;

pub use input::*;
pub use power::*;
