//! OS capabilities used by the jiggler loop.
//!
//! The loop only ever talks to a [`Desktop`]. The real backend is Windows
//! only; [`RecordingDesktop`] stands in for it under test and in `--dry-run`.

pub mod recording;
#[cfg(windows)]
pub mod win32;

pub use recording::*;
#[cfg(windows)]
pub use win32::*;

use crate::error::DesktopError;

/// Side-effecting OS calls the loop depends on.
pub trait Desktop {
    /// Moves the pointer by `(dx, dy)` relative to where it is now.
    fn move_pointer(&mut self, dx: i32, dy: i32) -> Result<(), DesktopError>;

    /// Asks the OS not to sleep or dim the display for inactivity.
    ///
    /// Idle timers reset on each call, so callers re-assert it every tick.
    fn keep_awake(&mut self) -> Result<(), DesktopError>;

    /// Clears a previous [`Desktop::keep_awake`] request.
    fn allow_sleep(&mut self) -> Result<(), DesktopError>;
}

impl<D: Desktop + ?Sized> Desktop for Box<D> {
    fn move_pointer(&mut self, dx: i32, dy: i32) -> Result<(), DesktopError> {
        (**self).move_pointer(dx, dy)
    }

    fn keep_awake(&mut self) -> Result<(), DesktopError> {
        (**self).keep_awake()
    }

    fn allow_sleep(&mut self) -> Result<(), DesktopError> {
        (**self).allow_sleep()
    }
}

/// Returns the OS-backed desktop for the current platform.
#[cfg(windows)]
pub fn system_desktop() -> Result<Box<dyn Desktop>, DesktopError> {
    Ok(Box::new(WindowsDesktop::new()))
}

/// Returns the OS-backed desktop for the current platform.
#[cfg(not(windows))]
pub fn system_desktop() -> Result<Box<dyn Desktop>, DesktopError> {
    Err(DesktopError::Unsupported(std::env::consts::OS))
}
