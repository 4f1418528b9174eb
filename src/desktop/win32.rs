//! Windows desktop backend.

use super::Desktop;
use crate::error::DesktopError;
use crate::winapi_utils::{clear_stay_awake, request_stay_awake, send_relative_move};

/// Desktop backed by `SendInput` and `SetThreadExecutionState`.
///
/// Tracks whether a stay-awake request is outstanding and clears it on drop
/// if the loop never got to [`Desktop::allow_sleep`] (e.g. on panic).
#[derive(Debug, Default)]
pub struct WindowsDesktop {
    awake_requested: bool,
}

impl WindowsDesktop {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Desktop for WindowsDesktop {
    fn move_pointer(&mut self, dx: i32, dy: i32) -> Result<(), DesktopError> {
        send_relative_move(dx, dy).map_err(|e| DesktopError::Input(e.to_string()))
    }

    fn keep_awake(&mut self) -> Result<(), DesktopError> {
        request_stay_awake().map_err(|e| DesktopError::Power(e.to_string()))?;
        self.awake_requested = true;
        Ok(())
    }

    fn allow_sleep(&mut self) -> Result<(), DesktopError> {
        clear_stay_awake().map_err(|e| DesktopError::Power(e.to_string()))?;
        self.awake_requested = false;
        Ok(())
    }
}

impl Drop for WindowsDesktop {
    fn drop(&mut self) {
        if !self.awake_requested {
            return;
        }
        match clear_stay_awake() {
            Ok(_) => tracing::debug!("Stay-awake request cleared on drop"),
            Err(e) => tracing::error!(error = ?e, "Failed to clear stay-awake request"),
        }
    }
}
