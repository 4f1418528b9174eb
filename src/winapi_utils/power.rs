//! Thread execution state (stay-awake) requests.
//!
//! `SetThreadExecutionState` is per-thread: the request is dropped when the
//! calling thread exits, and must be cleared from the thread that set it.

use windows::Win32::System::Power::{
    SetThreadExecutionState, ES_CONTINUOUS, ES_DISPLAY_REQUIRED, ES_SYSTEM_REQUIRED,
    EXECUTION_STATE,
};

/// Requests that neither the system nor the display idle out.
///
/// Returns the previous execution state.
pub fn request_stay_awake() -> windows::core::Result<EXECUTION_STATE> {
    set_execution_state(ES_CONTINUOUS | ES_SYSTEM_REQUIRED | ES_DISPLAY_REQUIRED)
}

/// Returns the calling thread to normal idle behavior.
pub fn clear_stay_awake() -> windows::core::Result<EXECUTION_STATE> {
    set_execution_state(ES_CONTINUOUS)
}

fn set_execution_state(flags: EXECUTION_STATE) -> windows::core::Result<EXECUTION_STATE> {
    let previous = unsafe { SetThreadExecutionState(flags) };

    // A zero return is the only failure signal.
    if previous.0 == 0 {
        return Err(windows::core::Error::from_win32());
    }

    tracing::trace!(flags = flags.0, previous = previous.0, "Execution state updated");
    Ok(previous)
}
