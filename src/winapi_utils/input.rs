//! Pointer injection through `SendInput`.

use windows::Win32::UI::Input::KeyboardAndMouse::{
    SendInput, INPUT, INPUT_0, INPUT_MOUSE, MOUSEEVENTF_MOVE, MOUSEINPUT,
};

/// Injects a relative mouse move of `(dx, dy)` mickeys.
///
/// Windows applies pointer acceleration to relative moves, so the on-screen
/// displacement can differ from the requested one by a pixel or so.
///
/// Fails when the input was blocked, e.g. the session is locked or another
/// desktop (UAC prompt) is active.
pub fn send_relative_move(dx: i32, dy: i32) -> windows::core::Result<()> {
    let input = INPUT {
        r#type: INPUT_MOUSE,
        Anonymous: INPUT_0 {
            mi: MOUSEINPUT {
                dx,
                dy,
                mouseData: 0,
                dwFlags: MOUSEEVENTF_MOVE,
                time: 0,
                dwExtraInfo: 0,
            },
        },
    };

    let inserted = unsafe { SendInput(&[input], std::mem::size_of::<INPUT>() as i32) };
    if inserted == 0 {
        return Err(windows::core::Error::from_win32());
    }

    tracing::trace!(dx, dy, "SendInput inserted pointer move");
    Ok(())
}
