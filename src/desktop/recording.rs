//! In-memory desktop that records calls instead of touching the OS.

use super::Desktop;
use crate::error::DesktopError;
use std::sync::{Arc, Mutex};

/// One call made against a [`RecordingDesktop`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DesktopCall {
    Move { dx: i32, dy: i32 },
    KeepAwake,
    AllowSleep,
}

#[derive(Debug, Default)]
struct Log {
    calls: Vec<DesktopCall>,
    failing_moves: u32,
    failing_keep_awake: u32,
}

/// Records every capability call.
///
/// Clones share the same log, so a test can hand one clone to a loop running
/// on another thread and inspect the other afterwards.
#[derive(Debug, Clone, Default)]
pub struct RecordingDesktop {
    log: Arc<Mutex<Log>>,
    announce: bool,
}

impl RecordingDesktop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Variant used by `--dry-run`: also logs each call.
    pub fn announcing() -> Self {
        Self {
            announce: true,
            ..Self::default()
        }
    }

    /// Makes the next `count` pointer moves fail.
    pub fn fail_next_moves(&self, count: u32) {
        self.with_log(|log| log.failing_moves = count);
    }

    /// Makes the next `count` stay-awake assertions fail.
    pub fn fail_next_keep_awake(&self, count: u32) {
        self.with_log(|log| log.failing_keep_awake = count);
    }

    /// Snapshot of all calls so far, failed ones included.
    pub fn calls(&self) -> Vec<DesktopCall> {
        self.with_log(|log| log.calls.clone())
    }

    pub fn move_count(&self) -> usize {
        self.count(|c| matches!(c, DesktopCall::Move { .. }))
    }

    pub fn keep_awake_count(&self) -> usize {
        self.count(|c| *c == DesktopCall::KeepAwake)
    }

    pub fn allow_sleep_count(&self) -> usize {
        self.count(|c| *c == DesktopCall::AllowSleep)
    }

    fn count(&self, pred: impl Fn(&DesktopCall) -> bool) -> usize {
        self.with_log(|log| log.calls.iter().filter(|c| pred(*c)).count())
    }

    fn with_log<T>(&self, f: impl FnOnce(&mut Log) -> T) -> T {
        // A poisoned lock only means a test thread panicked mid-record.
        let mut log = match self.log.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        f(&mut *log)
    }
}

impl Desktop for RecordingDesktop {
    fn move_pointer(&mut self, dx: i32, dy: i32) -> Result<(), DesktopError> {
        if self.announce {
            tracing::info!(dx, dy, "[dry-run] Would move pointer");
        }
        self.with_log(|log| {
            log.calls.push(DesktopCall::Move { dx, dy });
            if log.failing_moves > 0 {
                log.failing_moves -= 1;
                return Err(DesktopError::Input("injected failure".to_string()));
            }
            Ok(())
        })
    }

    fn keep_awake(&mut self) -> Result<(), DesktopError> {
        if self.announce {
            tracing::debug!("[dry-run] Would assert stay-awake");
        }
        self.with_log(|log| {
            log.calls.push(DesktopCall::KeepAwake);
            if log.failing_keep_awake > 0 {
                log.failing_keep_awake -= 1;
                return Err(DesktopError::Power("injected failure".to_string()));
            }
            Ok(())
        })
    }

    fn allow_sleep(&mut self) -> Result<(), DesktopError> {
        if self.announce {
            tracing::info!("[dry-run] Would clear stay-awake");
        }
        self.with_log(|log| log.calls.push(DesktopCall::AllowSleep));
        Ok(())
    }
}
