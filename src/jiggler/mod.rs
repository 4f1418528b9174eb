//! The jiggler loop.
//!
//! Each tick samples a small random offset, moves the pointer by it, and
//! re-asserts the stay-awake hint when enabled. Between ticks the loop waits
//! on a [`StopToken`]; a stop request is honoured at the next tick boundary.

pub mod offset;
pub mod stop;

pub use offset::*;
pub use stop::*;

use crate::desktop::Desktop;
use crate::error::{ConfigError, DesktopError};
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{Duration, Instant};

/// Largest accepted `max_offset`, in pixels.
pub const MAX_OFFSET_LIMIT: u32 = 50;

/// Activity label. Only shows up in logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    #[default]
    Mouse,
    Notepad,
}

impl fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActivityKind::Mouse => write!(f, "mouse"),
            ActivityKind::Notepad => write!(f, "notepad"),
        }
    }
}

/// Validated loop settings.
#[derive(Debug, Clone, PartialEq)]
pub struct JigglerConfig {
    /// Time between ticks.
    pub interval: Duration,
    /// Per-axis bound on the pointer displacement.
    pub max_offset: u32,
    /// Whether to hold the stay-awake hint while running.
    pub prevent_sleep: bool,
    /// Label attached to the start-up log line.
    pub activity: ActivityKind,
    /// Surface per-tick failures as warnings instead of debug logs.
    pub verbose: bool,
}

impl Default for JigglerConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(4 * 60),
            max_offset: 5,
            prevent_sleep: false,
            activity: ActivityKind::Mouse,
            verbose: false,
        }
    }
}

impl JigglerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.interval.is_zero() {
            return Err(ConfigError::ZeroInterval);
        }
        if self.max_offset == 0 || self.max_offset > MAX_OFFSET_LIMIT {
            return Err(ConfigError::InvalidMaxOffset {
                value: i64::from(self.max_offset),
                max: MAX_OFFSET_LIMIT,
            });
        }
        Ok(())
    }
}

impl fmt::Display for JigglerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Activity: {}.\n\
            Interval: {}s.\n\
            Max offset: {}px.\n\
            Prevent sleep: {}.",
            self.activity,
            self.interval.as_secs_f64(),
            self.max_offset,
            if self.prevent_sleep { "yes" } else { "no" },
        )
    }
}

/// Loop lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JigglerState {
    Running,
    Stopped,
}

/// Result of a single tick.
#[derive(Debug, Clone, PartialEq)]
pub struct TickOutcome {
    pub offset: Offset,
    pub moved: Result<(), DesktopError>,
    /// `None` when stay-awake is disabled.
    pub kept_awake: Option<Result<(), DesktopError>>,
}

/// What a finished run did.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub started_at: DateTime<Utc>,
    pub elapsed: Duration,
    pub ticks: u64,
    pub moves: u64,
    pub failed_moves: u64,
    pub failed_keep_awake: u64,
}

impl RunSummary {
    fn new() -> Self {
        Self {
            started_at: Utc::now(),
            elapsed: Duration::ZERO,
            ticks: 0,
            moves: 0,
            failed_moves: 0,
            failed_keep_awake: 0,
        }
    }

    fn record(&mut self, outcome: &TickOutcome) {
        self.ticks += 1;
        match outcome.moved {
            Ok(()) => self.moves += 1,
            Err(_) => self.failed_moves += 1,
        }
        if let Some(Err(_)) = outcome.kept_awake {
            self.failed_keep_awake += 1;
        }
    }
}

/// Drives the tick loop against a [`Desktop`].
pub struct Jiggler {
    config: JigglerConfig,
    rng: StdRng,
    state: JigglerState,
}

impl Jiggler {
    /// Validates `config` and returns a jiggler in the `Running` state.
    pub fn new(config: JigglerConfig) -> Result<Self, ConfigError> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Like [`Jiggler::new`] with a fixed seed, for reproducible offsets.
    pub fn with_seed(config: JigglerConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: JigglerConfig, rng: StdRng) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            rng,
            state: JigglerState::Running,
        })
    }

    pub fn config(&self) -> &JigglerConfig {
        &self.config
    }

    pub fn state(&self) -> JigglerState {
        self.state
    }

    /// Performs one tick: sample, move, refresh stay-awake.
    ///
    /// Never fails; capability errors are logged and returned in the outcome.
    pub fn tick<D: Desktop + ?Sized>(&mut self, desktop: &mut D) -> TickOutcome {
        let offset = sample_offset(&mut self.rng, self.config.max_offset);

        let moved = desktop.move_pointer(offset.dx, offset.dy);
        match &moved {
            Ok(()) => tracing::debug!(dx = offset.dx, dy = offset.dy, "Moved pointer"),
            Err(e) => self.report_failure(e),
        }

        let kept_awake = self.config.prevent_sleep.then(|| {
            let result = desktop.keep_awake();
            if let Err(e) = &result {
                self.report_failure(e);
            }
            result
        });

        TickOutcome {
            offset,
            moved,
            kept_awake,
        }
    }

    /// Runs ticks until `stop` is triggered, then releases stay-awake.
    ///
    /// The first tick happens immediately. A stop requested mid-tick takes
    /// effect once that tick has finished.
    pub fn run<D: Desktop + ?Sized>(&mut self, desktop: &mut D, stop: &StopToken) -> RunSummary {
        let mut summary = RunSummary::new();
        let started = Instant::now();

        tracing::info!(
            activity = %self.config.activity,
            interval_secs = self.config.interval.as_secs_f64(),
            max_offset = self.config.max_offset,
            prevent_sleep = self.config.prevent_sleep,
            "Jiggler loop started"
        );

        while self.state == JigglerState::Running {
            if stop.is_stopped() {
                self.state = JigglerState::Stopped;
                break;
            }

            let outcome = self.tick(&mut *desktop);
            summary.record(&outcome);

            if stop.wait(self.config.interval) {
                self.state = JigglerState::Stopped;
            }
        }

        if self.config.prevent_sleep {
            match desktop.allow_sleep() {
                Ok(()) => tracing::debug!("Stay-awake hint cleared"),
                Err(e) => tracing::warn!(error = %e, "Failed to clear stay-awake hint"),
            }
        }

        summary.elapsed = started.elapsed();
        tracing::info!(
            ticks = summary.ticks,
            failed_moves = summary.failed_moves,
            "Jiggler loop stopped"
        );
        summary
    }

    fn report_failure(&self, error: &DesktopError) {
        if self.config.verbose {
            tracing::warn!(error = %error, "Tick step failed, retrying next tick");
        } else {
            tracing::debug!(error = %error, "Tick step failed, retrying next tick");
        }
    }
}
