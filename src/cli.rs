//! Command line arguments.

use crate::config::ConfigFile;
use crate::jiggler::ActivityKind;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// `--activity-type` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ActivityArg {
    Mouse,
    Notepad,
}

impl From<ActivityArg> for ActivityKind {
    fn from(arg: ActivityArg) -> Self {
        match arg {
            ActivityArg::Mouse => ActivityKind::Mouse,
            ActivityArg::Notepad => ActivityKind::Notepad,
        }
    }
}

/// Nudge the mouse pointer now and then so the session never looks idle.
///
/// Values given here override the config file.
#[derive(Parser, Debug)]
#[command(name = "nudgemon", version, about)]
pub struct Cli {
    /// Path to a config file (TOML, or JSON with a `.json` extension).
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Minutes between pointer nudges [default: 4].
    #[arg(long, value_name = "MINUTES", allow_negative_numbers = true)]
    pub interval_minutes: Option<f64>,

    /// Largest per-axis displacement in pixels [default: 5].
    #[arg(long, value_name = "PIXELS", allow_negative_numbers = true)]
    pub max_offset: Option<i64>,

    /// Keep the system and display awake while running.
    #[arg(long, overrides_with = "no_prevent_sleep")]
    pub prevent_sleep: bool,

    /// Don't keep the system awake, even if the config file asks for it.
    #[arg(long, overrides_with = "prevent_sleep")]
    pub no_prevent_sleep: bool,

    /// Activity label shown in logs.
    #[arg(long, value_enum, value_name = "TYPE")]
    pub activity_type: Option<ActivityArg>,

    /// Verbose output.
    #[arg(long, short)]
    pub verbose: bool,

    /// Log what would be done without touching the pointer or power state.
    #[arg(long)]
    pub dry_run: bool,
}

impl Cli {
    /// The settings given on the command line, as a config layer.
    pub fn overrides(&self) -> ConfigFile {
        let prevent_sleep = if self.prevent_sleep {
            Some(true)
        } else if self.no_prevent_sleep {
            Some(false)
        } else {
            None
        };

        ConfigFile {
            interval_minutes: self.interval_minutes,
            max_offset: self.max_offset,
            prevent_sleep,
            activity_type: self.activity_type.map(ActivityKind::from),
            verbose: self.verbose.then_some(true),
        }
    }
}
