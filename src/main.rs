//! nudgemon - keeps the session from going idle.

use clap::Parser;
use nudgemon::cli::Cli;
use nudgemon::desktop::{system_desktop, Desktop, RecordingDesktop};
use nudgemon::jiggler::{Jiggler, JigglerConfig, RunSummary, StopToken};
use nudgemon::logging::{self, LogHandle};
use nudgemon::{config, NudgeError};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    let log = logging::init(cli.verbose);

    match run(&cli, &log) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Startup failed");
            eprintln!("nudgemon: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli, log: &LogHandle) -> Result<(), NudgeError> {
    let config = config::load(cli.config.as_deref(), cli.overrides())?;
    log.set_verbose(config.verbose);
    let mut jiggler = Jiggler::new(config)?;

    let mut desktop: Box<dyn Desktop> = if cli.dry_run {
        Box::new(RecordingDesktop::announcing())
    } else {
        system_desktop()?
    };

    let stop = StopToken::new();
    let stop_signal = stop.clone();
    ctrlc::set_handler(move || {
        println!("\n🛑 Stop requested, finishing current tick...");
        stop_signal.request_stop();
    })?;

    print_banner(jiggler.config(), cli.dry_run);

    let summary = jiggler.run(&mut desktop, &stop);

    print_summary(&summary);
    Ok(())
}

fn print_banner(config: &JigglerConfig, dry_run: bool) {
    println!("╔════════════════════════════════════════════════════════════╗");
    println!("║              nudgemon - Presence Keeper                    ║");
    println!("╚════════════════════════════════════════════════════════════╝");
    println!();
    for line in config.to_string().lines() {
        println!("   {line}");
    }
    if dry_run {
        println!("   Dry run: no input or power calls will be made.");
    }
    println!();
    println!("Press Ctrl+C to exit");
    println!();
}

fn print_summary(summary: &RunSummary) {
    println!();
    println!("════════════════════════════════════════════════════════════════");
    println!("📊 Run Summary");
    println!("════════════════════════════════════════════════════════════════");
    println!(
        "   Started:       {}",
        summary.started_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    println!("   Ran For:       {}s", summary.elapsed.as_secs());
    println!("   Ticks:         {}", summary.ticks);
    println!("   Moves:         {}", summary.moves);
    if summary.failed_moves > 0 {
        println!("   Failed Moves:  {}", summary.failed_moves);
    }
    if summary.failed_keep_awake > 0 {
        println!("   Failed Awake:  {}", summary.failed_keep_awake);
    }
    println!("════════════════════════════════════════════════════════════════");
    println!("\n👋 nudgemon has exited. Goodbye!");
}
