// Host tooling crate: unwrap/expect/panic acceptable outside the compiler.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod commands;
mod input;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use compiler::SpeedMode;
use device::{Hertz, TimerId, PIC32MZ_EF};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "devcfg")]
#[command(about = "PIC32MZ EF configuration compiler", long_about = None)]
#[command(version)]
struct Cli {
    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Default DEVCFG words, `#pragma config` lines and clocks
    Defaults,
    /// Compile a JSON selection such as { "FPLLMULT": 50, "FNOSC": "SPLL" }
    Compile {
        /// Selection file
        selection: PathBuf,
        /// Leave fields with unencodable values erased instead of failing
        #[arg(long)]
        keep_erased: bool,
        /// Do not fill unselected settings with their defaults
        #[arg(long)]
        no_defaults: bool,
    },
    /// Plan a UART baud rate generator
    Baud {
        /// Target rate in bits per second
        #[arg(long)]
        target: u32,
        /// UART bus clock, e.g. 100M (default: PBCLK2 of the default configuration)
        #[arg(long, value_parser = input::parse_hertz)]
        clock: Option<Hertz>,
        /// Clocks per bit, 4 or 16 (default: whichever is more accurate)
        #[arg(long, value_parser = input::parse_speed)]
        speed: Option<SpeedMode>,
    },
    /// Plan a timer prescaler and period register
    Timer {
        /// Timer number, e.g. 2 or T2
        #[arg(long)]
        timer: TimerId,
        /// Target period in microseconds
        #[arg(long)]
        period_us: u64,
        /// Timer bus clock, e.g. 100M (default: PBCLK3 of the default configuration)
        #[arg(long, value_parser = input::parse_hertz)]
        clock: Option<Hertz>,
        /// Combine an even timer with its odd successor into a 32-bit timer
        #[arg(long)]
        combined: bool,
    },
    /// Port masks and PPS writes for a JSON pin list
    Pins {
        /// Pins file
        pins: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let device = &PIC32MZ_EF;
    tracing::debug!(device = device.name, "devcfg start");

    match cli.command {
        Commands::Defaults => commands::defaults(device, cli.json),
        Commands::Compile {
            selection,
            keep_erased,
            no_defaults,
        } => commands::compile(device, &selection, keep_erased, no_defaults, cli.json),
        Commands::Baud {
            target,
            clock,
            speed,
        } => commands::baud(device, target, clock, speed, cli.json),
        Commands::Timer {
            timer,
            period_us,
            clock,
            combined,
        } => commands::timer(device, timer, period_us, clock, combined, cli.json),
        Commands::Pins { pins } => commands::pins(device, &pins, cli.json),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_timer_subcommand() {
        let cli = Cli::try_parse_from([
            "devcfg", "--json", "timer", "--timer", "T4", "--period-us", "1000", "--combined",
        ])
        .unwrap();
        assert!(cli.json);
        match cli.command {
            Commands::Timer {
                timer,
                period_us,
                clock,
                combined,
            } => {
                assert_eq!(timer.number(), 4);
                assert_eq!(period_us, 1000);
                assert_eq!(clock, None);
                assert!(combined);
            }
            _ => panic!("expected timer subcommand"),
        }
    }

    #[test]
    fn rejects_bad_speed() {
        assert!(Cli::try_parse_from(["devcfg", "baud", "--target", "9600", "--speed", "8"]).is_err());
    }
}
