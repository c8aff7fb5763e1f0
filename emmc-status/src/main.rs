// SPDX-License-Identifier: GPL-3.0-only

//! Report and check the status of the platform eMMC device

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use emmc_contracts::EmmcHal;
use emmc_snapshot::SnapshotHal;
use serde::Serialize;
use tracing_subscriber::{EnvFilter, fmt};

mod report;

use report::{CheckReport, render_check, render_device, render_health};

#[derive(Parser)]
#[command(name = "emmc-status")]
#[command(about = "Report the status of the platform eMMC device", long_about = None)]
#[command(version)]
struct Cli {
    /// Snapshot to serve; defaults to $EMMC_HAL_SNAPSHOT, then /etc/emmc-hal/snapshot.toml
    #[arg(long, global = true)]
    snapshot: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show identity and capacity of the device
    Device,
    /// Show health and diagnostics of the device
    Health,
    /// Derive events; exits non-zero on a failure or health warning
    Check,
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn run(cli: Cli) -> Result<ExitCode> {
    let hal = SnapshotHal::open(cli.snapshot.as_deref())?;
    let hal: &dyn EmmcHal = &hal;

    match cli.command {
        Commands::Device => {
            let device = hal.get_device_info()?;
            if cli.json {
                print_json(&device)?;
            } else {
                print!("{}", render_device(&device));
            }
        }
        Commands::Health => {
            let health = hal.get_health_info()?;
            if cli.json {
                print_json(&health)?;
            } else {
                print!("{}", render_health(&health));
            }
        }
        Commands::Check => {
            let report = CheckReport::evaluate(hal.get_device_info()?, hal.get_health_info()?);
            for event in &report.events {
                tracing::debug!("event {:?}: {}", event.event_type, event.description);
            }

            if cli.json {
                print_json(&report)?;
            } else {
                print!("{}", render_check(&report));
            }

            if report.is_failing() {
                return Ok(ExitCode::FAILURE);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn main() -> Result<ExitCode> {
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("emmc_status=info,warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    run(Cli::parse())
}
