//! bundle-activate: load a resolved package set's entry modules
//!
//! ## Commands
//!
//! - **require**: activate the selected groups against load-path directories
//! - **plan**: show which packages would be activated, and their candidates
//!
//! ## Example Usage
//!
//! ```bash
//! # Activate the default group
//! bundle-activate require --resolved resolved.json --load-path ./lib
//!
//! # Activate default + test, keep going past failures
//! bundle-activate require --resolved resolved.json --load-path ./lib \
//!     --group default --group test --collect-failures
//!
//! # Show the plan as JSON
//! bundle-activate --json plan --resolved resolved.json --group bar
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};

mod activate_cli;

use activate_cli::{plan::PlanCmd, require::RequireCmd};
use activate_core::ActivateConfig;

#[derive(Parser)]
#[command(
    name = "bundle-activate",
    author,
    version,
    about = "Activate a resolved package set",
    long_about = "Loads the entry modules of a resolved package set in resolver order,\n\
                  honoring group selection and per-package require overrides."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output as JSON instead of human-readable format
    #[arg(long, global = true)]
    json: bool,

    /// Verbose output (summaries and skipped packages)
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the entry modules of the selected packages
    Require(RequireCmd),

    /// Show the activation plan without loading anything
    Plan(PlanCmd),
}

fn main() -> Result<()> {
    let Cli {
        command,
        json,
        verbose,
    } = Cli::parse();
    let config = ActivateConfig::from_env();

    match command {
        Commands::Require(cmd) => cmd.execute(&config, json, verbose),
        Commands::Plan(cmd) => cmd.execute(&config, json),
    }
}
