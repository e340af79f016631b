// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! gavel - scenario runner for the event bus and governance engine

mod commands;
mod scenario;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{events, govern, schema};

#[derive(Parser)]
#[command(
    name = "gavel",
    version,
    about = "Deterministic event bus and governance runner"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Publish a scenario's events through the bus
    Events(events::EventsArgs),
    /// Enforce a scenario's policies against its input
    Govern(govern::GovernArgs),
    /// List the events a scenario registers
    Schema(schema::SchemaArgs),
}

fn main() -> Result<()> {
    setup_logging();
    let cli = Cli::parse();
    match cli.command {
        Commands::Events(args) => events::events(args),
        Commands::Govern(args) => govern::govern(args),
        Commands::Schema(args) => schema::schema(args),
    }
}

fn setup_logging() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
