// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `gavel events` - publish a scenario's events through the bus

use crate::scenario::Scenario;
use anyhow::Result;
use clap::Args;
use gavel_core::{summarize, write_trace};
use std::path::PathBuf;

#[derive(Args)]
pub struct EventsArgs {
    /// Scenario file to run
    pub scenario: PathBuf,

    /// Write the recorded envelopes to this file as JSON
    #[arg(long)]
    pub trace: Option<PathBuf>,
}

pub fn events(args: EventsArgs) -> Result<()> {
    let scenario = Scenario::load(&args.scenario)?;
    let mut bus = scenario.build_bus()?;

    for step in &scenario.publish {
        match bus.publish(&step.event, step.payload.clone())? {
            Some(envelope) => println!(
                "{} seq={} redactions={}",
                envelope.event,
                envelope.sequence,
                envelope.redactions.len()
            ),
            None => println!("{} halted", step.event),
        }
    }

    println!("{}", summarize(bus.envelopes()).format());

    if let Some(path) = &args.trace {
        write_trace(bus.envelopes(), path)?;
        println!("trace written to {}", path.display());
    }
    Ok(())
}
