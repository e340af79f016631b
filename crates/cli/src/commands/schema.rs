// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `gavel schema` - list the events a scenario registers

use crate::scenario::Scenario;
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

#[derive(Args)]
pub struct SchemaArgs {
    /// Scenario file to inspect
    pub scenario: PathBuf,
}

pub fn schema(args: SchemaArgs) -> Result<()> {
    let scenario = Scenario::load(&args.scenario)?;
    let bus = scenario.build_bus()?;
    for event in bus.known_events() {
        println!("{event}");
    }
    Ok(())
}
