// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `gavel govern` - enforce a scenario's policies against its input

use crate::scenario::Scenario;
use anyhow::{anyhow, Result};
use clap::Args;
use gavel_core::write_trace;
use gavel_governance::EnforceOptions;
use std::path::PathBuf;

#[derive(Args)]
pub struct GovernArgs {
    /// Scenario file to run
    pub scenario: PathBuf,

    /// Apply policy-emitted patches to the plan between policies
    #[arg(long)]
    pub apply_patches: bool,

    /// Write the audit envelopes to this file as JSON
    #[arg(long)]
    pub trace: Option<PathBuf>,
}

pub fn govern(args: GovernArgs) -> Result<()> {
    let scenario = Scenario::load(&args.scenario)?;
    let mut governor = scenario.build_governor()?;
    let input = scenario
        .input
        .clone()
        .ok_or_else(|| anyhow!("scenario has no [input] section"))?;

    let verdict = governor.enforce(
        &input,
        EnforceOptions {
            apply_patches: args.apply_patches,
        },
    )?;

    for decision in &verdict.decisions {
        let status = if decision.passed { "PASS" } else { "FAIL" };
        println!("  {}: {} - {}", decision.name, status, decision.reason);
    }
    println!("approved: {}", verdict.approved);
    if args.apply_patches {
        println!("plan: {}", serde_json::to_string(&verdict.input.plan)?);
    }

    if let Some(path) = &args.trace {
        write_trace(governor.bus().envelopes(), path)?;
        println!("trace written to {}", path.display());
    }
    Ok(())
}
