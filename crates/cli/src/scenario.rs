// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scenario files: TOML descriptions of a bus and governance run
//!
//! A scenario carries the event schemas, redaction rules, publish steps,
//! policy thresholds, and governance input for one invocation.

use anyhow::{Context, Result};
use gavel_core::{Bus, RedactionMiddleware};
use gavel_governance::{
    Decision, FnPolicy, Governor, LatencySloPolicy, PolicyInput, RiskPolicy,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

/// One publish step in a scenario
#[derive(Debug, Clone, Deserialize)]
pub struct PublishStep {
    pub event: String,
    pub payload: Value,
}

/// Thresholds the govern command turns into policies
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PolicyThresholds {
    /// Fail when `metadata.max_drawdown` exceeds this cap
    pub max_drawdown: Option<f64>,
    /// Fail when the input score falls below this floor
    pub min_return: Option<f64>,
    /// Fail when the risk score exceeds this threshold
    pub risk_threshold: Option<f64>,
    /// Fail when observed latency exceeds this SLO
    pub latency_slo_ms: Option<f64>,
}

/// A parsed scenario file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Scenario {
    /// Event name → JSON schema
    #[serde(default)]
    pub events: BTreeMap<String, Value>,
    /// Event name (or "*") → dotted paths to mask
    #[serde(default)]
    pub redact: HashMap<String, Vec<String>>,
    #[serde(default)]
    pub publish: Vec<PublishStep>,
    #[serde(default)]
    pub policies: PolicyThresholds,
    pub input: Option<PolicyInput>,
}

impl Scenario {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read scenario {}", path.display()))?;
        toml::from_str(&text)
            .with_context(|| format!("failed to parse scenario {}", path.display()))
    }

    /// Build a bus carrying the scenario's schemas and redaction rules
    pub fn build_bus(&self) -> Result<Bus> {
        let mut bus = Bus::from_document(&json!({"events": self.events}))?;
        if !self.redact.is_empty() {
            bus.use_middleware(RedactionMiddleware::new(self.redact.clone()));
        }
        Ok(bus)
    }

    /// Build a governor over the scenario's bus with policies derived from
    /// the configured thresholds
    pub fn build_governor(&self) -> Result<Governor> {
        let mut governor = Governor::new(self.build_bus()?)?;
        if let Some(cap) = self.policies.max_drawdown {
            governor.register(FnPolicy::new(
                "max_drawdown",
                "Protect against excessive drawdown",
                move |input: &PolicyInput| {
                    let drawdown = input
                        .metadata
                        .get("max_drawdown")
                        .and_then(Value::as_f64)
                        .unwrap_or(0.0);
                    if drawdown <= cap {
                        Decision::pass("max_drawdown", format!("drawdown {drawdown:.2} within cap {cap:.2}"))
                    } else {
                        Decision::fail("max_drawdown", format!("drawdown {drawdown:.2} exceeds cap {cap:.2}"))
                    }
                },
            ));
        }
        if let Some(floor) = self.policies.min_return {
            governor.register(FnPolicy::new(
                "min_return",
                "Require a minimum return",
                move |input: &PolicyInput| {
                    let score = input.score.unwrap_or(0.0);
                    if score >= floor {
                        Decision::pass("min_return", format!("return {score:.2} meets floor {floor:.2}"))
                    } else {
                        Decision::fail("min_return", format!("return {score:.2} below floor {floor:.2}"))
                    }
                },
            ));
        }
        if let Some(threshold) = self.policies.risk_threshold {
            governor.register(RiskPolicy::with_max_score(threshold));
        }
        if let Some(slo) = self.policies.latency_slo_ms {
            governor.register(LatencySloPolicy::with_slo_ms(slo));
        }
        Ok(governor)
    }
}

#[cfg(test)]
#[path = "scenario_tests.rs"]
mod tests;
