// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Governor: evaluates inputs against registered policies

use crate::decision::Decision;
use crate::error::GovernanceError;
use crate::input::PolicyInput;
use crate::patch::apply_patches;
use crate::policy::Policy;
use gavel_core::Bus;
use serde_json::{json, Value};

/// Audit event recorded on the bus after every enforcement pass
pub const AUDIT_EVENT: &str = "governor.evaluated";

/// Schema for the audit event: exactly input/results/approved
fn audit_schema() -> Value {
    json!({
        "type": "object",
        "required": ["input", "results", "approved"],
        "properties": {
            "input": {"type": "object"},
            "results": {"type": "array"},
            "approved": {"type": "boolean"}
        },
        "additionalProperties": false
    })
}

/// Options for an enforcement pass
#[derive(Debug, Clone, Copy, Default)]
pub struct EnforceOptions {
    /// Apply policy-emitted patches to the plan between policies
    pub apply_patches: bool,
}

impl EnforceOptions {
    pub fn applying_patches() -> Self {
        Self {
            apply_patches: true,
        }
    }
}

/// Outcome of one enforcement pass
#[derive(Debug, Clone)]
pub struct Verdict {
    /// Logical AND of every decision's `passed` flag
    pub approved: bool,
    /// One decision per registered policy, in registration order
    pub decisions: Vec<Decision>,
    /// The input as the pass left it, including patched `plan`
    pub input: PolicyInput,
}

/// Evaluates inputs against a set of registered policies.
///
/// Policy evaluation order is registration order and is stable; patch
/// application is sequential, so later policies observe mutations made by
/// earlier ones within the same enforcement pass.
pub struct Governor {
    policies: Vec<Box<dyn Policy>>,
    bus: Bus,
}

impl Governor {
    /// Create a governor auditing onto the given bus.
    ///
    /// The `governor.evaluated` schema is registered on the bus as an
    /// ad hoc event.
    pub fn new(mut bus: Bus) -> Result<Self, GovernanceError> {
        bus.register_schema(AUDIT_EVENT, &audit_schema())?;
        Ok(Self {
            policies: Vec::new(),
            bus,
        })
    }

    /// Register a policy; evaluation order is registration order
    pub fn register<P>(&mut self, policy: P)
    where
        P: Policy + 'static,
    {
        self.policies.push(Box::new(policy));
    }

    /// Drop all registered policies
    pub fn clear_policies(&mut self) {
        self.policies.clear();
    }

    /// The audit bus, for reading back recorded envelopes
    pub fn bus(&self) -> &Bus {
        &self.bus
    }

    pub fn bus_mut(&mut self) -> &mut Bus {
        &mut self.bus
    }

    /// Run every policy against the input without mutating anything
    pub fn evaluate(&self, input: &PolicyInput) -> Vec<Decision> {
        self.policies
            .iter()
            .map(|policy| policy.evaluate(input))
            .collect()
    }

    /// Run every policy in order, optionally applying policy-emitted patches
    /// to the plan between policies, then record the audit event.
    ///
    /// `approved` is vacuously true when no policies are registered.
    pub fn enforce(
        &mut self,
        input: &PolicyInput,
        options: EnforceOptions,
    ) -> Result<Verdict, GovernanceError> {
        if !input.plan.is_object() {
            return Err(GovernanceError::PlanNotObject);
        }
        let mut working = input.clone();
        let mut decisions: Vec<Decision> = Vec::with_capacity(self.policies.len());
        for policy in &self.policies {
            let decision = policy.evaluate(&working);
            if options.apply_patches && !decision.patches.is_empty() {
                // Advance the plan before the next policy runs.
                working.plan = apply_patches(&working.plan, &decision.patches)?;
            }
            decisions.push(decision);
        }
        let approved = decisions.iter().all(|decision| decision.passed);
        tracing::info!(
            subject = %working.subject,
            approved,
            policies = decisions.len(),
            "governance enforcement complete"
        );

        let payload = json!({
            "input": serde_json::to_value(&working)?,
            "results": serde_json::to_value(&decisions)?,
            "approved": approved,
        });
        self.bus.publish(AUDIT_EVENT, payload)?;

        Ok(Verdict {
            approved,
            decisions,
            input: working,
        })
    }
}

#[cfg(test)]
#[path = "governor_tests.rs"]
mod tests;
