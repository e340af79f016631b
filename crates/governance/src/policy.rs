// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Policies: named rules evaluating a `PolicyInput` into a `Decision`
//!
//! Policies are stateless with respect to the governor; configuration
//! (thresholds, limits) is fixed at construction. Each built-in policy
//! passes vacuously when its context is absent or incomplete.

use crate::decision::{Decision, Severity};
use crate::input::PolicyInput;
use serde_json::{json, Map, Value};

/// A named rule producing one decision per evaluation
pub trait Policy {
    fn name(&self) -> &str;
    fn description(&self) -> &str;
    fn evaluate(&self, input: &PolicyInput) -> Decision;
}

/// Wraps a plain closure into a policy
pub struct FnPolicy {
    name: String,
    description: String,
    check: Box<dyn Fn(&PolicyInput) -> Decision>,
}

impl FnPolicy {
    pub fn new<F>(name: impl Into<String>, description: impl Into<String>, check: F) -> Self
    where
        F: Fn(&PolicyInput) -> Decision + 'static,
    {
        Self {
            name: name.into(),
            description: description.into(),
            check: Box::new(check),
        }
    }
}

impl Policy for FnPolicy {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn evaluate(&self, input: &PolicyInput) -> Decision {
        (self.check)(input)
    }
}

/// Ensure expected spend stays within the configured budget
#[derive(Debug, Clone, Copy, Default)]
pub struct BudgetPolicy;

impl Policy for BudgetPolicy {
    fn name(&self) -> &str {
        "budget"
    }

    fn description(&self) -> &str {
        "Validate that expected spend does not exceed the available budget."
    }

    fn evaluate(&self, input: &PolicyInput) -> Decision {
        let Some(budget) = &input.budget else {
            return Decision::pass(self.name(), "No budget configuration provided");
        };
        let mut metadata = Map::new();
        metadata.insert("limit".to_string(), json!(budget.limit));
        metadata.insert("usage".to_string(), json!(budget.usage));
        metadata.insert("currency".to_string(), json!(budget.currency));

        let (Some(limit), Some(usage)) = (budget.limit, budget.usage) else {
            return Decision::pass(self.name(), "Budget data incomplete")
                .with_metadata(metadata);
        };
        let currency = &budget.currency;
        if usage <= limit {
            let reason = format!("{usage:.2} {currency} within {limit:.2} {currency} budget");
            return Decision::pass(self.name(), reason).with_metadata(metadata);
        }
        let excess = usage - limit;
        metadata.insert("excess".to_string(), json!(excess));
        let reason = format!(
            "{usage:.2} {currency} exceeds budget {limit:.2} {currency} by {excess:.2} {currency}"
        );
        Decision::fail(self.name(), reason)
            .with_severity(Severity::Critical)
            .with_metadata(metadata)
    }
}

/// Check flagged categories against the configured block list
#[derive(Debug, Clone, Copy, Default)]
pub struct SafetyPolicy;

impl Policy for SafetyPolicy {
    fn name(&self) -> &str {
        "safety"
    }

    fn description(&self) -> &str {
        "Ensure content moderation checks do not report blocked categories."
    }

    fn evaluate(&self, input: &PolicyInput) -> Decision {
        let Some(safety) = &input.safety else {
            return Decision::pass(self.name(), "No safety signals provided");
        };
        let mut blocked = safety.blocked_categories.clone();
        blocked.sort();
        blocked.dedup();
        let mut flagged = safety.flagged_categories.clone();
        flagged.sort();
        flagged.dedup();
        let violations: Vec<&String> =
            blocked.iter().filter(|c| flagged.contains(c)).collect();

        let mut metadata = Map::new();
        metadata.insert("blocked_categories".to_string(), json!(blocked));
        metadata.insert("flagged_categories".to_string(), json!(flagged));
        metadata.insert(
            "annotations".to_string(),
            Value::Object(safety.annotations.clone()),
        );

        if violations.is_empty() {
            return Decision::pass(self.name(), "No blocked categories flagged")
                .with_metadata(metadata);
        }
        let listed = violations
            .iter()
            .map(|s| s.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        metadata.insert("violations".to_string(), json!(violations));
        Decision::fail(self.name(), format!("Flagged blocked categories: {listed}"))
            .with_severity(Severity::Critical)
            .with_metadata(metadata)
    }
}

/// Require the risk score to remain under the acceptable threshold
#[derive(Debug, Clone, Copy, Default)]
pub struct RiskPolicy {
    /// Fallback threshold when the input's risk context has none
    pub max_score: Option<f64>,
}

impl RiskPolicy {
    pub fn with_max_score(max_score: f64) -> Self {
        Self {
            max_score: Some(max_score),
        }
    }
}

impl Policy for RiskPolicy {
    fn name(&self) -> &str {
        "risk"
    }

    fn description(&self) -> &str {
        "Require the risk score to remain under the configured threshold."
    }

    fn evaluate(&self, input: &PolicyInput) -> Decision {
        let risk = input.risk.as_ref();
        let score = risk.and_then(|r| r.score);
        let threshold = risk.and_then(|r| r.threshold).or(self.max_score);

        let mut metadata = Map::new();
        metadata.insert("score".to_string(), json!(score));
        metadata.insert("threshold".to_string(), json!(threshold));
        metadata.insert(
            "label".to_string(),
            json!(risk.and_then(|r| r.label.clone())),
        );

        let (Some(score), Some(threshold)) = (score, threshold) else {
            return Decision::pass(self.name(), "No risk constraints provided")
                .with_metadata(metadata);
        };
        if score <= threshold {
            let reason = format!("risk score {score:.2} within threshold {threshold:.2}");
            Decision::pass(self.name(), reason).with_metadata(metadata)
        } else {
            let reason = format!("risk score {score:.2} exceeds threshold {threshold:.2}");
            Decision::fail(self.name(), reason)
                .with_severity(Severity::Warning)
                .with_metadata(metadata)
        }
    }
}

/// Ensure observed latency stays within the SLO
#[derive(Debug, Clone, Copy, Default)]
pub struct LatencySloPolicy {
    /// Fallback SLO when the input's latency context has none
    pub slo_ms: Option<f64>,
}

impl LatencySloPolicy {
    pub fn with_slo_ms(slo_ms: f64) -> Self {
        Self {
            slo_ms: Some(slo_ms),
        }
    }
}

impl Policy for LatencySloPolicy {
    fn name(&self) -> &str {
        "latency_slo"
    }

    fn description(&self) -> &str {
        "Validate that observed latency does not exceed the SLO."
    }

    fn evaluate(&self, input: &PolicyInput) -> Decision {
        let latency = input.latency.as_ref();
        let observed = latency.and_then(|l| l.value_ms);
        let slo = latency.and_then(|l| l.slo_ms).or(self.slo_ms);

        let mut metadata = Map::new();
        metadata.insert("observed_ms".to_string(), json!(observed));
        metadata.insert("slo_ms".to_string(), json!(slo));
        metadata.insert(
            "window".to_string(),
            json!(latency.and_then(|l| l.window.clone())),
        );

        let (Some(observed), Some(slo)) = (observed, slo) else {
            return Decision::pass(self.name(), "Latency data unavailable")
                .with_metadata(metadata);
        };
        if observed <= slo {
            let reason = format!("latency {observed:.2}ms within SLO {slo:.2}ms");
            Decision::pass(self.name(), reason).with_metadata(metadata)
        } else {
            let reason = format!("latency {observed:.2}ms exceeds SLO {slo:.2}ms");
            Decision::fail(self.name(), reason)
                .with_severity(Severity::Warning)
                .with_metadata(metadata)
        }
    }
}

#[cfg(test)]
#[path = "policy_tests.rs"]
mod tests;
