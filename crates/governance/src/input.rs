// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Input payload evaluated by governance policies

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Budget information for a policy evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetContext {
    /// Maximum permitted spend in the selected currency
    pub limit: Option<f64>,
    /// Expected spend for the current request or stage
    pub usage: Option<f64>,
    /// Currency code for the figures (ISO 4217 preferred)
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_currency() -> String {
    "usd".to_string()
}

/// Signals emitted by safety classifiers or heuristic filters
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SafetyContext {
    /// Categories disallowed for the current workflow
    #[serde(default)]
    pub blocked_categories: Vec<String>,
    /// Categories flagged by upstream moderation
    #[serde(default)]
    pub flagged_categories: Vec<String>,
    /// Raw annotations from the moderation system
    #[serde(default)]
    pub annotations: Map<String, Value>,
}

/// Structured risk metrics from a scoring component
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RiskContext {
    pub score: Option<f64>,
    /// Maximum acceptable score
    pub threshold: Option<f64>,
    /// Optional textual descriptor
    pub label: Option<String>,
}

/// Latency measurements from observability systems
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LatencyContext {
    /// Observed or projected latency in milliseconds
    pub value_ms: Option<f64>,
    /// Latency SLO in milliseconds
    pub slo_ms: Option<f64>,
    /// Window or quantile for the measurement
    pub window: Option<String>,
}

/// The subject under evaluation.
///
/// `plan` is the only field patches may mutate; everything else is read-only
/// signal for the policies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyInput {
    pub subject: String,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub metadata: Map<String, Value>,
    /// Plan document policies may remediate via patches
    #[serde(default = "empty_object")]
    pub plan: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<BudgetContext>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub safety: Option<SafetyContext>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk: Option<RiskContext>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latency: Option<LatencyContext>,
}

fn empty_object() -> Value {
    Value::Object(Map::new())
}

impl PolicyInput {
    pub fn new(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            score: None,
            metadata: Map::new(),
            plan: empty_object(),
            budget: None,
            safety: None,
            risk: None,
            latency: None,
        }
    }

    pub fn with_score(mut self, score: f64) -> Self {
        self.score = Some(score);
        self
    }

    pub fn with_metadata(mut self, metadata: Map<String, Value>) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn with_plan(mut self, plan: Value) -> Self {
        self.plan = plan;
        self
    }

    pub fn with_budget(mut self, budget: BudgetContext) -> Self {
        self.budget = Some(budget);
        self
    }

    pub fn with_safety(mut self, safety: SafetyContext) -> Self {
        self.safety = Some(safety);
        self
    }

    pub fn with_risk(mut self, risk: RiskContext) -> Self {
        self.risk = Some(risk);
        self
    }

    pub fn with_latency(mut self, latency: LatencyContext) -> Self {
        self.latency = Some(latency);
        self
    }
}

#[cfg(test)]
#[path = "input_tests.rs"]
mod tests;
