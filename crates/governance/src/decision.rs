// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Decisions: the outcome of one policy evaluation

use crate::patch::PatchOp;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Severity attached to a decision
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Info,
    Warning,
    Critical,
}

/// Outcome of one policy evaluation.
///
/// Created fresh on every evaluation and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    /// Policy name the decision belongs to
    pub name: String,
    pub passed: bool,
    /// Human-readable explanation
    pub reason: String,
    #[serde(default)]
    pub severity: Severity,
    #[serde(default)]
    pub metadata: Map<String, Value>,
    #[serde(default)]
    pub score: Option<f64>,
    /// Patches to apply to the plan when enforcement is patch-enabled
    #[serde(default)]
    pub patches: Vec<PatchOp>,
}

impl Decision {
    pub fn pass(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::new(name, true, reason)
    }

    pub fn fail(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::new(name, false, reason)
    }

    pub fn new(name: impl Into<String>, passed: bool, reason: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            passed,
            reason: reason.into(),
            severity: Severity::Info,
            metadata: Map::new(),
            score: None,
            patches: Vec::new(),
        }
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    pub fn with_metadata(mut self, metadata: Map<String, Value>) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn with_score(mut self, score: f64) -> Self {
        self.score = Some(score);
        self
    }

    pub fn with_patches(mut self, patches: Vec<PatchOp>) -> Self {
        self.patches = patches;
        self
    }
}

#[cfg(test)]
#[path = "decision_tests.rs"]
mod tests;
