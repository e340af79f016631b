// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the governance engine

use crate::patch::PatchError;
use gavel_core::{BusError, SchemaError};
use thiserror::Error;

/// Errors that can occur during enforcement.
///
/// Failing a policy is not an error; only structural problems in the
/// plumbing surface here.
#[derive(Debug, Error)]
pub enum GovernanceError {
    #[error("policy input plan must be a json object")]
    PlanNotObject,
    #[error(transparent)]
    Patch(#[from] PatchError),
    #[error("audit publish failed: {0}")]
    Audit(#[from] BusError),
    #[error("audit schema registration failed: {0}")]
    AuditSchema(#[from] SchemaError),
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}
