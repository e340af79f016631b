// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Declarative patch language for plan documents
//!
//! A patch is a `set`/`remove`/`merge` operation at a path of object keys
//! and array indices. Patches are applied against a deep copy of the plan;
//! the caller's structure is never mutated, and a failed patch leaves no
//! partial mutation visible.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Supported patch operations
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatchKind {
    #[default]
    Set,
    Remove,
    Merge,
}

/// One step in a patch path: an object key or an array index.
///
/// Negative indices resolve from the end of the array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    Index(i64),
    Key(String),
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        Self::Key(key.to_string())
    }
}

impl From<String> for PathSegment {
    fn from(key: String) -> Self {
        Self::Key(key)
    }
}

impl From<i64> for PathSegment {
    fn from(index: i64) -> Self {
        Self::Index(index)
    }
}

/// A declarative patch operation emitted by a policy decision
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatchOp {
    #[serde(default)]
    pub op: PatchKind,
    pub path: Vec<PathSegment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

impl PatchOp {
    pub fn set(path: Vec<PathSegment>, value: Value) -> Self {
        Self {
            op: PatchKind::Set,
            path,
            value: Some(value),
        }
    }

    pub fn remove(path: Vec<PathSegment>) -> Self {
        Self {
            op: PatchKind::Remove,
            path,
            value: None,
        }
    }

    pub fn merge(path: Vec<PathSegment>, value: Value) -> Self {
        Self {
            op: PatchKind::Merge,
            path,
            value: Some(value),
        }
    }
}

/// Errors raised while applying patches
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PatchError {
    #[error("patch operations require a non-empty path")]
    EmptyPath,
    #[error("expected an object at segment '{segment}'")]
    ExpectedObject { segment: String },
    #[error("expected an array at segment {index}")]
    ExpectedArray { index: i64 },
    #[error("missing key '{key}' in patch path")]
    MissingKey { key: String },
    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange { index: i64, len: usize },
    #[error("merge operations require an object target")]
    MergeTargetNotObject,
    #[error("merge values must be objects")]
    MergeValueNotObject,
}

/// Apply patches to a deep copy of `plan` and return the mutated copy
pub fn apply_patches(plan: &Value, patches: &[PatchOp]) -> Result<Value, PatchError> {
    let mut result = plan.clone();
    for patch in patches {
        apply_one(&mut result, patch)?;
    }
    Ok(result)
}

fn apply_one(root: &mut Value, patch: &PatchOp) -> Result<(), PatchError> {
    let Some((last, prefix)) = patch.path.split_last() else {
        return Err(PatchError::EmptyPath);
    };
    // Intermediate containers are created for set/merge, never for remove.
    let create = matches!(patch.op, PatchKind::Set | PatchKind::Merge);
    let mut current = root;
    for segment in prefix {
        current = step_into(current, segment, create)?;
    }
    match patch.op {
        PatchKind::Set => assign(current, last, patch.value.clone().unwrap_or(Value::Null)),
        PatchKind::Remove => remove(current, last),
        PatchKind::Merge => merge(current, last, patch.value.as_ref()),
    }
}

/// Resolve an index against a length, accepting negative offsets from the end
fn resolve_index(index: i64, len: usize) -> Option<usize> {
    let len = len as i64;
    let resolved = if index < 0 { len + index } else { index };
    if (0..len).contains(&resolved) {
        Some(resolved as usize)
    } else {
        None
    }
}

fn step_into<'a>(
    container: &'a mut Value,
    segment: &PathSegment,
    create: bool,
) -> Result<&'a mut Value, PatchError> {
    match segment {
        PathSegment::Key(key) => {
            let Value::Object(map) = container else {
                return Err(PatchError::ExpectedObject {
                    segment: key.clone(),
                });
            };
            if create {
                Ok(map
                    .entry(key.clone())
                    .or_insert_with(|| Value::Object(Map::new())))
            } else {
                map.get_mut(key)
                    .ok_or_else(|| PatchError::MissingKey { key: key.clone() })
            }
        }
        PathSegment::Index(index) => {
            let Value::Array(items) = container else {
                return Err(PatchError::ExpectedArray { index: *index });
            };
            if create && *index >= items.len() as i64 {
                while items.len() as i64 <= *index {
                    items.push(Value::Object(Map::new()));
                }
            }
            let len = items.len();
            let resolved =
                resolve_index(*index, len).ok_or(PatchError::IndexOutOfRange {
                    index: *index,
                    len,
                })?;
            match items.get_mut(resolved) {
                Some(child) => Ok(child),
                None => Err(PatchError::IndexOutOfRange {
                    index: *index,
                    len,
                }),
            }
        }
    }
}

fn assign(container: &mut Value, segment: &PathSegment, value: Value) -> Result<(), PatchError> {
    match segment {
        PathSegment::Key(key) => {
            let Value::Object(map) = container else {
                return Err(PatchError::ExpectedObject {
                    segment: key.clone(),
                });
            };
            map.insert(key.clone(), value);
            Ok(())
        }
        PathSegment::Index(index) => {
            let Value::Array(items) = container else {
                return Err(PatchError::ExpectedArray { index: *index });
            };
            let len = items.len();
            // An index equal to the current length appends.
            if *index == len as i64 {
                items.push(value);
                return Ok(());
            }
            let resolved =
                resolve_index(*index, len).ok_or(PatchError::IndexOutOfRange {
                    index: *index,
                    len,
                })?;
            items[resolved] = value;
            Ok(())
        }
    }
}

fn remove(container: &mut Value, segment: &PathSegment) -> Result<(), PatchError> {
    match segment {
        PathSegment::Key(key) => {
            let Value::Object(map) = container else {
                return Err(PatchError::ExpectedObject {
                    segment: key.clone(),
                });
            };
            // Removing an absent key is a no-op.
            map.remove(key);
            Ok(())
        }
        PathSegment::Index(index) => {
            let Value::Array(items) = container else {
                return Err(PatchError::ExpectedArray { index: *index });
            };
            let len = items.len();
            let resolved =
                resolve_index(*index, len).ok_or(PatchError::IndexOutOfRange {
                    index: *index,
                    len,
                })?;
            items.remove(resolved);
            Ok(())
        }
    }
}

fn merge(
    container: &mut Value,
    segment: &PathSegment,
    value: Option<&Value>,
) -> Result<(), PatchError> {
    let target = step_into(container, segment, true)?;
    let Value::Object(map) = target else {
        return Err(PatchError::MergeTargetNotObject);
    };
    let Some(value) = value else {
        return Ok(());
    };
    let Value::Object(additions) = value else {
        return Err(PatchError::MergeValueNotObject);
    };
    for (key, item) in additions {
        map.insert(key.clone(), item.clone());
    }
    Ok(())
}

#[cfg(test)]
#[path = "patch_tests.rs"]
mod tests;
