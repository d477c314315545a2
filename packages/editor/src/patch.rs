//! # Field Patches
//!
//! A patch maps field paths to new values for the editable fields of one
//! node.
//!
//! ## Semantics
//!
//! - Only fields flagged `editable` can be patched
//! - Each key is applied independently; a key naming no editable field is
//!   skipped and the rest of the patch still applies
//! - A value outside a field's `options` list is skipped
//! - Values replace atomically; applying the same patch twice is a no-op the
//!   second time

use std::collections::BTreeMap;

use serde_json::Value;
use stencil_tree::{field_at_mut, FieldPath, Node};
use tracing::debug;

/// New values for editable fields, keyed by path; later inserts win
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldPatch {
    entries: BTreeMap<FieldPath, Value>,
}

/// Why a patch entry was not applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchSkip {
    /// Path does not lead to a field
    NoSuchField,
    /// Field exists but is not editable
    NotEditable,
    /// Value is not one of the field's options
    OptionNotAllowed,
}

/// What applying a patch did to a node
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PatchReport {
    pub changed: Vec<FieldPath>,
    pub unchanged: Vec<FieldPath>,
    pub skipped: Vec<(FieldPath, PatchSkip)>,
}

impl PatchReport {
    pub fn has_changes(&self) -> bool {
        !self.changed.is_empty()
    }
}

impl FieldPatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn set(mut self, path: FieldPath, value: impl Into<Value>) -> Self {
        self.insert(path, value);
        self
    }

    pub fn insert(&mut self, path: FieldPath, value: impl Into<Value>) {
        self.entries.insert(path, value.into());
    }

    pub fn get(&self, path: &FieldPath) -> Option<&Value> {
        self.entries.get(path)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&FieldPath, &Value)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Apply every entry to `node`'s editable fields
    pub fn apply_to(&self, node: &mut Node) -> PatchReport {
        let mut report = PatchReport::default();
        let node_key = node.key.clone();

        for (path, value) in &self.entries {
            let Some(field) = field_at_mut(node, path) else {
                debug!(node = %node_key, path = %path, "patch key names no field");
                report.skipped.push((path.clone(), PatchSkip::NoSuchField));
                continue;
            };

            if !field.editable {
                debug!(node = %node_key, path = %path, "patch key names a locked field");
                report.skipped.push((path.clone(), PatchSkip::NotEditable));
                continue;
            }

            if !field.accepts(value) {
                debug!(node = %node_key, path = %path, %value, "value not among field options");
                report.skipped.push((path.clone(), PatchSkip::OptionNotAllowed));
                continue;
            }

            if field.value == *value {
                report.unchanged.push(path.clone());
            } else {
                field.value = value.clone();
                report.changed.push(path.clone());
            }
        }

        report
    }
}

impl FromIterator<(FieldPath, Value)> for FieldPatch {
    fn from_iter<T: IntoIterator<Item = (FieldPath, Value)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
