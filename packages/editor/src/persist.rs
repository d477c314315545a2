//! # Template Persistence
//!
//! Two on-disk forms, both plain JSON:
//!
//! - [`Template`]: the record a templates API stores (metadata + document)
//! - [`PersistedState`]: what survives between editing sessions, i.e. the
//!   current document and selection. History is not part of it;
//!   a restored session starts with a single snapshot.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use stencil_tree::Document;

use crate::store::Selection;
use crate::EditorError;

/// Template metadata, everything but the document itself
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TemplateMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,

    #[serde(default)]
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creator: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A stored template
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Template {
    #[serde(flatten)]
    pub meta: TemplateMeta,

    /// `null` and a missing field both read as an empty document
    #[serde(default, deserialize_with = "nullable_document")]
    pub data: Document,
}

fn nullable_document<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Document, D::Error> {
    Ok(Option::<Document>::deserialize(deserializer)?.unwrap_or_default())
}

impl Template {
    pub fn new(title: impl Into<String>, data: Document) -> Self {
        Self {
            meta: TemplateMeta {
                title: title.into(),
                ..TemplateMeta::default()
            },
            data,
        }
    }

    pub fn from_json(json: &str) -> Result<Self, EditorError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self, EditorError> {
        let content = std::fs::read_to_string(path).map_err(|e| EditorError::io(path, e))?;
        Self::from_json(&content)
    }

    pub fn save(&self, path: &Path) -> Result<(), EditorError> {
        write_json(path, self)
    }
}

/// Session state kept across restarts
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PersistedState {
    #[serde(default)]
    pub data: Document,

    #[serde(
        rename = "editableComponentKeysData",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub selection: Option<Selection>,
}

impl PersistedState {
    pub fn load(path: &Path) -> Result<Self, EditorError> {
        let content = std::fs::read_to_string(path).map_err(|e| EditorError::io(path, e))?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self, path: &Path) -> Result<(), EditorError> {
        write_json(path, self)
    }
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), EditorError> {
    let json = serde_json::to_string_pretty(value)?;
    std::fs::write(path, json).map_err(|e| EditorError::io(path, e))
}
