//! Form-key codec between generated edit forms and field patches.
//!
//! A form control is registered under `<path>__<disambiguator>`, e.g.
//! `style.color__3`. Submissions come back as flat key → value entries and
//! are decoded by splitting at the last `__`.

use serde_json::Value;
use stencil_tree::{FieldPath, FormField};
use tracing::debug;

use crate::patch::FieldPatch;

pub const FORM_KEY_SEPARATOR: &str = "__";

/// Form key for `field` under the given disambiguator
pub fn form_key(field: &FormField, disambiguator: &str) -> String {
    format!("{}{}{}", field.path, FORM_KEY_SEPARATOR, disambiguator)
}

/// Sequential disambiguators for the controls of one rendered form
#[derive(Debug, Clone, Default)]
pub struct FormKeys {
    count: u32,
}

impl FormKeys {
    pub fn new() -> Self {
        Self::default()
    }

    /// Key for the next control
    pub fn next_key(&mut self, field: &FormField) -> String {
        self.count += 1;
        form_key(field, &self.count.to_string())
    }

    /// Keys for all `fields`, in order
    pub fn assign(&mut self, fields: &[FormField]) -> Vec<(String, FormField)> {
        fields
            .iter()
            .map(|field| (self.next_key(field), field.clone()))
            .collect()
    }
}

/// Field path encoded in a form key
pub fn decode_form_key(key: &str) -> Option<FieldPath> {
    let path = match key.rsplit_once(FORM_KEY_SEPARATOR) {
        Some((path, _disambiguator)) => path,
        None => key,
    };
    path.parse().ok()
}

impl FieldPatch {
    /// Build a patch from submitted form entries. Undecodable keys are
    /// dropped; for repeated paths the later entry wins.
    pub fn from_form<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: AsRef<str>,
    {
        let mut patch = FieldPatch::new();
        for (key, value) in entries {
            match decode_form_key(key.as_ref()) {
                Some(path) => patch.insert(path, value),
                None => debug!(key = key.as_ref(), "dropping undecodable form key"),
            }
        }
        patch
    }
}
