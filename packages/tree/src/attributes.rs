//! # Attribute Resolver
//!
//! Two views over a node's attribute map:
//!
//! - [`resolve_attributes`]: flattened props for a renderer, every editable
//!   field reduced to its bare value.
//! - [`editable_fields`]: the form controls to generate for a node, one per
//!   field flagged `editable`.

use std::fmt;
use std::str::FromStr;

use serde_json::{Map, Value};

use crate::error::ShapeError;
use crate::node::{Attribute, Attributes, Children, EditableField, Node};

/// Reserved path name addressing a node's text-content field
pub const CHILDREN_PATH: &str = "children";

/// Address of an editable field inside a node
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FieldPath {
    /// Attribute name followed by nested group names, e.g. `style.color`
    Attribute(Vec<String>),
    /// The node's text content
    Children,
}

impl FieldPath {
    pub fn attribute<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FieldPath::Attribute(segments.into_iter().map(Into::into).collect())
    }

    fn child(&self, segment: &str) -> Self {
        match self {
            FieldPath::Attribute(segments) => {
                let mut segments = segments.clone();
                segments.push(segment.to_string());
                FieldPath::Attribute(segments)
            }
            FieldPath::Children => FieldPath::Children,
        }
    }

    /// Whether the textual form parses back to this same path. Attribute
    /// names that are empty, contain `.`, or shadow `children` at the top
    /// level cannot be written as a form key.
    pub fn is_addressable(&self) -> bool {
        match self {
            FieldPath::Children => true,
            FieldPath::Attribute(segments) => {
                !segments.is_empty()
                    && segments.iter().all(|s| !s.is_empty() && !s.contains('.'))
                    && !(segments.len() == 1 && segments[0] == CHILDREN_PATH)
            }
        }
    }

    fn last_segment(&self) -> &str {
        match self {
            FieldPath::Attribute(segments) => segments.last().map(String::as_str).unwrap_or_default(),
            FieldPath::Children => CHILDREN_PATH,
        }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldPath::Attribute(segments) => f.write_str(&segments.join(".")),
            FieldPath::Children => f.write_str(CHILDREN_PATH),
        }
    }
}

impl FromStr for FieldPath {
    type Err = ShapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == CHILDREN_PATH {
            return Ok(FieldPath::Children);
        }

        let segments: Vec<String> = s.split('.').map(str::to_string).collect();
        if segments.iter().any(|segment| segment.is_empty()) {
            return Err(ShapeError::InvalidPath(s.to_string()));
        }

        Ok(FieldPath::Attribute(segments))
    }
}

/// Kind of form control a field renders as
#[derive(Debug, Clone, PartialEq)]
pub enum FormControl {
    /// Bounded choice
    Select { options: Vec<String> },
    /// Free text or typed input
    Input { input_type: String },
}

/// One generated form control
#[derive(Debug, Clone, PartialEq)]
pub struct FormField {
    pub path: FieldPath,
    pub label: String,
    pub value: Value,
    /// Nesting depth, for display grouping only
    pub depth: usize,
    pub control: FormControl,
}

impl FormField {
    fn from_field(path: FieldPath, field: &EditableField, depth: usize) -> Self {
        let control = match &field.options {
            Some(options) => FormControl::Select {
                options: options.clone(),
            },
            None => FormControl::Input {
                input_type: field.input_type.clone().unwrap_or_else(|| "text".to_string()),
            },
        };

        Self {
            label: field
                .label
                .clone()
                .unwrap_or_else(|| path.last_segment().to_string()),
            value: field.value.clone(),
            depth,
            control,
            path,
        }
    }
}

/// Flatten an attribute map into renderer props
pub fn resolve_attributes(attributes: &Attributes) -> Map<String, Value> {
    attributes
        .iter()
        .filter_map(|(name, attribute)| Some((name.clone(), resolve_attribute(attribute)?)))
        .collect()
}

fn resolve_attribute(attribute: &Attribute) -> Option<Value> {
    match attribute {
        Attribute::Text(s) => Some(Value::String(s.clone())),
        Attribute::Number(n) => Some(Value::Number(n.clone())),
        Attribute::Field(field) => Some(field.value.clone()),
        Attribute::Group(group) => Some(Value::Object(resolve_attributes(group))),
        Attribute::Opaque(_) => None,
    }
}

/// Form controls for every editable field of `node`: attributes first (in
/// key order, groups recursed), then the text-content field. Fields whose
/// path has no round-tripping textual form are left out.
pub fn editable_fields(node: &Node) -> Vec<FormField> {
    let mut fields = Vec::new();
    collect_fields(&node.attributes, &FieldPath::Attribute(Vec::new()), 0, &mut fields);

    if let Some(Children::Field(field)) = node.content() {
        if field.editable {
            fields.push(FormField::from_field(FieldPath::Children, field, 0));
        }
    }

    fields
}

fn collect_fields(attributes: &Attributes, prefix: &FieldPath, depth: usize, out: &mut Vec<FormField>) {
    for (name, attribute) in attributes {
        let path = prefix.child(name);
        match attribute {
            Attribute::Field(field) if field.editable && path.is_addressable() => {
                out.push(FormField::from_field(path, field, depth));
            }
            Attribute::Group(group) => collect_fields(group, &path, depth + 1, out),
            _ => {}
        }
    }
}

/// Field addressed by `path`, editable or not
pub fn field_at<'a>(node: &'a Node, path: &FieldPath) -> Option<&'a EditableField> {
    match path {
        FieldPath::Children => match node.content() {
            Some(Children::Field(field)) => Some(field),
            _ => None,
        },
        FieldPath::Attribute(segments) => {
            let (last, groups) = segments.split_last()?;
            let mut attributes = &node.attributes;
            for segment in groups {
                attributes = attributes.get(segment)?.as_group()?;
            }
            attributes.get(last)?.as_field()
        }
    }
}

pub fn field_at_mut<'a>(node: &'a mut Node, path: &FieldPath) -> Option<&'a mut EditableField> {
    match path {
        FieldPath::Children => match node.content_mut() {
            Some(Children::Field(field)) => Some(field),
            _ => None,
        },
        FieldPath::Attribute(segments) => {
            let (last, groups) = segments.split_last()?;
            let mut attributes = &mut node.attributes;
            for segment in groups {
                attributes = match attributes.get_mut(segment)? {
                    Attribute::Group(group) => group,
                    _ => return None,
                };
            }
            match attributes.get_mut(last)? {
                Attribute::Field(field) => Some(field),
                _ => None,
            }
        }
    }
}
