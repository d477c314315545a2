//! # Node Model
//!
//! A document is an ordered list of root [`Node`]s. Each node carries a tag,
//! an attribute map and optional children.
//!
//! ## Wire shape
//!
//! Templates are stored as plain JSON where the variant of a value is implied
//! by its shape:
//!
//! ```text
//! attribute:  "str"              → Attribute::Text
//!             12                 → Attribute::Number
//!             { editable, .. }   → Attribute::Field
//!             { other keys }     → Attribute::Group
//!             true / null / [..] → Attribute::Opaque
//!
//! children:   [ {..}, {..} ]     → Children::Nodes
//!             "str"              → Children::Text
//!             { value, .. }      → Children::Field
//!             { other keys }     → Children::Node
//! ```
//!
//! The shape is classified once, at deserialization. In memory every value is
//! an explicit variant and serialization writes the same shapes back.
//! Opaque attributes are kept only so they survive a save; renderers and
//! forms never see them. Children of void elements are ignored the same way.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Number, Value};

use crate::error::{value_kind, ShapeError};

/// Tags that never carry children
pub const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "keygen", "link", "meta", "param",
    "source", "track", "wbr",
];

/// Attribute map of a node, keyed by attribute name
pub type Attributes = BTreeMap<String, Attribute>;

/// Symbolic element tag (`section`, `img`, `p`, ...)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementTag(String);

impl ElementTag {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Void tags (e.g. `img`) cannot hold children
    pub fn is_void(&self) -> bool {
        VOID_ELEMENTS.contains(&self.0.as_str())
    }
}

impl Default for ElementTag {
    fn default() -> Self {
        Self::new("div")
    }
}

impl fmt::Display for ElementTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A leaf value that may be surfaced in the generated edit form
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EditableField {
    #[serde(default)]
    pub value: Value,

    #[serde(default)]
    pub editable: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// Closed choice list; rendered as a selector instead of free text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,

    /// Input type hint for free-text controls (`text` when absent)
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub input_type: Option<String>,
}

impl EditableField {
    /// Editable field seeded with `value`
    pub fn editable(value: impl Into<Value>) -> Self {
        Self {
            value: value.into(),
            editable: true,
            ..Self::default()
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = Some(options.into_iter().map(Into::into).collect());
        self
    }

    /// Whether `value` is acceptable for this field's option list
    pub fn accepts(&self, value: &Value) -> bool {
        match &self.options {
            None => true,
            Some(options) => match value {
                Value::String(s) => options.iter().any(|o| o == s),
                other => options.iter().any(|o| *o == other.to_string()),
            },
        }
    }

    fn from_object(map: Map<String, Value>) -> Result<Self, ShapeError> {
        serde_json::from_value(Value::Object(map))
            .map_err(|e| ShapeError::InvalidField(e.to_string()))
    }
}

/// One entry of a node's attribute map
#[derive(Debug, Clone, PartialEq)]
pub enum Attribute {
    Text(String),
    Number(Number),
    Field(EditableField),
    /// Structured property such as `style`
    Group(Attributes),
    /// Boolean, null or array value, written back verbatim
    Opaque(Value),
}

impl Attribute {
    pub fn as_field(&self) -> Option<&EditableField> {
        match self {
            Attribute::Field(field) => Some(field),
            _ => None,
        }
    }

    pub fn as_group(&self) -> Option<&Attributes> {
        match self {
            Attribute::Group(group) => Some(group),
            _ => None,
        }
    }
}

impl TryFrom<Value> for Attribute {
    type Error = ShapeError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(s) => Ok(Attribute::Text(s)),
            Value::Number(n) => Ok(Attribute::Number(n)),
            // Presence of `editable` is the only thing separating a field from a group
            Value::Object(map) if map.contains_key("editable") => {
                EditableField::from_object(map).map(Attribute::Field)
            }
            Value::Object(map) => map
                .into_iter()
                .map(|(name, value)| Ok((name, Attribute::try_from(value)?)))
                .collect::<Result<Attributes, ShapeError>>()
                .map(Attribute::Group),
            other => Ok(Attribute::Opaque(other)),
        }
    }
}

impl From<&str> for Attribute {
    fn from(s: &str) -> Self {
        Attribute::Text(s.to_string())
    }
}

impl From<EditableField> for Attribute {
    fn from(field: EditableField) -> Self {
        Attribute::Field(field)
    }
}

impl From<Attributes> for Attribute {
    fn from(group: Attributes) -> Self {
        Attribute::Group(group)
    }
}

impl Serialize for Attribute {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Attribute::Text(s) => serializer.serialize_str(s),
            Attribute::Number(n) => n.serialize(serializer),
            Attribute::Field(field) => field.serialize(serializer),
            Attribute::Group(group) => group.serialize(serializer),
            Attribute::Opaque(value) => value.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Attribute {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Attribute::try_from(value).map_err(serde::de::Error::custom)
    }
}

/// Content of a node
#[derive(Debug, Clone, PartialEq)]
pub enum Children {
    /// Text content exposed as a form field
    Field(EditableField),
    Node(Box<Node>),
    Nodes(Vec<Node>),
    Text(String),
}

impl TryFrom<Value> for Children {
    type Error = ShapeError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Array(items) => items
                .into_iter()
                .map(|item| Ok(serde_json::from_value::<Node>(item)?))
                .collect::<Result<Vec<_>, ShapeError>>()
                .map(Children::Nodes),
            Value::String(s) => Ok(Children::Text(s)),
            Value::Object(map) if map.contains_key("value") => {
                EditableField::from_object(map).map(Children::Field)
            }
            Value::Object(map) => {
                let node = serde_json::from_value::<Node>(Value::Object(map))?;
                Ok(Children::Node(Box::new(node)))
            }
            other => Err(ShapeError::UnsupportedChildren(value_kind(&other))),
        }
    }
}

impl Serialize for Children {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Children::Field(field) => field.serialize(serializer),
            Children::Node(node) => node.serialize(serializer),
            Children::Nodes(nodes) => nodes.serialize(serializer),
            Children::Text(text) => serializer.serialize_str(text),
        }
    }
}

impl<'de> Deserialize<'de> for Children {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Children::try_from(value).map_err(serde::de::Error::custom)
    }
}

/// A single element of the document tree
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Node {
    /// Identifier, unique within one document
    #[serde(default)]
    pub key: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    #[serde(default)]
    pub element: ElementTag,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: Attributes,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Children>,
}

impl Node {
    pub fn new(key: impl Into<String>, element: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            element: ElementTag::new(element),
            ..Self::default()
        }
    }

    /// Decode a node from its JSON wire form (e.g. a drag-and-drop payload)
    pub fn from_json(json: &str) -> Result<Self, ShapeError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<Attribute>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn with_children(mut self, children: Children) -> Self {
        self.children = Some(children);
        self
    }

    pub fn with_child_nodes(self, nodes: Vec<Node>) -> Self {
        self.with_children(Children::Nodes(nodes))
    }

    pub fn is_void(&self) -> bool {
        self.element.is_void()
    }

    /// Children as seen by traversal and forms; always `None` for void tags
    pub fn content(&self) -> Option<&Children> {
        if self.is_void() {
            None
        } else {
            self.children.as_ref()
        }
    }

    pub fn content_mut(&mut self) -> Option<&mut Children> {
        if self.is_void() {
            None
        } else {
            self.children.as_mut()
        }
    }

    /// Child nodes, with a single child normalized to a one-element slice.
    /// Text and field children have no descendants.
    pub fn child_nodes(&self) -> &[Node] {
        match self.content() {
            Some(Children::Node(node)) => std::slice::from_ref(node.as_ref()),
            Some(Children::Nodes(nodes)) => nodes,
            _ => &[],
        }
    }

    pub fn child_nodes_mut(&mut self) -> &mut [Node] {
        match self.content_mut() {
            Some(Children::Node(node)) => std::slice::from_mut(node.as_mut()),
            Some(Children::Nodes(nodes)) => nodes.as_mut_slice(),
            _ => Default::default(),
        }
    }

    /// First node of this subtree, in pre-order, with a void tag and children
    pub fn find_void_with_children(&self) -> Option<&Node> {
        if self.is_void() && self.children.is_some() {
            return Some(self);
        }
        self.child_nodes().iter().find_map(Node::find_void_with_children)
    }

    /// Display name: label if set, otherwise the key
    pub fn display_name(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.key)
    }
}

/// Ordered list of root nodes; order is visual stacking order
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document {
    roots: Vec<Node>,
}

impl Document {
    pub fn new(roots: Vec<Node>) -> Self {
        Self { roots }
    }

    pub fn from_json(json: &str) -> Result<Self, ShapeError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn roots(&self) -> &[Node] {
        &self.roots
    }

    pub fn roots_mut(&mut self) -> &mut Vec<Node> {
        &mut self.roots
    }

    pub fn into_roots(self) -> Vec<Node> {
        self.roots
    }

    /// Root node by key (roots only, no descent)
    pub fn root(&self, key: &str) -> Option<&Node> {
        self.roots.iter().find(|node| node.key == key)
    }

    pub fn root_mut(&mut self, key: &str) -> Option<&mut Node> {
        self.roots.iter_mut().find(|node| node.key == key)
    }

    pub fn root_keys(&self) -> Vec<&str> {
        self.roots.iter().map(|node| node.key.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.roots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }
}

impl From<Vec<Node>> for Document {
    fn from(roots: Vec<Node>) -> Self {
        Self::new(roots)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_attribute_shapes_are_classified() {
        let node: Node = serde_json::from_value(json!({
            "key": "hero",
            "element": "section",
            "attributes": {
                "id": "hero",
                "width": 600,
                "title": { "value": "Welcome", "editable": true, "label": "Title" },
                "style": {
                    "color": { "value": "red", "editable": true, "options": ["red", "blue"] },
                    "margin": "0 auto"
                }
            }
        }))
        .unwrap();

        assert_eq!(node.attributes["id"], Attribute::Text("hero".to_string()));
        assert!(matches!(node.attributes["width"], Attribute::Number(_)));
        assert_eq!(
            node.attributes["title"].as_field().unwrap().label.as_deref(),
            Some("Title")
        );

        let style = node.attributes["style"].as_group().unwrap();
        assert!(style["color"].as_field().unwrap().editable);
        assert_eq!(style["margin"], Attribute::Text("0 auto".to_string()));
    }

    #[test]
    fn test_children_shapes_are_classified() {
        let text: Node = serde_json::from_value(json!({ "key": "a", "children": "hi" })).unwrap();
        assert_eq!(text.children, Some(Children::Text("hi".to_string())));

        let field: Node = serde_json::from_value(json!({
            "key": "b",
            "children": { "value": "Click", "editable": true }
        }))
        .unwrap();
        assert!(matches!(field.children, Some(Children::Field(_))));

        let single: Node = serde_json::from_value(json!({
            "key": "c",
            "children": { "key": "c.1", "element": "span" }
        }))
        .unwrap();
        assert_eq!(single.child_nodes().len(), 1);
        assert_eq!(single.child_nodes()[0].key, "c.1");

        let list: Node = serde_json::from_value(json!({
            "key": "d",
            "children": [{ "key": "d.1" }, { "key": "d.2" }]
        }))
        .unwrap();
        assert_eq!(list.child_nodes().len(), 2);
    }

    #[test]
    fn test_serialization_writes_wire_shape_back() {
        let source = json!({
            "key": "btn",
            "label": "Button",
            "element": "button",
            "attributes": {
                "style": { "padding": "8px", "color": { "value": "white", "editable": true } }
            },
            "children": { "value": "Buy now", "editable": true, "label": "Text" }
        });

        let node: Node = serde_json::from_value(source.clone()).unwrap();
        assert_eq!(serde_json::to_value(&node).unwrap(), source);
    }

    #[test]
    fn test_rejects_unsupported_children() {
        let result = Node::from_json(r#"{ "key": "x", "children": 42 }"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_boolean_and_null_attributes_are_kept_opaque() {
        let source = json!({
            "key": "send",
            "element": "button",
            "attributes": {
                "disabled": true,
                "alt": null,
                "style": { "hidden": false, "color": "red" }
            }
        });

        let node: Node = serde_json::from_value(source.clone()).unwrap();
        assert_eq!(node.attributes["disabled"], Attribute::Opaque(json!(true)));
        assert_eq!(node.attributes["alt"], Attribute::Opaque(Value::Null));
        assert!(node.attributes["disabled"].as_field().is_none());

        // Written back unchanged
        assert_eq!(serde_json::to_value(&node).unwrap(), source);
    }

    #[test]
    fn test_void_element_children_are_ignored() {
        let img = Node::from_json(
            r#"{ "key": "img", "element": "img", "children": [{ "key": "inner" }] }"#,
        )
        .unwrap();

        assert!(img.child_nodes().is_empty());
        assert!(img.content().is_none());
        assert_eq!(img.find_void_with_children().map(|n| n.key.as_str()), Some("img"));

        let wrapper = Node::new("wrap", "div").with_child_nodes(vec![Node::new("p", "p"), img]);
        assert_eq!(wrapper.child_nodes().len(), 2);
        assert_eq!(
            wrapper.find_void_with_children().map(|n| n.key.as_str()),
            Some("img")
        );
        assert!(Node::new("ok", "img").find_void_with_children().is_none());
    }

    #[test]
    fn test_missing_element_defaults_to_div() {
        let node = Node::from_json(r#"{ "key": "x" }"#).unwrap();
        assert_eq!(node.element.as_str(), "div");
        assert!(!node.is_void());
        assert!(Node::new("img", "img").is_void());
    }

    #[test]
    fn test_field_accepts_only_listed_options() {
        let field = EditableField::editable("left").with_options(["left", "center"]);
        assert!(field.accepts(&json!("center")));
        assert!(!field.accepts(&json!("right")));
        assert!(EditableField::editable("x").accepts(&json!("anything")));
    }

    #[test]
    fn test_document_is_a_bare_array() {
        let doc = Document::from_json(r#"[{ "key": "A" }, { "key": "B" }]"#).unwrap();
        assert_eq!(doc.root_keys(), vec!["A", "B"]);
        assert!(doc.root("B").is_some());
        assert!(doc.root("C").is_none());
    }
}
