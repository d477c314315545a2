use crate::attributes::FieldPath;
use crate::node::{Attribute, Attributes, Children, Document, EditableField, Node};

/// Visitor pattern for traversing document trees immutably
///
/// Default implementations walk the entire tree in document (pre-)order.
/// Override specific visit_* methods to act on particular nodes.
pub trait Visitor: Sized {
    fn visit_document(&mut self, doc: &Document) {
        walk_document(self, doc);
    }

    fn visit_node(&mut self, node: &Node, depth: usize) {
        walk_node(self, node, depth);
    }

    fn visit_field(&mut self, _node: &Node, _path: &FieldPath, _field: &EditableField) {
        // Leaf, nothing to walk
    }
}

pub fn walk_document<V: Visitor>(visitor: &mut V, doc: &Document) {
    for root in doc.roots() {
        visitor.visit_node(root, 0);
    }
}

pub fn walk_node<V: Visitor>(visitor: &mut V, node: &Node, depth: usize) {
    walk_attributes(visitor, node, &node.attributes, &mut Vec::new());

    match node.content() {
        Some(Children::Field(field)) => visitor.visit_field(node, &FieldPath::Children, field),
        Some(Children::Node(child)) => visitor.visit_node(child, depth + 1),
        Some(Children::Nodes(children)) => {
            for child in children {
                visitor.visit_node(child, depth + 1);
            }
        }
        Some(Children::Text(_)) | None => {}
    }
}

fn walk_attributes<V: Visitor>(
    visitor: &mut V,
    node: &Node,
    attributes: &Attributes,
    prefix: &mut Vec<String>,
) {
    for (name, attribute) in attributes {
        prefix.push(name.clone());
        match attribute {
            Attribute::Field(field) => {
                visitor.visit_field(node, &FieldPath::Attribute(prefix.clone()), field);
            }
            Attribute::Group(group) => walk_attributes(visitor, node, group, prefix),
            Attribute::Text(_) | Attribute::Number(_) | Attribute::Opaque(_) => {}
        }
        prefix.pop();
    }
}

/// Collects every node key in document order
#[derive(Debug, Default)]
pub struct KeyCollector {
    pub keys: Vec<String>,
}

impl Visitor for KeyCollector {
    fn visit_node(&mut self, node: &Node, depth: usize) {
        self.keys.push(node.key.clone());
        walk_node(self, node, depth);
    }
}

/// Keys that occur more than once in `doc`, each reported once
pub fn duplicate_keys(doc: &Document) -> Vec<String> {
    let mut collector = KeyCollector::default();
    collector.visit_document(doc);

    let mut seen = std::collections::HashSet::new();
    let mut duplicates = Vec::new();
    for key in collector.keys {
        if !seen.insert(key.clone()) && !duplicates.contains(&key) {
            duplicates.push(key);
        }
    }
    duplicates
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FieldCounter {
        editable: usize,
        locked: usize,
        max_depth: usize,
    }

    impl Visitor for FieldCounter {
        fn visit_node(&mut self, node: &Node, depth: usize) {
            self.max_depth = self.max_depth.max(depth);
            walk_node(self, node, depth);
        }

        fn visit_field(&mut self, _node: &Node, _path: &FieldPath, field: &EditableField) {
            if field.editable {
                self.editable += 1;
            } else {
                self.locked += 1;
            }
        }
    }

    #[test]
    fn test_visitor_reaches_nested_fields() {
        let doc = Document::from_json(
            r#"[{
                "key": "A",
                "attributes": { "style": { "color": { "value": "red", "editable": true } } },
                "children": [
                    { "key": "A.1", "children": { "value": "Hi", "editable": true } },
                    { "key": "A.2", "attributes": { "alt": { "value": "x", "editable": false } } }
                ]
            }]"#,
        )
        .unwrap();

        let mut counter = FieldCounter {
            editable: 0,
            locked: 0,
            max_depth: 0,
        };
        counter.visit_document(&doc);

        assert_eq!(counter.editable, 2);
        assert_eq!(counter.locked, 1);
        assert_eq!(counter.max_depth, 1);
    }

    #[test]
    fn test_key_collection_and_duplicates() {
        let doc = Document::from_json(
            r#"[
                { "key": "A", "children": [{ "key": "x" }, { "key": "y" }] },
                { "key": "B", "children": { "key": "x" } }
            ]"#,
        )
        .unwrap();

        let mut collector = KeyCollector::default();
        collector.visit_document(&doc);
        assert_eq!(collector.keys, vec!["A", "x", "y", "B", "x"]);

        assert_eq!(duplicate_keys(&doc), vec!["x".to_string()]);
    }
}
