//! # Tree Locator
//!
//! Depth-first, pre-order lookup of a node by key anywhere inside a document
//! fragment. The first match in document order wins; a miss is `None`.
//! Keys are expected to be unique per document, duplicates simply resolve to
//! the earliest occurrence.

use crate::node::{Document, Node};

/// Anything that can be searched: a node, a list of nodes, a document
pub trait Fragment {
    fn as_nodes(&self) -> &[Node];
    fn as_nodes_mut(&mut self) -> &mut [Node];
}

impl Fragment for Node {
    fn as_nodes(&self) -> &[Node] {
        std::slice::from_ref(self)
    }

    fn as_nodes_mut(&mut self) -> &mut [Node] {
        std::slice::from_mut(self)
    }
}

impl Fragment for [Node] {
    fn as_nodes(&self) -> &[Node] {
        self
    }

    fn as_nodes_mut(&mut self) -> &mut [Node] {
        self
    }
}

impl Fragment for Vec<Node> {
    fn as_nodes(&self) -> &[Node] {
        self
    }

    fn as_nodes_mut(&mut self) -> &mut [Node] {
        self
    }
}

impl Fragment for Document {
    fn as_nodes(&self) -> &[Node] {
        self.roots()
    }

    fn as_nodes_mut(&mut self) -> &mut [Node] {
        self.roots_mut()
    }
}

/// Find the first node whose key equals `key`
pub fn locate<'a, F: Fragment + ?Sized>(fragment: &'a F, key: &str) -> Option<&'a Node> {
    find_in(fragment.as_nodes(), key)
}

/// Mutable counterpart of [`locate`], same traversal order
pub fn locate_mut<'a, F: Fragment + ?Sized>(fragment: &'a mut F, key: &str) -> Option<&'a mut Node> {
    find_in_mut(fragment.as_nodes_mut(), key)
}

/// Index path to the first match: position in the fragment, then child positions
pub fn locate_path<F: Fragment + ?Sized>(fragment: &F, key: &str) -> Option<Vec<usize>> {
    let mut path = Vec::new();
    if path_in(fragment.as_nodes(), key, &mut path) {
        Some(path)
    } else {
        None
    }
}

fn find_in<'a>(nodes: &'a [Node], key: &str) -> Option<&'a Node> {
    for node in nodes {
        if node.key == key {
            return Some(node);
        }
        if let Some(found) = find_in(node.child_nodes(), key) {
            return Some(found);
        }
    }
    None
}

fn find_in_mut<'a>(nodes: &'a mut [Node], key: &str) -> Option<&'a mut Node> {
    for node in nodes.iter_mut() {
        if node.key == key {
            return Some(node);
        }
        if let Some(found) = find_in_mut(node.child_nodes_mut(), key) {
            return Some(found);
        }
    }
    None
}

fn path_in(nodes: &[Node], key: &str, path: &mut Vec<usize>) -> bool {
    for (index, node) in nodes.iter().enumerate() {
        path.push(index);
        if node.key == key || path_in(node.child_nodes(), key, path) {
            return true;
        }
        path.pop();
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Children;

    fn sample() -> Document {
        Document::new(vec![
            Node::new("A", "section").with_child_nodes(vec![
                Node::new("A.1", "p"),
                Node::new("A.2", "div").with_children(Children::Node(Box::new(Node::new("A.2.1", "img")))),
            ]),
            Node::new("B", "section").with_children(Children::Text("plain".to_string())),
        ])
    }

    #[test]
    fn test_locate_root_and_nested() {
        let doc = sample();

        assert_eq!(locate(&doc, "A").unwrap().key, "A");
        assert_eq!(locate(&doc, "A.1").unwrap().key, "A.1");
        assert_eq!(locate(&doc, "A.2.1").unwrap().element.as_str(), "img");
        assert_eq!(locate(&doc, "B").unwrap().key, "B");
    }

    #[test]
    fn test_locate_miss_is_none() {
        let doc = sample();
        assert!(locate(&doc, "missing").is_none());
        assert!(locate(&Vec::<Node>::new(), "A").is_none());
    }

    #[test]
    fn test_locate_within_single_node_fragment() {
        let doc = sample();
        let root = doc.root("A").unwrap();

        assert_eq!(locate(root, "A.2.1").unwrap().key, "A.2.1");
        assert!(locate(root, "B").is_none());
    }

    #[test]
    fn test_duplicate_keys_resolve_to_first_in_preorder() {
        let doc = Document::new(vec![
            Node::new("dup", "p").with_label("first"),
            Node::new("wrap", "div").with_child_nodes(vec![Node::new("dup", "p").with_label("second")]),
        ]);

        assert_eq!(locate(&doc, "dup").unwrap().label.as_deref(), Some("first"));

        let nested_first = Document::new(vec![
            Node::new("wrap", "div").with_child_nodes(vec![Node::new("dup", "p").with_label("deep")]),
            Node::new("dup", "p").with_label("later root"),
        ]);
        assert_eq!(locate(&nested_first, "dup").unwrap().label.as_deref(), Some("deep"));
    }

    #[test]
    fn test_locate_mut_edits_in_place() {
        let mut doc = sample();
        locate_mut(&mut doc, "A.2.1").unwrap().label = Some("Logo".to_string());

        assert_eq!(locate(&doc, "A.2.1").unwrap().label.as_deref(), Some("Logo"));
    }

    #[test]
    fn test_locate_path() {
        let doc = sample();
        assert_eq!(locate_path(&doc, "A"), Some(vec![0]));
        assert_eq!(locate_path(&doc, "A.2.1"), Some(vec![0, 1, 0]));
        assert_eq!(locate_path(&doc, "B"), Some(vec![1]));
        assert_eq!(locate_path(&doc, "nope"), None);
    }
}
