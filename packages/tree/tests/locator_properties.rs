//! Locator behaviour over a generated tree
//!
//! Every key reachable by traversal is found, the found node carries that
//! key, and the index path leads back to the same node.

use stencil_tree::{locate, locate_path, Document, KeyCollector, Node, Visitor};

fn build(prefix: &str, depth: usize) -> Node {
    let node = Node::new(prefix, "div");
    if depth == 0 {
        return node;
    }
    node.with_child_nodes((0..3).map(|i| build(&format!("{}.{}", prefix, i), depth - 1)).collect())
}

fn follow<'a>(document: &'a Document, path: &[usize]) -> Option<&'a Node> {
    let (first, rest) = path.split_first()?;
    let mut node = document.roots().get(*first)?;
    for index in rest {
        node = node.child_nodes().get(*index)?;
    }
    Some(node)
}

#[test]
fn test_every_key_is_located() {
    let document = Document::new(vec![build("a", 3), build("b", 2), Node::new("c", "br")]);

    let mut collector = KeyCollector::default();
    collector.visit_document(&document);
    assert_eq!(collector.keys.len(), 40 + 13 + 1);

    for key in &collector.keys {
        let node = locate(&document, key).unwrap();
        assert_eq!(&node.key, key);

        let path = locate_path(&document, key).unwrap();
        assert_eq!(follow(&document, &path), Some(node));
    }
}

#[test]
fn test_absent_key_is_none_everywhere() {
    let document = Document::new(vec![build("a", 2)]);

    assert!(locate(&document, "a.3").is_none());
    assert!(locate_path(&document, "a.3").is_none());
    assert!(locate(&Document::default(), "a").is_none());
}
