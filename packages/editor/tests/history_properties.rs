//! History properties over longer edit sequences
//!
//! This tests:
//! - Index tracks the newest snapshot after every push
//! - Undo followed by redo restores the same document
//! - A push after undo discards the redo branch
//! - Patches are idempotent and reorders are permutations

use serde_json::json;
use stencil_editor::{DocumentStore, EditOutcome, FieldPatch, SetOptions};
use stencil_tree::{Document, EditableField, FieldPath, Node};

fn doc(keys: &[&str]) -> Document {
    Document::new(keys.iter().map(|k| Node::new(*k, "div")).collect())
}

fn editable_root(key: &str) -> Node {
    Node::new(key, "p").with_attribute("title", EditableField::editable("v0"))
}

#[test]
fn test_index_follows_every_push() {
    let mut store = DocumentStore::new(doc(&[]));

    for i in 0..10 {
        let key = format!("n{}", i);
        store.insert_root_node(Node::new(key, "div"));
        let history = store.history();
        assert_eq!(history.current_index(), history.len() - 1);
    }

    let mut store = DocumentStore::new(doc(&["x"]));
    for keys in [&["a"][..], &["a", "b"][..], &["b"][..]] {
        store.set_document(doc(keys), SetOptions::default());
        assert_eq!(store.history().current_index(), store.history().len() - 1);
    }
}

#[test]
fn test_undo_then_redo_restores_document() {
    let mut store = DocumentStore::new(Document::new(vec![editable_root("A")]));
    let title = FieldPath::attribute(["title"]);

    for i in 1..=5 {
        let patch = FieldPatch::new().set(title.clone(), format!("v{}", i));
        store.apply_field_patch("A", "A", &patch);

        let pushed = store.document().clone();
        assert!(store.undo().is_applied());
        assert_ne!(store.document(), &pushed);
        assert!(store.redo().is_applied());
        assert_eq!(store.document(), &pushed);
    }

    assert_eq!(store.history().undo_levels(), 5);

    // Undo all
    for _ in 0..5 {
        assert!(store.undo().is_applied());
    }
    assert!(matches!(store.undo(), EditOutcome::Noop { .. }));
    assert_eq!(store.history().redo_levels(), 5);

    // Redo all
    for _ in 0..5 {
        assert!(store.redo().is_applied());
    }
    assert!(matches!(store.redo(), EditOutcome::Noop { .. }));
}

#[test]
fn test_push_after_undo_truncates() {
    let mut store = DocumentStore::new(doc(&["D0"]));
    store.set_document(doc(&["D1"]), SetOptions::default());
    store.set_document(doc(&["D2"]), SetOptions::default());
    assert_eq!(store.history().current_index(), 2);

    store.undo();
    store.undo();
    assert_eq!(store.history().current_index(), 0);

    store.set_document(doc(&["D3"]), SetOptions::default());

    assert_eq!(store.history().snapshots(), &[doc(&["D0"]), doc(&["D3"])]);
    assert_eq!(store.history().current_index(), 1);
    assert!(!store.can_redo());
}

#[test]
fn test_repeated_undo_reads_live_index() {
    let mut store = DocumentStore::new(doc(&["A"]));
    store.insert_root_node(Node::new("B", "div"));
    store.insert_root_node(Node::new("C", "div"));

    // Rapid repeated firing never overshoots the lower bound
    let applied = (0..10).filter(|_| store.undo().is_applied()).count();
    assert_eq!(applied, 2);
    assert_eq!(store.document(), &doc(&["A"]));
}

#[test]
fn test_patch_applied_twice_equals_once() {
    let patch = FieldPatch::new().set(FieldPath::attribute(["title"]), json!("final"));

    let mut once = DocumentStore::new(Document::new(vec![editable_root("A")]));
    once.apply_field_patch("A", "A", &patch);

    let mut twice = DocumentStore::new(Document::new(vec![editable_root("A")]));
    twice.apply_field_patch("A", "A", &patch);
    let second = twice.apply_field_patch("A", "A", &patch);

    assert!(matches!(second, EditOutcome::Noop { .. }));
    assert_eq!(once.document(), twice.document());
    assert_eq!(twice.history().len(), 2);
}

#[test]
fn test_reorder_preserves_root_multiset() {
    let mut store = DocumentStore::new(doc(&["A", "B", "C", "D"]));
    let orders: [&[&str]; 4] = [
        &["D", "C", "B", "A"],
        &["B", "A", "D", "C"],
        &["A", "A", "B", "C"],
        &["C", "D", "A", "B"],
    ];

    for order in orders {
        store.reorder_roots(order);

        let mut keys = store.document().root_keys();
        keys.sort_unstable();
        assert_eq!(keys, vec!["A", "B", "C", "D"]);
    }

    assert_eq!(store.document().root_keys(), vec!["C", "D", "A", "B"]);
}
