use criterion::{black_box, criterion_group, criterion_main, Criterion};
use stencil_tree::{editable_fields, locate, Document, EditableField, Node};

fn build_document(roots: usize, depth: usize, fanout: usize) -> Document {
    fn build(prefix: &str, depth: usize, fanout: usize) -> Node {
        let node = Node::new(prefix, "div")
            .with_attribute("title", EditableField::editable(prefix).with_label("Title"));
        if depth == 0 {
            return node;
        }
        let children = (0..fanout)
            .map(|i| build(&format!("{}.{}", prefix, i), depth - 1, fanout))
            .collect();
        node.with_child_nodes(children)
    }

    Document::new((0..roots).map(|i| build(&format!("r{}", i), depth, fanout)).collect())
}

fn locate_last_leaf(c: &mut Criterion) {
    let doc = build_document(8, 4, 4);

    c.bench_function("locate_last_leaf", |b| {
        b.iter(|| locate(black_box(&doc), black_box("r7.3.3.3.3")))
    });
}

fn locate_miss(c: &mut Criterion) {
    let doc = build_document(8, 4, 4);

    c.bench_function("locate_miss", |b| {
        b.iter(|| locate(black_box(&doc), black_box("absent")))
    });
}

fn collect_editable_fields(c: &mut Criterion) {
    let doc = build_document(1, 0, 0);
    let node = &doc.roots()[0];

    c.bench_function("collect_editable_fields", |b| {
        b.iter(|| editable_fields(black_box(node)))
    });
}

criterion_group!(benches, locate_last_leaf, locate_miss, collect_editable_fields);
criterion_main!(benches);
