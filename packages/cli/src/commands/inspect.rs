use super::{Session, TemplateArgs};
use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use std::path::Path;
use stencil_tree::{
    duplicate_keys, locate, locate_path, resolve_attributes, walk_node, Children, Document,
    EditableField, FieldPath, Node, Visitor,
};

#[derive(Debug, Args)]
pub struct InspectArgs {
    #[command(flatten)]
    pub source: TemplateArgs,

    /// Show the resolved attributes of this node instead of the outline
    #[arg(short, long)]
    pub key: Option<String>,
}

pub fn inspect(args: InspectArgs, cwd: &Path) -> Result<()> {
    let session = Session::open(cwd, &args.source)?;
    let document = session.store.document();

    match &args.key {
        Some(key) => print_node(document, key),
        None => {
            print_outline(&session, document);
            Ok(())
        }
    }
}

fn print_outline(session: &Session, document: &Document) {
    let title = session
        .store
        .template()
        .map(|meta| meta.title.as_str())
        .filter(|title| !title.is_empty())
        .unwrap_or("(untitled)");
    println!("{} {}", "📄".bright_blue(), title.bold());

    let mut outline = Outline::default();
    outline.visit_document(document);
    for line in outline.render() {
        println!("{}", line);
    }

    for key in duplicate_keys(document) {
        println!("{} Duplicate key {:?}", "⚠️".yellow(), key);
    }

    for node in document.roots().iter().filter_map(Node::find_void_with_children) {
        println!(
            "{} <{}> {:?} has children, they are ignored",
            "⚠️".yellow(),
            node.element,
            node.key
        );
    }
}

fn print_node(document: &Document, key: &str) -> Result<()> {
    let node = locate(document, key).ok_or_else(|| anyhow!("No node with key {:?}", key))?;
    let path = locate_path(document, key).unwrap_or_default();

    println!("{} <{}>", node.display_name().bold(), node.element);
    println!(
        "  path: {}",
        path.iter().map(usize::to_string).collect::<Vec<_>>().join(" › ")
    );

    let props = resolve_attributes(&node.attributes);
    println!("  attributes: {}", serde_json::to_string_pretty(&props)?);

    match node.content() {
        Some(Children::Text(text)) => println!("  text: {:?}", text),
        Some(Children::Field(field)) => println!("  text: {}", field.value),
        Some(Children::Node(_)) | Some(Children::Nodes(_)) => {
            println!("  children: {}", node.child_nodes().len())
        }
        None => {}
    }

    Ok(())
}

/// One line per node, indented by depth
#[derive(Debug, Default)]
struct Outline {
    rows: Vec<Row>,
}

#[derive(Debug)]
struct Row {
    depth: usize,
    name: String,
    key: String,
    element: String,
    void: bool,
    editable: usize,
}

impl Outline {
    fn render(&self) -> Vec<String> {
        self.rows
            .iter()
            .map(|row| {
                let mut line = format!(
                    "{}{} <{}{}>",
                    "  ".repeat(row.depth + 1),
                    row.name,
                    row.element,
                    if row.void { " /" } else { "" }
                );
                if row.name != row.key {
                    line.push_str(&format!(" [{}]", row.key).dimmed().to_string());
                }
                if row.editable > 0 {
                    line.push_str(&format!(" {} editable", row.editable).green().to_string());
                }
                line
            })
            .collect()
    }
}

impl Visitor for Outline {
    fn visit_node(&mut self, node: &Node, depth: usize) {
        self.rows.push(Row {
            depth,
            name: node.display_name().to_string(),
            key: node.key.clone(),
            element: node.element.to_string(),
            void: node.is_void(),
            editable: 0,
        });
        walk_node(self, node, depth);
    }

    fn visit_field(&mut self, node: &Node, _path: &FieldPath, field: &EditableField) {
        if !field.editable {
            return;
        }
        if let Some(row) = self.rows.iter_mut().rev().find(|row| row.key == node.key) {
            row.editable += 1;
        }
    }
}
