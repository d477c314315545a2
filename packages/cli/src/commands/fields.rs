use super::{Session, TemplateArgs};
use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use std::path::Path;
use stencil_editor::FormKeys;
use stencil_tree::FormControl;

#[derive(Debug, Args)]
pub struct FieldsArgs {
    #[command(flatten)]
    pub source: TemplateArgs,

    /// Key of the root node
    #[arg(short, long)]
    pub root: String,

    /// Key of the node inside the root (defaults to the root itself)
    #[arg(long)]
    pub target: Option<String>,
}

pub fn fields(args: FieldsArgs, cwd: &Path) -> Result<()> {
    let mut session = Session::open(cwd, &args.source)?;
    let target = args.target.as_deref().unwrap_or(&args.root);

    session.store.select_node(args.root.as_str(), target);
    let node = session
        .store
        .selected_node()
        .ok_or_else(|| anyhow!("No node {:?} under root {:?}", target, args.root))?;

    println!("{} <{}>", node.display_name().bold(), node.element);

    let fields = session.store.selected_fields();
    if fields.is_empty() {
        println!("{}", "  No editable fields".yellow());
        return Ok(());
    }

    for (key, field) in FormKeys::new().assign(&fields) {
        let control = match &field.control {
            FormControl::Select { options } => format!("select [{}]", options.join(", ")),
            FormControl::Input { input_type } => input_type.clone(),
        };
        println!(
            "{}{} = {}  {}",
            "  ".repeat(field.depth + 1),
            field.label.bright_white(),
            field.value,
            format!("({}, {})", key, control).dimmed()
        );
    }

    Ok(())
}
