use super::{Session, TemplateArgs};
use anyhow::{anyhow, Result};
use clap::Args;
use serde_json::Value;
use std::path::Path;
use stencil_editor::FieldPatch;
use stencil_tree::FieldPath;

#[derive(Debug, Args)]
pub struct PatchArgs {
    #[command(flatten)]
    pub source: TemplateArgs,

    /// Key of the root node
    #[arg(short, long)]
    pub root: String,

    /// Key of the node inside the root (defaults to the root itself)
    #[arg(long)]
    pub target: Option<String>,

    /// Field assignment, e.g. `style.color=red` or `children=Hello`
    #[arg(short, long = "set", value_name = "PATH=VALUE", required = true)]
    pub assignments: Vec<String>,

    /// Parse values as JSON instead of plain text
    #[arg(long)]
    pub json: bool,
}

pub fn patch(args: PatchArgs, cwd: &Path) -> Result<()> {
    let patch = args
        .assignments
        .iter()
        .map(|assignment| parse_assignment(assignment, args.json))
        .collect::<Result<FieldPatch>>()?;

    let mut session = Session::open(cwd, &args.source)?;
    let target = args.target.as_deref().unwrap_or(&args.root);

    let outcome = session.store.apply_field_patch(&args.root, target, &patch);
    session.commit(outcome, &format!("Patched {} field(s) on {}", patch.len(), target))
}

fn parse_assignment(assignment: &str, json: bool) -> Result<(FieldPath, Value)> {
    let (path, raw) = assignment
        .split_once('=')
        .ok_or_else(|| anyhow!("Expected PATH=VALUE, got {:?}", assignment))?;

    let path: FieldPath = path.trim().parse()?;
    let value = if json {
        serde_json::from_str(raw)?
    } else {
        Value::String(raw.to_string())
    };

    Ok((path, value))
}
