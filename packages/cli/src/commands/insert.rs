use super::{Session, TemplateArgs};
use anyhow::{Context, Result};
use clap::Args;
use std::path::{Path, PathBuf};
use stencil_tree::Node;

#[derive(Debug, Args)]
pub struct InsertArgs {
    #[command(flatten)]
    pub source: TemplateArgs,

    /// JSON file holding the node to append
    pub node: PathBuf,
}

pub fn insert(args: InsertArgs, cwd: &Path) -> Result<()> {
    let node_path = cwd.join(&args.node);
    let content = std::fs::read_to_string(&node_path)
        .with_context(|| format!("Cannot read {}", node_path.display()))?;
    let node = Node::from_json(&content)?;
    let key = node.key.clone();

    let mut session = Session::open(cwd, &args.source)?;
    let outcome = session.store.insert_root_node(node);
    session.commit(outcome, &format!("Inserted {:?}", key))
}
