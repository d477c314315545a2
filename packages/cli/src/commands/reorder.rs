use super::{Session, TemplateArgs};
use anyhow::Result;
use clap::Args;
use std::path::Path;

#[derive(Debug, Args)]
pub struct ReorderArgs {
    #[command(flatten)]
    pub source: TemplateArgs,

    /// Every root key, in the new order
    #[arg(required = true)]
    pub keys: Vec<String>,
}

pub fn reorder(args: ReorderArgs, cwd: &Path) -> Result<()> {
    let mut session = Session::open(cwd, &args.source)?;
    let outcome = session.store.reorder_roots(&args.keys);
    session.commit(outcome, &format!("Reordered roots: {}", args.keys.join(", ")))
}
