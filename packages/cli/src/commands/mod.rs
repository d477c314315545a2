pub mod fields;
pub mod init;
pub mod insert;
pub mod inspect;
pub mod patch;
pub mod reorder;

pub use fields::{fields, FieldsArgs};
pub use init::{init, InitArgs};
pub use insert::{insert, InsertArgs};
pub use inspect::{inspect, InspectArgs};
pub use patch::{patch, PatchArgs};
pub use reorder::{reorder, ReorderArgs};

use crate::config::Config;
use anyhow::{anyhow, Context, Result};
use clap::Args;
use colored::Colorize;
use std::path::{Path, PathBuf};
use stencil_editor::{DocumentStore, EditOutcome, Template};
use tracing::debug;

#[derive(Debug, Args)]
pub struct TemplateArgs {
    /// Template file (defaults to the one named in the config)
    #[arg(short, long)]
    pub template: Option<PathBuf>,
}

/// A template file opened in a document store
pub struct Session {
    pub path: PathBuf,
    pub store: DocumentStore,
}

impl Session {
    pub fn open(cwd: &Path, args: &TemplateArgs) -> Result<Self> {
        let config = Config::load(cwd)?;
        let path = config.template_path(cwd, args.template.as_deref());

        let template = Template::load(&path)
            .with_context(|| format!("Cannot open template {}", path.display()))?;
        debug!(path = %path.display(), roots = template.data.len(), "opened template");

        Ok(Self {
            store: DocumentStore::from_template(template, &config.editor),
            path,
        })
    }

    pub fn save(&self) -> Result<()> {
        self.store.to_template().save(&self.path)?;
        Ok(())
    }

    /// Save if `outcome` changed the document, report it either way
    pub fn commit(&self, outcome: EditOutcome, action: &str) -> Result<()> {
        match outcome {
            EditOutcome::Applied { .. } => {
                self.save()?;
                println!("  {} {}", "✓".green(), action);
                println!("  {} Saved {}", "✓".green(), self.path.display());
                Ok(())
            }
            EditOutcome::Noop { reason } => {
                println!("{} Nothing changed: {}", "⚠️".yellow(), reason);
                Ok(())
            }
            EditOutcome::Rejected { reason } => Err(anyhow!("{} rejected: {}", action, reason)),
        }
    }
}
