mod commands;
mod config;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{
    fields, init, insert, inspect, patch, reorder, FieldsArgs, InitArgs, InsertArgs, InspectArgs,
    PatchArgs, ReorderArgs,
};
use tracing_subscriber::EnvFilter;

/// Stencil CLI - inspect and edit component-tree templates
#[derive(Parser, Debug)]
#[command(name = "stencil")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log editor internals (same as RUST_LOG=debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create an example template and config
    Init(InitArgs),

    /// Print the node outline of a template
    Inspect(InspectArgs),

    /// List the editable fields of a node
    Fields(FieldsArgs),

    /// Set editable fields on a node
    Patch(PatchArgs),

    /// Append a root node from a JSON file
    Insert(InsertArgs),

    /// Reorder the root nodes
    Reorder(ReorderArgs),
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;

    match cli.command {
        Command::Init(args) => init(args, &cwd),
        Command::Inspect(args) => inspect(args, &cwd),
        Command::Fields(args) => fields(args, &cwd),
        Command::Patch(args) => patch(args, &cwd),
        Command::Insert(args) => insert(args, &cwd),
        Command::Reorder(args) => reorder(args, &cwd),
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(cli) {
        eprintln!();
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
