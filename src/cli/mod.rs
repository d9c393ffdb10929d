//! Command-line interface wiring for the `namecard` binary.
//!
//! This module owns the clap definitions and delegates execution to
//! specialized submodules that encapsulate each command family.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

pub mod common;
pub mod directory;
pub mod lookup;
pub mod preview;
pub mod render;
pub mod scale;
pub mod session;
pub mod utils;

/// Parsed CLI entrypoint for the `namecard` binary.
#[derive(Parser, Debug)]
#[command(
    name = "namecard",
    version,
    about = "Business card preview and PNG export for the employee directory"
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,
    /// Top-level command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Flags accepted by every command.
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Config file (defaults to ./namecard.toml when present).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// Employee directory JSON, overriding the config.
    #[arg(long, global = true)]
    pub directory: Option<PathBuf>,
    /// Enable debug logging.
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// High-level command families made available to end users.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Resolve an employee id exactly and print the record.
    Lookup(lookup::LookupArgs),
    /// List employees whose id or name contains the query.
    Suggest(lookup::SuggestArgs),
    /// Print the composed front-face layout.
    Preview(preview::PreviewArgs),
    /// Export card faces as PNG.
    Render(render::RenderArgs),
    /// Compute the fit-to-viewport scale factor.
    Scale(scale::ScaleArgs),
    /// Inspect the loaded employee directory.
    #[command(subcommand)]
    Directory(directory::DirectoryCommand),
    /// Interactive session driven by line commands on stdin.
    Session(session::SessionArgs),
}

/// Execute the requested command.
pub fn run(cli: Cli) -> Result<()> {
    let global = cli.global;
    match cli.command {
        Command::Lookup(args) => lookup::lookup(&global, args),
        Command::Suggest(args) => lookup::suggest(&global, args),
        Command::Preview(args) => preview::handle(&global, args),
        Command::Render(args) => render::handle(&global, args),
        Command::Scale(args) => scale::handle(args),
        Command::Directory(cmd) => directory::handle(&global, cmd),
        Command::Session(args) => session::handle(&global, args),
    }
}
