//! Directory inspection (`namecard directory ...`).

use anyhow::Result;
use clap::Subcommand;

use crate::cli::GlobalArgs;
use crate::cli::utils::load_context;

/// Directory subcommands.
#[derive(Subcommand, Debug)]
pub enum DirectoryCommand {
    /// Show record count and snapshot fingerprint.
    Info,
    /// Dump every record as JSON.
    Dump,
}

pub fn handle(global: &GlobalArgs, command: DirectoryCommand) -> Result<()> {
    let ctx = load_context(global)?;
    match command {
        DirectoryCommand::Info => {
            println!("Path: {}", ctx.config.directory.display());
            println!("Records: {}", ctx.directory.len());
            println!("SHA-256: {}", ctx.directory.fingerprint());
        }
        DirectoryCommand::Dump => {
            println!("{}", serde_json::to_string_pretty(ctx.directory.records())?);
        }
    }
    Ok(())
}
