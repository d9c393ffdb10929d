//! Directory queries (`namecard lookup`, `namecard suggest`).

use anyhow::{Result, anyhow};
use clap::Args;
use namecard::{CardSession, SUGGESTION_LIMIT};

use crate::cli::GlobalArgs;
use crate::cli::utils::{load_context, print_record};

/// Arguments for `namecard lookup`.
#[derive(Args, Debug)]
pub struct LookupArgs {
    /// Employee id, with or without the leading `E`.
    pub query: String,
    /// Print the record as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `namecard suggest`.
#[derive(Args, Debug)]
pub struct SuggestArgs {
    /// Substring of an id, Chinese name or English name.
    #[arg(default_value = "")]
    pub query: String,
    /// Maximum number of suggestions.
    #[arg(long, default_value_t = SUGGESTION_LIMIT)]
    pub limit: usize,
}

pub fn lookup(global: &GlobalArgs, args: LookupArgs) -> Result<()> {
    let ctx = load_context(global)?;
    let mut session = CardSession::new();
    let record = session.search(&ctx.directory, &args.query)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(record)?);
    } else {
        print_record(record);
    }
    Ok(())
}

pub fn suggest(global: &GlobalArgs, args: SuggestArgs) -> Result<()> {
    let ctx = load_context(global)?;
    let mut session = CardSession::new();
    let matches = session.suggest(&ctx.directory, &args.query, args.limit);
    if let Some(message) = session.message() {
        return Err(anyhow!("{}", message));
    }
    for record in matches {
        println!("{}", record.display_line());
    }
    Ok(())
}
