//! Layout preview (`namecard preview ...`).

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use crate::cli::GlobalArgs;
use crate::cli::common::CardArgs;
use crate::cli::utils::{describe_front, load_context, measurer, select, write_output};

/// Arguments for `namecard preview`.
#[derive(Args, Debug)]
pub struct PreviewArgs {
    #[command(flatten)]
    pub card: CardArgs,
    /// Emit the composed layout as JSON.
    #[arg(long)]
    pub json: bool,
    /// Output file (`-` for stdout).
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
}

pub fn handle(global: &GlobalArgs, args: PreviewArgs) -> Result<()> {
    let ctx = load_context(global)?;
    let mut session = select(&ctx.directory, &args.card.query)?;
    args.card.apply(&mut session);

    let measure = measurer(&ctx.config)?;
    let face = session
        .front_face(&ctx.config.company, measure.as_ref())
        .context("no employee selected")?;

    let output = if args.json {
        let mut json = serde_json::to_string_pretty(&face)?;
        json.push('\n');
        json
    } else {
        describe_front(&face)
    };
    match args.output {
        Some(path) => {
            write_output(&path, &output)?;
            if path.as_os_str() != "-" {
                println!("Wrote layout preview to {}", path.display());
            }
        }
        None => print!("{}", output),
    }
    Ok(())
}
