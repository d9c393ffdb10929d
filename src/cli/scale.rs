//! Viewport fitting (`namecard scale`).

use anyhow::Result;
use clap::Args;
use namecard::fit_scale;
use namecard::layout::{CARD_HEIGHT, CARD_WIDTH};

/// Arguments for `namecard scale`.
#[derive(Args, Debug)]
pub struct ScaleArgs {
    /// Viewport width.
    pub width: f32,
    /// Viewport height.
    pub height: f32,
}

pub fn handle(args: ScaleArgs) -> Result<()> {
    let scale = fit_scale(args.width, args.height, CARD_WIDTH, CARD_HEIGHT)?;
    println!(
        "{:.4} ({:.1} x {:.1})",
        scale,
        CARD_WIDTH * scale,
        CARD_HEIGHT * scale
    );
    Ok(())
}
