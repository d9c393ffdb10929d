//! Rendering commands (`namecard render ...`).

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use namecard::{CardAssets, CardFonts, Orientation, RenderOptions, export_png, render_face};

use crate::cli::GlobalArgs;
use crate::cli::common::{CardArgs, FaceArg};
use crate::cli::utils::{load_context, resolve_png_target, select, suffixed};

/// Args for `namecard render`.
#[derive(Args, Debug)]
pub struct RenderArgs {
    #[command(flatten)]
    pub card: CardArgs,
    /// Output `.png` file or directory (file name derived from the employee).
    #[arg(short = 'o', long = "output", default_value = ".")]
    pub output: PathBuf,
    /// Face(s) to export.
    #[arg(long, default_value_t = FaceArg::Front, value_enum)]
    pub face: FaceArg,
    /// Output pixels per layout unit (overrides the config).
    #[arg(long = "pixel-ratio")]
    pub pixel_ratio: Option<u32>,
}

pub fn handle(global: &GlobalArgs, args: RenderArgs) -> Result<()> {
    let ctx = load_context(global)?;
    let mut session = select(&ctx.directory, &args.card.query)?;
    args.card.apply(&mut session);

    let fonts = CardFonts::load(&ctx.config.fonts).context("failed to load card fonts")?;
    let assets = CardAssets::load(&ctx.config.assets).context("failed to load card assets")?;
    let options = RenderOptions {
        pixel_ratio: args.pixel_ratio.unwrap_or(ctx.config.render.pixel_ratio),
    };
    let face = session
        .front_face(&ctx.config.company, &fonts)
        .context("no employee selected")?;

    let target = resolve_png_target(&args.output, &session.export_file_name())?;
    let orientations = args.face.orientations();
    for orientation in orientations.iter().copied() {
        let path = match (args.face, orientation) {
            (FaceArg::Both, Orientation::Back) => suffixed(&target, "back"),
            _ => target.clone(),
        };
        let image = render_face(orientation, &face, &fonts, &assets, &options)?;
        let receipt = export_png(&image, &path)
            .with_context(|| format!("failed to export {}", path.display()))?;
        println!(
            "Rendered {:?} face to {} ({} bytes, sha256 {})",
            orientation,
            receipt.path.display(),
            receipt.bytes,
            receipt.sha256
        );
    }
    Ok(())
}
