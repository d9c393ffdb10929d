//! Rasterization of card faces and PNG export.

mod fonts;
mod paint;

pub use fonts::{ApproximateMeasure, CardFonts, advance_width};
pub use paint::{
    CardAssets, ExportReceipt, RenderError, RenderOptions, export_png, render_back, render_face,
    render_front,
};
