//! Core library for composing, previewing and exporting employee business cards.

pub mod config;
mod card;
mod render;

pub use config::{AssetConfig, Config, FontConfig, RenderConfig};
pub use card::{
    CardSession, CompanyProfile, Directory, DirectoryError, EmployeeRecord, FLIP_DRAG_THRESHOLD,
    FieldVisibility, FlipController, FontClass, FrontFace, Icon, Language, LayoutError,
    LookupError, OptionalField, Orientation, Overrides, RenderableRow, RowKind, SUGGESTION_LIMIT,
    TextLine, TextMeasure, compose_front, compose_rows, compose_title_line, extract_id, fit_scale,
    format_mobile, normalize_id,
};
pub use card::layout;
pub use render::{
    ApproximateMeasure, CardAssets, CardFonts, ExportReceipt, RenderError, RenderOptions,
    advance_width, export_png, render_back, render_face, render_front,
};

use anyhow::{Context, Result};

/// Load the directory named by `config`, attaching path context to any error.
pub fn load_directory(config: &Config) -> Result<Directory> {
    Directory::load(&config.directory)
        .with_context(|| format!("failed to load directory {}", config.directory.display()))
}
