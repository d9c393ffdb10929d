use std::collections::HashMap;
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::imageops::{FilterType, overlay, resize};
use image::{DynamicImage, ImageBuffer, ImageFormat, Rgba, RgbaImage};
use imageproc::drawing::{
    draw_filled_circle_mut, draw_filled_rect_mut, draw_hollow_rect_mut, draw_text_mut,
};
use imageproc::rect::Rect;
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::config::AssetConfig;
use crate::card::compose::{FrontFace, RenderableRow};
use crate::card::flip::Orientation;
use crate::card::layout::{Anchor, CARD_HEIGHT, CARD_WIDTH, FontClass, ICON_SIZE, Icon};
use crate::card::title::{TextLine, TextMeasure};
use crate::render::fonts::{CardFonts, advance_width, em_scale};

const MAX_PIXEL_RATIO: u32 = 8;
const ELLIPSIS: char = '…';
const ALL_ICONS: [Icon; 6] = [
    Icon::Mobile,
    Icon::Phone,
    Icon::Map,
    Icon::Email,
    Icon::Vat,
    Icon::Line,
];

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("no latin font configured; set [fonts] latin in the config file")]
    MissingFont,
    #[error("invalid font data in {0}")]
    InvalidFont(String),
    #[error("failed to load asset {path}: {source}")]
    Asset {
        path: String,
        #[source]
        source: image::ImageError,
    },
    #[error("failed to encode image: {0}")]
    Encode(#[from] image::ImageError),
    #[error("i/o error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Options controlling PNG generation.
#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    /// Output pixels per layout unit, clamped to `1..=8`.
    pub pixel_ratio: u32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { pixel_ratio: 2 }
    }
}

impl RenderOptions {
    fn ratio(&self) -> f32 {
        self.pixel_ratio.clamp(1, MAX_PIXEL_RATIO) as f32
    }

    /// Canvas size in pixels.
    pub fn canvas_size(&self) -> (u32, u32) {
        let r = self.ratio();
        ((CARD_WIDTH * r).round() as u32, (CARD_HEIGHT * r).round() as u32)
    }
}

struct Palette {
    card_bg: Rgba<u8>,
    back_bg: Rgba<u8>,
    accent: Rgba<u8>,
    text: Rgba<u8>,
    border: Rgba<u8>,
    icon: Rgba<u8>,
}

const PALETTE: Palette = Palette {
    card_bg: Rgba([0xfb, 0xfc, 0xfe, 0xff]),
    back_bg: Rgba([0x20, 0x4a, 0x74, 0xff]),
    accent: Rgba([0x6e, 0xa0, 0xf8, 0xff]),
    text: Rgba([0x23, 0x23, 0x23, 0xff]),
    border: Rgba([0xb5, 0xd3, 0xf7, 0xff]),
    icon: Rgba([0x20, 0x4a, 0x74, 0xff]),
};

/// Pre-loaded raster assets. Anything missing is drawn from the palette instead.
#[derive(Debug, Clone, Default)]
pub struct CardAssets {
    background: Option<RgbaImage>,
    back: Option<RgbaImage>,
    icons: HashMap<Icon, RgbaImage>,
}

impl CardAssets {
    /// Load every configured asset. Icons absent from `icons_dir` are skipped.
    pub fn load(config: &AssetConfig) -> Result<Self, RenderError> {
        let background = config.background.as_deref().map(load_asset).transpose()?;
        let back = config.back.as_deref().map(load_asset).transpose()?;
        let mut icons = HashMap::new();
        if let Some(dir) = config.icons_dir.as_deref() {
            for icon in ALL_ICONS {
                let path = dir.join(format!("{}.png", icon.asset_name()));
                if path.exists() {
                    icons.insert(icon, load_asset(&path)?);
                } else {
                    log::debug!("icon {} not found, drawing marker", path.display());
                }
            }
        }
        Ok(Self {
            background,
            back,
            icons,
        })
    }
}

/// Rasterize a composed front face.
pub fn render_front(
    face: &FrontFace,
    fonts: &CardFonts,
    assets: &CardAssets,
    options: &RenderOptions,
) -> Result<DynamicImage, RenderError> {
    let ratio = options.ratio();
    let mut canvas = base_canvas(assets.background.as_ref(), PALETTE.card_bg, options);

    for line in face.header_lines() {
        draw_line(&mut canvas, line, fonts, ratio);
    }
    for row in &face.rows {
        draw_row(&mut canvas, row, fonts, assets, ratio);
    }

    let (w, h) = canvas.dimensions();
    draw_hollow_rect_mut(&mut canvas, Rect::at(0, 0).of_size(w, h), PALETTE.border);
    Ok(DynamicImage::ImageRgba8(canvas))
}

/// Rasterize the static back face.
pub fn render_back(assets: &CardAssets, options: &RenderOptions) -> DynamicImage {
    let mut canvas = base_canvas(assets.back.as_ref(), PALETTE.back_bg, options);
    if assets.back.is_none() {
        let (w, h) = canvas.dimensions();
        let band = (h as f32 * 0.08).round() as u32;
        draw_filled_rect_mut(
            &mut canvas,
            Rect::at(0, (h - band) as i32).of_size(w, band.max(1)),
            PALETTE.accent,
        );
    }
    let (w, h) = canvas.dimensions();
    draw_hollow_rect_mut(&mut canvas, Rect::at(0, 0).of_size(w, h), PALETTE.border);
    DynamicImage::ImageRgba8(canvas)
}

/// Render whichever face `orientation` points at.
pub fn render_face(
    orientation: Orientation,
    face: &FrontFace,
    fonts: &CardFonts,
    assets: &CardAssets,
    options: &RenderOptions,
) -> Result<DynamicImage, RenderError> {
    match orientation {
        Orientation::Front => render_front(face, fonts, assets, options),
        Orientation::Back => Ok(render_back(assets, options)),
    }
}

/// Where a PNG ended up and the SHA-256 of its bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReceipt {
    pub path: PathBuf,
    pub sha256: String,
    pub bytes: usize,
}

/// Encode to PNG and write it atomically.
///
/// The image is fully encoded before anything touches the disk; the bytes go
/// to a sibling temp file which is then renamed over `path`.
pub fn export_png(image: &DynamicImage, path: &Path) -> Result<ExportReceipt, RenderError> {
    let mut buffer = Vec::new();
    image.write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)?;

    let io_err = |source| RenderError::Io {
        path: path.display().to_string(),
        source,
    };
    let mut staging = path.as_os_str().to_owned();
    staging.push(".part");
    let staging = PathBuf::from(staging);
    if let Err(source) = fs::write(&staging, &buffer) {
        let _ = fs::remove_file(&staging);
        return Err(io_err(source));
    }
    if let Err(source) = fs::rename(&staging, path) {
        let _ = fs::remove_file(&staging);
        return Err(io_err(source));
    }

    let digest = Sha256::digest(&buffer);
    log::info!("wrote {} ({} bytes)", path.display(), buffer.len());
    Ok(ExportReceipt {
        path: path.to_path_buf(),
        sha256: format!("{digest:02x}"),
        bytes: buffer.len(),
    })
}

fn base_canvas(
    image: Option<&RgbaImage>,
    fill: Rgba<u8>,
    options: &RenderOptions,
) -> RgbaImage {
    let (w, h) = options.canvas_size();
    let mut canvas: RgbaImage = ImageBuffer::from_pixel(w, h, fill);
    if let Some(src) = image {
        let scaled = resize(src, w, h, FilterType::Lanczos3);
        overlay(&mut canvas, &scaled, 0, 0);
    }
    canvas
}

fn draw_line(canvas: &mut RgbaImage, line: &TextLine, fonts: &CardFonts, ratio: f32) {
    if line.text.is_empty() {
        return;
    }
    let text = match line.max_width {
        Some(max) => truncate_to_width(fonts, &line.text, line.font, line.size, max),
        None => line.text.clone(),
    };
    let left = line_left(fonts, line, &text);
    draw_runs(canvas, fonts, line.font, &text, (left, line.y), line.size, ratio);
}

fn draw_row(
    canvas: &mut RgbaImage,
    row: &RenderableRow,
    fonts: &CardFonts,
    assets: &CardAssets,
    ratio: f32,
) {
    let icon_px = (ICON_SIZE * ratio).round() as u32;
    let icon_x = (row.icon_x() * ratio).round() as i64;
    let icon_y = (row.y * ratio).round() as i64;
    match assets.icons.get(&row.icon) {
        Some(icon) => {
            let scaled = resize(icon, icon_px, icon_px, FilterType::Lanczos3);
            overlay(canvas, &scaled, icon_x, icon_y);
        }
        None => {
            let radius = (icon_px as i32 / 2 - 1).max(1);
            let center = (
                icon_x as i32 + icon_px as i32 / 2,
                icon_y as i32 + icon_px as i32 / 2,
            );
            draw_filled_circle_mut(canvas, center, radius, PALETTE.icon);
        }
    }

    draw_runs(canvas, fonts, row.font, &row.text, (row.x, row.y), row.size(), ratio);
}

/// Draw `text` from a layout-unit origin, switching faces per run
/// so labels in the other script still get real glyphs.
fn draw_runs(
    canvas: &mut RgbaImage,
    fonts: &CardFonts,
    class: FontClass,
    text: &str,
    (x, y): (f32, f32),
    size: f32,
    ratio: f32,
) {
    let mut cursor = x;
    for (run_class, run) in fonts.runs(class, text) {
        let font = fonts.face(run_class);
        draw_text_mut(
            canvas,
            PALETTE.text,
            (cursor * ratio).round() as i32,
            (y * ratio).round() as i32,
            em_scale(font, size * ratio),
            font,
            run,
        );
        cursor += advance_width(font, run, size);
    }
}

/// Left edge of `text` once `line`'s anchor is applied.
pub(crate) fn line_left<M: TextMeasure + ?Sized>(measure: &M, line: &TextLine, text: &str) -> f32 {
    let width = measure.measure(text, line.font, line.size);
    match line.anchor {
        Anchor::Center => line.x - width / 2.0,
        Anchor::RightInBox => line.x + line.max_width.unwrap_or(width) - width,
    }
}

/// Drop trailing characters until `text…` fits in `max_width`.
pub(crate) fn truncate_to_width<M: TextMeasure + ?Sized>(
    measure: &M,
    text: &str,
    font: FontClass,
    size: f32,
    max_width: f32,
) -> String {
    if measure.measure(text, font, size) <= max_width {
        return text.to_string();
    }
    let mut chars: Vec<char> = text.chars().collect();
    while !chars.is_empty() {
        chars.pop();
        let mut candidate: String = chars.iter().collect();
        candidate.push(ELLIPSIS);
        if measure.measure(&candidate, font, size) <= max_width {
            return candidate;
        }
    }
    ELLIPSIS.to_string()
}

fn load_asset(path: &Path) -> Result<RgbaImage, RenderError> {
    let image = image::open(path).map_err(|source| RenderError::Asset {
        path: path.display().to_string(),
        source,
    })?;
    Ok(image.to_rgba8())
}
