use std::fs;
use std::path::Path;

use ab_glyph::{Font, FontArc, GlyphId, PxScale, ScaleFont};

use crate::config::FontConfig;
use crate::card::layout::FontClass;
use crate::card::title::TextMeasure;
use crate::render::paint::RenderError;

/// The two faces every card is drawn with.
#[derive(Clone)]
pub struct CardFonts {
    latin: FontArc,
    cjk: FontArc,
}

impl std::fmt::Debug for CardFonts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CardFonts").finish_non_exhaustive()
    }
}

impl CardFonts {
    pub fn new(latin: FontArc, cjk: FontArc) -> Self {
        Self { latin, cjk }
    }

    /// Load the configured font files. The CJK face falls back to the Latin one.
    pub fn load(config: &FontConfig) -> Result<Self, RenderError> {
        let latin_path = config.latin.as_deref().ok_or(RenderError::MissingFont)?;
        let latin = load_font(latin_path)?;
        let cjk = match config.cjk.as_deref() {
            Some(path) => load_font(path)?,
            None => latin.clone(),
        };
        Ok(Self { latin, cjk })
    }

    pub fn face(&self, class: FontClass) -> &FontArc {
        match class {
            FontClass::Latin => &self.latin,
            FontClass::Cjk => &self.cjk,
        }
    }

    fn covers(&self, class: FontClass, ch: char) -> bool {
        self.face(class).glyph_id(ch) != GlyphId(0)
    }

    /// Split `text` into single-face runs, preferring `class` and falling back
    /// to the other face for characters it has no glyph for.
    pub fn runs<'t>(&self, class: FontClass, text: &'t str) -> Vec<(FontClass, &'t str)> {
        split_runs(text, class, |class, ch| self.covers(class, ch))
    }
}

fn other_class(class: FontClass) -> FontClass {
    match class {
        FontClass::Latin => FontClass::Cjk,
        FontClass::Cjk => FontClass::Latin,
    }
}

/// Group consecutive characters that resolve to the same face.
///
/// A character missing from both faces stays with `preferred`.
pub(crate) fn split_runs<'t>(
    text: &'t str,
    preferred: FontClass,
    covers: impl Fn(FontClass, char) -> bool,
) -> Vec<(FontClass, &'t str)> {
    let mut runs: Vec<(FontClass, &'t str)> = Vec::new();
    let mut start = 0;
    let mut current = preferred;
    for (idx, ch) in text.char_indices() {
        let class = if covers(preferred, ch) || !covers(other_class(preferred), ch) {
            preferred
        } else {
            other_class(preferred)
        };
        if class != current && idx > start {
            runs.push((current, &text[start..idx]));
            start = idx;
        }
        current = class;
    }
    if start < text.len() {
        runs.push((current, &text[start..]));
    }
    runs
}

/// Scale at which one em spans `size` pixels, as CSS `font-size` does.
///
/// `PxScale` measures ascent to descent, so the em size is stretched by the
/// font's height-to-em ratio.
pub fn em_scale(font: &FontArc, size: f32) -> PxScale {
    match font.units_per_em() {
        Some(units_per_em) if units_per_em > 0.0 => {
            PxScale::from(size * font.height_unscaled() / units_per_em)
        }
        _ => PxScale::from(size),
    }
}

/// Advance width of `text` in a single face, kerning included.
pub fn advance_width(font: &FontArc, text: &str, size: f32) -> f32 {
    let scaled = font.as_scaled(em_scale(font, size));
    let mut width = 0.0;
    let mut previous = None;
    for ch in text.chars() {
        let id = scaled.glyph_id(ch);
        if let Some(prev) = previous {
            width += scaled.kern(prev, id);
        }
        width += scaled.h_advance(id);
        previous = Some(id);
    }
    width
}

impl TextMeasure for CardFonts {
    fn measure(&self, text: &str, font: FontClass, size: f32) -> f32 {
        self.runs(font, text)
            .into_iter()
            .map(|(class, run)| advance_width(self.face(class), run, size))
            .sum()
    }
}

/// Metric-free width estimate for when no font files are configured.
///
/// Wide (CJK) characters count one em, everything else a little over half.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApproximateMeasure;

const NARROW_ADVANCE_EM: f32 = 0.56;

impl TextMeasure for ApproximateMeasure {
    fn measure(&self, text: &str, _font: FontClass, size: f32) -> f32 {
        text.chars()
            .map(|ch| if is_wide(ch) { size } else { size * NARROW_ADVANCE_EM })
            .sum()
    }
}

fn is_wide(ch: char) -> bool {
    matches!(
        ch as u32,
        0x1100..=0x115F
            | 0x2E80..=0xA4CF
            | 0xAC00..=0xD7A3
            | 0xF900..=0xFAFF
            | 0xFE30..=0xFE4F
            | 0xFF00..=0xFF60
            | 0xFFE0..=0xFFE6
    )
}

fn load_font(path: &Path) -> Result<FontArc, RenderError> {
    let bytes = fs::read(path).map_err(|source| RenderError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let font = FontArc::try_from_vec(bytes)
        .map_err(|_| RenderError::InvalidFont(path.display().to_string()))?;
    log::debug!("loaded font {}", path.display());
    Ok(font)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::card::layout::TITLE_WRAP_THRESHOLD;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    const SYSTEM_FONT: &str = "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf";

    /// A Latin-only system face, when the machine has one installed.
    pub(crate) fn system_font() -> Option<FontArc> {
        let bytes = fs::read(SYSTEM_FONT).ok()?;
        FontArc::try_from_vec(bytes).ok()
    }

    #[test]
    fn runs_fall_back_per_character() {
        let ascii_only = |class: FontClass, ch: char| class == FontClass::Cjk || ch.is_ascii();
        assert_eq!(
            split_runs("苗栗：037-230388 ext.321", FontClass::Latin, ascii_only),
            vec![
                (FontClass::Cjk, "苗栗："),
                (FontClass::Latin, "037-230388 ext.321"),
            ]
        );
        assert_eq!(
            split_runs("Line ID：ming", FontClass::Latin, ascii_only),
            vec![
                (FontClass::Latin, "Line ID"),
                (FontClass::Cjk, "："),
                (FontClass::Latin, "ming"),
            ]
        );
        assert_eq!(
            split_runs("資訊部 IT", FontClass::Cjk, ascii_only),
            vec![(FontClass::Cjk, "資訊部 IT")]
        );
        assert!(split_runs("", FontClass::Latin, ascii_only).is_empty());
    }

    #[test]
    fn glyphs_missing_everywhere_stay_with_preferred_face() {
        let nothing = |_: FontClass, _: char| false;
        assert_eq!(
            split_runs("統編：", FontClass::Latin, nothing),
            vec![(FontClass::Latin, "統編：")]
        );
    }

    #[test]
    fn advance_width_is_css_pixels_per_em() {
        let Some(font) = system_font() else {
            return;
        };
        let units_per_em = font.units_per_em().unwrap();
        let text = "Sales Department Manager";
        let unscaled: f32 = text
            .chars()
            .map(|ch| font.h_advance_unscaled(font.glyph_id(ch)))
            .sum();
        let expected = unscaled * 8.0 / units_per_em;
        let measured = advance_width(&font, text, 8.0);
        assert!(
            (measured - expected).abs() < 1.0,
            "measured {} expected {}",
            measured,
            expected
        );
        assert!(measured > TITLE_WRAP_THRESHOLD);
        assert!(advance_width(&font, "Sales Manager", 8.0) < TITLE_WRAP_THRESHOLD);
    }

    #[test]
    fn card_fonts_measure_sums_runs() {
        let Some(font) = system_font() else {
            return;
        };
        let fonts = CardFonts::new(font.clone(), font.clone());
        let width = fonts.measure("Engineer", FontClass::Latin, 8.0);
        assert_eq!(width, advance_width(&font, "Engineer", 8.0));
        assert_eq!(
            fonts.runs(FontClass::Latin, "苗栗：037"),
            vec![(FontClass::Latin, "苗栗：037")]
        );
    }

    #[test]
    fn approximate_measure_counts_wide_chars_as_one_em() {
        let m = ApproximateMeasure;
        assert_eq!(m.measure("工程師", FontClass::Cjk, 8.0), 24.0);
        assert!((m.measure("ab", FontClass::Latin, 10.0) - 11.2).abs() < 1e-4);
        assert_eq!(m.measure("手機：", FontClass::Latin, 8.0), 24.0);
    }

    #[test]
    fn latin_font_is_required() {
        let err = CardFonts::load(&FontConfig::default()).unwrap_err();
        assert!(matches!(err, RenderError::MissingFont));
    }

    #[test]
    fn missing_file_reports_path() {
        let config = FontConfig {
            latin: Some(PathBuf::from("/nonexistent/Inter.ttf")),
            cjk: None,
        };
        let err = CardFonts::load(&config).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/Inter.ttf"));
    }

    #[test]
    fn garbage_is_not_a_font() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bogus.ttf");
        fs::write(&path, b"not a font").unwrap();
        let config = FontConfig {
            latin: Some(path),
            cjk: None,
        };
        assert!(matches!(
            CardFonts::load(&config),
            Err(RenderError::InvalidFont(_))
        ));
    }
}
