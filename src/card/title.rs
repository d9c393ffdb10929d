use serde::Serialize;

use crate::card::employee::Language;
use crate::card::layout::{
    Anchor, FontClass, TITLE_EN_Y, TITLE_LEFT, TITLE_SIZE, TITLE_WIDTH, TITLE_WRAP_GAP,
    TITLE_WRAP_THRESHOLD, TITLE_ZH_Y,
};

/// Width of rendered text in layout units.
///
/// Supplied by whatever owns the fonts, so composition stays free of I/O.
pub trait TextMeasure {
    fn measure(&self, text: &str, font: FontClass, size: f32) -> f32;
}

impl<T: TextMeasure + ?Sized> TextMeasure for &T {
    fn measure(&self, text: &str, font: FontClass, size: f32) -> f32 {
        (**self).measure(text, font, size)
    }
}

/// A positioned run of text on the card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextLine {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub font: FontClass,
    pub anchor: Anchor,
    /// Overflow past this width is clipped with an ellipsis.
    pub max_width: Option<f32>,
}

impl TextLine {
    fn title(text: impl Into<String>, y: f32, font: FontClass) -> Self {
        Self {
            text: text.into(),
            x: TITLE_LEFT,
            y,
            size: TITLE_SIZE,
            font,
            anchor: Anchor::RightInBox,
            max_width: Some(TITLE_WIDTH),
        }
    }
}

/// Compose the department/title line for one language.
///
/// The English variant splits onto two lines when the combined text is wider
/// than [`TITLE_WRAP_THRESHOLD`]; the Chinese variant is clipped instead.
pub fn compose_title_line<M: TextMeasure + ?Sized>(
    department: &str,
    title: &str,
    department_enabled: bool,
    language: Language,
    measure: &M,
) -> Vec<TextLine> {
    let (y, font) = match language {
        Language::Chinese => (TITLE_ZH_Y, FontClass::Cjk),
        Language::English => (TITLE_EN_Y, FontClass::Latin),
    };

    if title.is_empty() {
        return Vec::new();
    }
    if !department_enabled || department.is_empty() {
        return vec![TextLine::title(title, y, font)];
    }

    let combined = format!("{} {}", department, title);
    if language == Language::English {
        let width = measure.measure(&combined, font, TITLE_SIZE);
        if width > TITLE_WRAP_THRESHOLD {
            log::debug!(
                "wrapping english title line ({:.1} > {})",
                width,
                TITLE_WRAP_THRESHOLD
            );
            return vec![
                TextLine::title(department, y, font),
                TextLine::title(title, y + TITLE_WRAP_GAP, font),
            ];
        }
    }
    vec![TextLine::title(combined, y, font)]
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Every character advances by a fixed width.
    pub(crate) struct FixedAdvance(pub f32);

    impl TextMeasure for FixedAdvance {
        fn measure(&self, text: &str, _font: FontClass, _size: f32) -> f32 {
            text.chars().count() as f32 * self.0
        }
    }

    #[test]
    fn combines_department_and_title_on_one_line() {
        // "Sales Manager" = 13 chars * 5 = 65
        let lines = compose_title_line("Sales", "Manager", true, Language::English, &FixedAdvance(5.0));
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text, "Sales Manager");
        assert_eq!(lines[0].y, TITLE_EN_Y);
    }

    #[test]
    fn width_at_threshold_stays_single_line() {
        // 20 chars * 5 = exactly 100
        let lines = compose_title_line("Engineering", "Lead0000", true, Language::English, &FixedAdvance(5.0));
        assert_eq!(lines.len(), 1);
    }

    #[test]
    fn wide_english_line_splits_ten_units_apart() {
        let lines = compose_title_line(
            "Information Security",
            "Senior Engineer",
            true,
            Language::English,
            &FixedAdvance(5.0),
        );
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].text, "Information Security");
        assert_eq!(lines[1].text, "Senior Engineer");
        assert_eq!(lines[1].y - lines[0].y, TITLE_WRAP_GAP);
    }

    #[test]
    fn chinese_line_never_wraps() {
        let lines = compose_title_line("資訊安全管理部門", "資深工程師", true, Language::Chinese, &FixedAdvance(50.0));
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text, "資訊安全管理部門 資深工程師");
        assert_eq!(lines[0].font, FontClass::Cjk);
        assert_eq!(lines[0].max_width, Some(TITLE_WIDTH));
    }

    #[test]
    fn disabled_or_missing_department_shows_title_only() {
        let m = FixedAdvance(50.0);
        let lines = compose_title_line("Sales", "Manager", false, Language::English, &m);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text, "Manager");
        let lines = compose_title_line("", "Manager", true, Language::English, &m);
        assert_eq!(lines[0].text, "Manager");
    }

    #[test]
    fn missing_title_renders_nothing() {
        let lines = compose_title_line("Sales", "", true, Language::English, &FixedAdvance(5.0));
        assert!(lines.is_empty());
    }
}
