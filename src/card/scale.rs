use thiserror::Error;

/// Largest on-screen width the card may take, in viewport units.
pub const MAX_DISPLAY_WIDTH: f32 = 800.0;
const WIDTH_FRACTION: f32 = 0.98;
const HEIGHT_FRACTION: f32 = 0.9;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum LayoutError {
    #[error("viewport must be positive and finite (got {0}x{1})")]
    InvalidViewport(f32, f32),
    #[error("card size must be positive and finite (got {0}x{1})")]
    InvalidCardSize(f32, f32),
}

/// Uniform scale that fits the card in the viewport without ever enlarging it.
pub fn fit_scale(
    viewport_width: f32,
    viewport_height: f32,
    card_width: f32,
    card_height: f32,
) -> Result<f32, LayoutError> {
    if !is_positive(viewport_width) || !is_positive(viewport_height) {
        return Err(LayoutError::InvalidViewport(viewport_width, viewport_height));
    }
    if !is_positive(card_width) || !is_positive(card_height) {
        return Err(LayoutError::InvalidCardSize(card_width, card_height));
    }
    let by_width = (viewport_width * WIDTH_FRACTION).min(MAX_DISPLAY_WIDTH) / card_width;
    let by_height = viewport_height * HEIGHT_FRACTION / card_height;
    Ok(by_width.min(by_height).min(1.0))
}

fn is_positive(value: f32) -> bool {
    value.is_finite() && value > 0.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::layout::{CARD_HEIGHT, CARD_WIDTH};

    #[test]
    fn narrow_viewport_is_width_bound() {
        let scale = fit_scale(300.0, 1000.0, CARD_WIDTH, CARD_HEIGHT).unwrap();
        assert!(scale < 1.0);
        assert!((scale - 300.0 * 0.98 / 340.0).abs() < 1e-6);
    }

    #[test]
    fn short_viewport_is_height_bound() {
        let scale = fit_scale(2000.0, 150.0, CARD_WIDTH, CARD_HEIGHT).unwrap();
        assert!((scale - 150.0 * 0.9 / 204.0).abs() < 1e-6);
    }

    #[test]
    fn large_viewport_never_upscales() {
        assert_eq!(fit_scale(2000.0, 2000.0, CARD_WIDTH, CARD_HEIGHT).unwrap(), 1.0);
    }

    #[test]
    fn rejects_degenerate_input() {
        assert!(matches!(
            fit_scale(0.0, 100.0, CARD_WIDTH, CARD_HEIGHT),
            Err(LayoutError::InvalidViewport(..))
        ));
        assert!(matches!(
            fit_scale(100.0, f32::NAN, CARD_WIDTH, CARD_HEIGHT),
            Err(LayoutError::InvalidViewport(..))
        ));
        assert!(matches!(
            fit_scale(100.0, 100.0, 0.0, CARD_HEIGHT),
            Err(LayoutError::InvalidCardSize(..))
        ));
    }
}
