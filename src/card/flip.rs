use serde::Serialize;

/// Minimum horizontal travel, exclusive, for a drag to count as a flip.
pub const FLIP_DRAG_THRESHOLD: f32 = 50.0;

/// Which face of the card is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Front,
    Back,
}

impl Orientation {
    pub fn flipped(self) -> Self {
        match self {
            Orientation::Front => Orientation::Back,
            Orientation::Back => Orientation::Front,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Tracking {
    pointer: u32,
    start_x: f32,
}

/// Front/back state driven by clicks and horizontal drags.
///
/// At most one pointer is tracked; extra pointers are ignored until it lifts.
#[derive(Debug, Clone, Default)]
pub struct FlipController {
    orientation: Orientation,
    tracking: Option<Tracking>,
}

impl FlipController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn is_tracking(&self) -> bool {
        self.tracking.is_some()
    }

    /// A click always flips, whatever drag is in progress.
    pub fn click(&mut self) -> Orientation {
        self.orientation = self.orientation.flipped();
        self.orientation
    }

    pub fn pointer_down(&mut self, pointer: u32, x: f32) {
        if self.tracking.is_some() {
            return;
        }
        self.tracking = Some(Tracking { pointer, start_x: x });
    }

    /// Finish a drag. Returns whether the card flipped.
    pub fn pointer_up(&mut self, pointer: u32, x: f32) -> bool {
        let Some(tracking) = self.tracking else {
            return false;
        };
        if tracking.pointer != pointer {
            return false;
        }
        self.tracking = None;
        if (x - tracking.start_x).abs() > FLIP_DRAG_THRESHOLD {
            self.orientation = self.orientation.flipped();
            true
        } else {
            false
        }
    }

    pub fn cancel(&mut self) {
        self.tracking = None;
    }

    pub fn reset(&mut self) {
        self.orientation = Orientation::Front;
        self.tracking = None;
    }
}
