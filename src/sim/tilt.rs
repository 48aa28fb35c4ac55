//! Pointer-tilt responder for hover-interactive cards
//!
//! Maps a 2D pointer position over a card's bounding rectangle to a bounded
//! rotation pair. Direct mapping, no smoothing; the host re-applies the
//! angles to its transform on every pointer-move event.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::MAX_TILT_DEG;

/// Axis-aligned bounding rectangle of the card, in the same coordinate space
/// as the pointer events.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self { left, top, width, height }
    }

    fn center(&self) -> Vec2 {
        Vec2::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    fn is_valid(&self) -> bool {
        self.left.is_finite()
            && self.top.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
            && self.width > 0.0
            && self.height > 0.0
    }
}

/// Current tilt of one interactive card, in degrees, bounded to
/// [-MAX_TILT_DEG, MAX_TILT_DEG] on both axes.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TiltState {
    pub rotate_x: f32,
    pub rotate_y: f32,
}

impl TiltState {
    /// Update from a pointer-move event over the card.
    ///
    /// The vertical axis is inverted: moving the pointer toward the bottom
    /// edge tilts the top of the card away from the viewer. Degenerate or
    /// non-finite input leaves the state untouched.
    pub fn pointer_move(&mut self, pointer: Vec2, rect: Rect) {
        if !rect.is_valid() || !pointer.is_finite() {
            return;
        }
        let offset = pointer - rect.center();
        let nx = offset.x / (rect.width / 2.0);
        let ny = offset.y / (rect.height / 2.0);
        self.rotate_x = (ny * -MAX_TILT_DEG).clamp(-MAX_TILT_DEG, MAX_TILT_DEG);
        self.rotate_y = (nx * MAX_TILT_DEG).clamp(-MAX_TILT_DEG, MAX_TILT_DEG);
    }

    /// Reset on pointer-leave, regardless of prior values.
    pub fn pointer_leave(&mut self) {
        *self = Self::default();
    }
}
