use crate::constants::POINTER_SMOOTHING;
use glam::Vec2;

/// Smoothed pointer position, normalized to `[-1, 1]` on both axes.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerState {
    pub target: Vec2,
    pub current: Vec2,
    pub active: bool,
}

/// What a scene sees of the pointer on a given frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerSample {
    pub x: f32,
    pub y: f32,
    pub active: bool,
}

/// Container layout box in document coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ClientRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl PointerState {
    /// Maps a client-space pointer position into the container's `[-1, 1]` box.
    pub fn move_to_client(&mut self, client: Vec2, rect: ClientRect) {
        if rect.width <= 0.0 || rect.height <= 0.0 || !client.is_finite() {
            return;
        }
        let u = (client.x - rect.left) / rect.width;
        let v = (client.y - rect.top) / rect.height;
        self.move_to(Vec2::new(u * 2.0 - 1.0, v * 2.0 - 1.0));
    }

    pub fn move_to(&mut self, normalized: Vec2) {
        self.target = normalized.clamp(Vec2::splat(-1.0), Vec2::splat(1.0));
        self.active = true;
    }

    /// Pointer left the container: drift back to center and hand over to autopilot.
    pub fn leave(&mut self) {
        self.target = Vec2::ZERO;
        self.active = false;
    }

    #[inline]
    pub fn smooth(&mut self) {
        self.smooth_with(POINTER_SMOOTHING);
    }

    #[inline]
    pub fn smooth_with(&mut self, gain: f32) {
        let gain = gain.clamp(0.0, 1.0);
        self.current += (self.target - self.current) * gain;
    }

    pub fn sample(&self) -> PointerSample {
        PointerSample {
            x: self.current.x,
            y: self.current.y,
            active: self.active,
        }
    }
}

impl PointerSample {
    pub fn as_vec2(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}
