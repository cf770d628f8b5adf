//! Design units to screen pixels.
//!
//! The game is authored against a 1080-unit-tall screen; every length is scaled
//! by the real display height so the court looks the same on any device.

use bevy::prelude::*;

/// Height of the reference display, in design units.
pub const BASE_HEIGHT: f32 = 1080.0;

/// Display size assumed when no window exists (headless runs).
pub const FALLBACK_DISPLAY: Vec2 = Vec2::new(1920.0, 1080.0);

#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct Scale {
    factor: f32,
}

impl Default for Scale {
    fn default() -> Self {
        Self { factor: 1.0 }
    }
}

impl Scale {
    /// Non-positive heights fall back to the reference height.
    pub fn from_display_height(height: f32) -> Self {
        let height = if height > 0.0 { height } else { BASE_HEIGHT };
        Self { factor: height / BASE_HEIGHT }
    }

    #[inline]
    pub fn factor(self) -> f32 {
        self.factor
    }

    /// Design units to pixels.
    #[inline]
    pub fn px(self, units: f32) -> f32 {
        units * self.factor
    }

    /// Pixels to design units.
    #[inline]
    pub fn units(self, px: f32) -> f32 {
        px / self.factor
    }

    /// Size of a display expressed in design units.
    pub fn design_size(self, display: Vec2) -> Vec2 {
        Vec2::new(self.units(display.x), self.units(display.y))
    }
}
