//! Viewport rectangle and the NDC-to-pixel mapping.

use crate::math::{lerp, remap, vec3::Vec3};

/// Rectangular viewport in pixel space.
///
/// Defines the affine remap from normalized device coordinates to pixel
/// coordinates. Derived from the output surface once per frame and immutable
/// during a draw.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Full-surface viewport for a buffer of the given size.
    pub fn from_size(width: u32, height: u32) -> Self {
        Self::new(0.0, 0.0, width as f32, height as f32)
    }

    /// Map a projected-space vertex to screen space.
    ///
    /// X in [-1, 1] maps linearly onto [x, x+width]. Y is flipped: normalized
    /// +Y points up while pixel +Y points down, so [-1, 1] maps onto
    /// [y+height, y]. Z passes through unchanged.
    pub fn to_screen(&self, v: Vec3) -> Vec3 {
        Vec3::new(
            lerp(self.x, self.x + self.width, remap(-1.0, 1.0, v.x)),
            lerp(self.y, self.y + self.height, remap(1.0, -1.0, v.y)),
            v.z,
        )
    }
}
