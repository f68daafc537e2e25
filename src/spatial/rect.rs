//! Four-corner quads in the buffer corner order used by every chunk
//!
//! Corners are always stored bottom-left, top-left, bottom-right, top-right,
//! matching the vertex order of the two triangles emitted per tile.

use glam::{Vec2, Vec3};

/// Texture coordinates of a tile quad
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect2D {
    /// Bottom-left corner
    pub bottom_left: Vec2,
    /// Top-left corner
    pub top_left: Vec2,
    /// Bottom-right corner
    pub bottom_right: Vec2,
    /// Top-right corner
    pub top_right: Vec2,
}

impl Rect2D {
    /// All corners at the origin, used as the "no visual" value
    pub const ZERO: Self = Self::new(Vec2::ZERO, Vec2::ZERO, Vec2::ZERO, Vec2::ZERO);

    /// Full texture, the default UVs of a freshly built chunk
    pub const UNIT: Self = Self::new(Vec2::ZERO, Vec2::Y, Vec2::X, Vec2::ONE);

    /// Create a rect from its corners in buffer order
    pub const fn new(bottom_left: Vec2, top_left: Vec2, bottom_right: Vec2, top_right: Vec2) -> Self {
        Self {
            bottom_left,
            top_left,
            bottom_right,
            top_right,
        }
    }

    /// Axis-aligned rect spanning `min..max`
    pub const fn from_min_max(min: Vec2, max: Vec2) -> Self {
        Self::new(
            min,
            Vec2::new(min.x, max.y),
            Vec2::new(max.x, min.y),
            max,
        )
    }

    /// Rect where every corner samples the same texel
    pub const fn solid(uv: Vec2) -> Self {
        Self::new(uv, uv, uv, uv)
    }

    /// Corners in buffer order
    pub const fn corners(&self) -> [Vec2; 4] {
        [
            self.bottom_left,
            self.top_left,
            self.bottom_right,
            self.top_right,
        ]
    }
}

/// World-space vertices of a tile quad
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect3D {
    /// Bottom-left corner
    pub bottom_left: Vec3,
    /// Top-left corner
    pub top_left: Vec3,
    /// Bottom-right corner
    pub bottom_right: Vec3,
    /// Top-right corner
    pub top_right: Vec3,
}

impl Rect3D {
    /// Create a rect from its corners in buffer order
    pub const fn new(bottom_left: Vec3, top_left: Vec3, bottom_right: Vec3, top_right: Vec3) -> Self {
        Self {
            bottom_left,
            top_left,
            bottom_right,
            top_right,
        }
    }

    /// Square quad of edge `size` centered on `center`
    pub fn centered(center: Vec3, size: f32) -> Self {
        let margin = size / 2.0;
        Self::new(
            Vec3::new(center.x - margin, center.y - margin, center.z),
            Vec3::new(center.x - margin, center.y + margin, center.z),
            Vec3::new(center.x + margin, center.y - margin, center.z),
            Vec3::new(center.x + margin, center.y + margin, center.z),
        )
    }

    /// Corners in buffer order
    pub const fn corners(&self) -> [Vec3; 4] {
        [
            self.bottom_left,
            self.top_left,
            self.bottom_right,
            self.top_right,
        ]
    }

    /// Rebuild a rect from corners in buffer order
    pub const fn from_corners(corners: [Vec3; 4]) -> Self {
        let [bottom_left, top_left, bottom_right, top_right] = corners;
        Self::new(bottom_left, top_left, bottom_right, top_right)
    }
}
