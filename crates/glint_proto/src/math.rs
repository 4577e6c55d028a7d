//! Minimal 2D math types shared across the bridge.
//!
//! Positions are in engine convention: origin top-left, Y growing down.

use bytemuck::{Pod, Zeroable};

/// A 2D position or vector in engine screen coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Pos2 {
    /// Horizontal coordinate in points.
    pub x: f32,
    /// Vertical coordinate in points, top-left origin.
    pub y: f32,
}

impl Pos2 {
    /// Creates a position from its components.
    #[inline]
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// The origin.
    pub const ZERO: Self = Self::new(0.0, 0.0);
}

/// An axis-aligned rectangle given by its min and max corners.
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Rect {
    /// Top-left corner.
    pub min: Pos2,
    /// Bottom-right corner.
    pub max: Pos2,
}

impl Rect {
    /// Creates a rectangle from two corners.
    #[inline]
    #[must_use]
    pub const fn new(min: Pos2, max: Pos2) -> Self {
        Self { min, max }
    }

    /// Creates a rectangle spanning `(0, 0)` to `(width, height)`.
    #[inline]
    #[must_use]
    pub const fn from_size(width: f32, height: f32) -> Self {
        Self {
            min: Pos2::ZERO,
            max: Pos2::new(width, height),
        }
    }

    /// Width of the rectangle.
    #[inline]
    #[must_use]
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    /// Height of the rectangle.
    #[inline]
    #[must_use]
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }
}
