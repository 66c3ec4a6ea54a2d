pub use kurbo::Rect;

/// Pixel dimensions of a raster surface.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Size {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Size {
    /// Construct a size from its two extents.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Build a size from signed extents, clamping negatives to zero.
    pub fn from_i32(width: i32, height: i32) -> Self {
        Self {
            width: width.max(0) as u32,
            height: height.max(0) as u32,
        }
    }

    /// Width over height. Zero-height sizes report an aspect of `1.0`.
    pub fn aspect(self) -> f64 {
        if self.height == 0 {
            return 1.0;
        }
        f64::from(self.width) / f64::from(self.height)
    }

    /// Return `true` when either extent is zero.
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Width as a signed pixel coordinate.
    pub fn w(self) -> i32 {
        i32::try_from(self.width).unwrap_or(i32::MAX)
    }

    /// Height as a signed pixel coordinate.
    pub fn h(self) -> i32 {
        i32::try_from(self.height).unwrap_or(i32::MAX)
    }
}

/// Integer pixel position; may be negative for partially off-canvas pastes.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Position {
    /// Horizontal offset in pixels.
    pub x: i32,
    /// Vertical offset in pixels.
    pub y: i32,
}

impl Position {
    /// Construct a position.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The origin `(0, 0)`.
    pub const fn origin() -> Self {
        Self { x: 0, y: 0 }
    }

    /// Offset by `(dx, dy)`.
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
