use std::ops::{Add, Sub};

use crate::foundation::error::{ReelError, ReelResult};

pub use kurbo::{Affine, Point, Vec2};

/// Unit step upward (scene space is y-up).
pub const UP: Vec2 = Vec2::new(0.0, 1.0);
/// Unit step downward.
pub const DOWN: Vec2 = Vec2::new(0.0, -1.0);
/// Unit step to the left.
pub const LEFT: Vec2 = Vec2::new(-1.0, 0.0);
/// Unit step to the right.
pub const RIGHT: Vec2 = Vec2::new(1.0, 0.0);

/// A point in scene space.
///
/// Every layout in the reel lives in the `z = 0` plane; `z` is carried so that the
/// engine receives fully resolved 3D coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Point3 {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate (up is positive).
    pub y: f64,
    /// Depth coordinate.
    pub z: f64,
}

impl Point3 {
    /// The scene origin.
    pub const ORIGIN: Self = Self::new(0.0, 0.0, 0.0);

    /// Build a point from its three coordinates.
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Build a point in the `z = 0` plane.
    pub const fn xy(x: f64, y: f64) -> Self {
        Self { x, y, z: 0.0 }
    }

    /// Project onto the drawing plane.
    pub fn to_point(self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Lift a plane point, keeping `z` from `self`.
    pub fn with_plane(self, p: Point) -> Self {
        Self::new(p.x, p.y, self.z)
    }

    /// Translate within the drawing plane.
    pub fn offset(self, by: Vec2) -> Self {
        Self::new(self.x + by.x, self.y + by.y, self.z)
    }

    /// Euclidean distance to `other`.
    pub fn distance(self, other: Self) -> f64 {
        let d = self - other;
        (d.x * d.x + d.y * d.y + d.z * d.z).sqrt()
    }

    /// Midpoint between `self` and `other`.
    pub fn midpoint(self, other: Self) -> Self {
        Self::new(
            (self.x + other.x) * 0.5,
            (self.y + other.y) * 0.5,
            (self.z + other.z) * 0.5,
        )
    }

    /// Whether all coordinates are finite.
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl Add<Vec2> for Point3 {
    type Output = Point3;

    fn add(self, rhs: Vec2) -> Self::Output {
        self.offset(rhs)
    }
}

/// Component-wise difference, read as a displacement.
impl Sub for Point3 {
    type Output = Point3;

    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
/// Zero-based frame index within one stage.
pub struct FrameIndex(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Half-open frame range `[start, end)`.
pub struct FrameRange {
    /// Inclusive start frame.
    pub start: FrameIndex,
    /// Exclusive end frame.
    pub end: FrameIndex, // exclusive
}

impl FrameRange {
    /// Build a validated range.
    pub fn new(start: FrameIndex, end: FrameIndex) -> ReelResult<Self> {
        if start.0 > end.0 {
            return Err(ReelError::validation("FrameRange start must be <= end"));
        }
        Ok(Self { start, end })
    }

    /// Number of frames covered by the range.
    pub fn len_frames(self) -> u64 {
        self.end.0.saturating_sub(self.start.0)
    }

}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Rational frame rate.
pub struct Fps {
    /// Numerator.
    pub num: u32,
    /// Denominator.
    pub den: u32, // must be > 0
}

impl Fps {
    /// Build a validated frame rate.
    pub fn new(num: u32, den: u32) -> ReelResult<Self> {
        if den == 0 {
            return Err(ReelError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(ReelError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Frame rate as floating point.
    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// Frame at which an event `secs` into the stage lands, rounded to the nearest frame.
    pub fn secs_to_frame(self, secs: f64) -> FrameIndex {
        FrameIndex((secs * self.as_f64()).round().max(0.0) as u64)
    }
}

/// Straight (non-premultiplied) RGBA8 color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
    /// Alpha.
    pub a: u8,
}

impl Rgba8 {
    /// Axis green.
    pub const GREEN_E: Self = Self::opaque(0x69, 0x9C, 0x52);
    /// Data-point red.
    pub const RED: Self = Self::opaque(0xFC, 0x62, 0x55);
    /// Deviation and area blue.
    pub const BLUE: Self = Self::opaque(0x58, 0xC4, 0xDD);
    /// Emphasis green.
    pub const PURE_GREEN: Self = Self::opaque(0x00, 0xFF, 0x00);
    /// Text white.
    pub const WHITE: Self = Self::opaque(0xFF, 0xFF, 0xFF);

    /// Fully opaque color.
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
