//! Relative placement of objects, used to stack formulas below one another.

use crate::foundation::core::Point3;

/// Gap left between an object and the one it is placed next to.
pub const DEFAULT_BUFF: f64 = 0.25;

/// Axis-aligned bounding size of a primitive.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Extent {
    pub width: f64,
    pub height: f64,
}

impl Extent {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Side {
    Up,
    Down,
    Left,
    Right,
}

/// Center for an object of size `placed` so that it sits on `side` of the anchor,
/// `buff` away from the anchor's edge and aligned with the anchor's center on the other axis.
pub fn next_to(
    anchor_center: Point3,
    anchor: Extent,
    placed: Extent,
    side: Side,
    buff: f64,
) -> Point3 {
    let dy = (anchor.height + placed.height) * 0.5 + buff;
    let dx = (anchor.width + placed.width) * 0.5 + buff;
    let Point3 { x, y, z } = anchor_center;
    match side {
        Side::Up => Point3::new(x, y + dy, z),
        Side::Down => Point3::new(x, y - dy, z),
        Side::Left => Point3::new(x - dx, y, z),
        Side::Right => Point3::new(x + dx, y, z),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/place.rs"]
mod tests;
