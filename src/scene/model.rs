use std::fmt;

use crate::{
    foundation::{
        core::{Point3, Rgba8, Vec2},
        error::{ReelError, ReelResult},
    },
    layout::{
        axis::{AxisFrame, rotate_point},
        place::Extent,
    },
};

/// Stable key of a visual object within one stage.
#[derive(
    Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct ObjectId(pub String);

impl ObjectId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ObjectId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ObjectId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// A number line drawn from an [`AxisFrame`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AxisPrimitive {
    pub frame: AxisFrame,
    /// Whether tick values are typeset below the ticks.
    pub numbers: bool,
    pub font_size: f64,
    pub stroke_width: f64,
    pub color: Rgba8,
}

/// Drawable shapes the engine knows how to render.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum Primitive {
    Axis(AxisPrimitive),
    Dot {
        center: Point3,
        radius: f64,
        color: Rgba8,
    },
    Line {
        start: Point3,
        end: Point3,
        color: Rgba8,
        /// Fraction of each dash period that is drawn; `None` for a solid line.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        dash_ratio: Option<f64>,
    },
    Square {
        center: Point3,
        side: f64,
        color: Rgba8,
        fill_opacity: f64,
    },
    /// Plain text.
    Label {
        text: String,
        position: Point3,
        font_size: f64,
    },
    /// Typeset mathematical expression (TeX source).
    Math {
        tex: String,
        position: Point3,
        scale: f64,
    },
}

// Rough typesetting metrics used only for relative placement.
const LABEL_EM_PER_POINT: f64 = 1.0 / 80.0;
const MATH_LINE_HEIGHT: f64 = 0.55;
const MATH_FRACTION_HEIGHT: f64 = 1.3;
const MATH_GLYPH_WIDTH: f64 = 0.3;

impl Primitive {
    /// Solid line between two points.
    pub fn line(start: Point3, end: Point3, color: Rgba8) -> Self {
        Self::Line {
            start,
            end,
            color,
            dash_ratio: None,
        }
    }

    /// Bounding-box center.
    pub fn center(&self) -> Point3 {
        match self {
            Self::Axis(a) => a.frame.center(),
            Self::Dot { center, .. } | Self::Square { center, .. } => *center,
            Self::Line { start, end, .. } => start.midpoint(*end),
            Self::Label { position, .. } | Self::Math { position, .. } => *position,
        }
    }

    /// Approximate bounding size. Text sizes are estimates; the engine typesets for real.
    pub fn extent(&self) -> Extent {
        match self {
            Self::Axis(a) => {
                let (s, e) = (a.frame.start(), a.frame.end());
                Extent::new((e.x - s.x).abs(), (e.y - s.y).abs())
            }
            Self::Dot { radius, .. } => Extent::new(2.0 * radius, 2.0 * radius),
            Self::Line { start, end, .. } => {
                Extent::new((end.x - start.x).abs(), (end.y - start.y).abs())
            }
            Self::Square { side, .. } => Extent::new(*side, *side),
            Self::Label {
                text, font_size, ..
            } => {
                let em = font_size * LABEL_EM_PER_POINT;
                Extent::new(em * 0.6 * text.chars().count() as f64, em)
            }
            Self::Math { tex, scale, .. } => {
                let height = if tex.contains("\\frac") {
                    MATH_FRACTION_HEIGHT
                } else {
                    MATH_LINE_HEIGHT
                };
                Extent::new(
                    scale * MATH_GLYPH_WIDTH * visible_glyphs(tex) as f64,
                    scale * height,
                )
            }
        }
    }

    pub fn moved_to(&self, to: Point3) -> Self {
        let by = to - self.center();
        self.shifted(Vec2::new(by.x, by.y))
    }

    pub fn shifted(&self, by: Vec2) -> Self {
        let mut out = self.clone();
        match &mut out {
            Self::Axis(a) => a.frame = a.frame.shift(by),
            Self::Dot { center, .. } | Self::Square { center, .. } => *center = *center + by,
            Self::Line { start, end, .. } => {
                *start = *start + by;
                *end = *end + by;
            }
            Self::Label { position, .. } | Self::Math { position, .. } => {
                *position = *position + by
            }
        }
        out
    }

    /// Uniform scale about the bounding-box center.
    pub fn scaled(&self, factor: f64) -> ReelResult<Self> {
        if !factor.is_finite() || factor <= 0.0 {
            return Err(ReelError::validation(format!(
                "scale factor must be finite and > 0, got {factor}"
            )));
        }
        let c = self.center();
        let mut out = self.clone();
        match &mut out {
            Self::Axis(a) => a.frame = a.frame.scale(factor)?,
            Self::Dot { radius, .. } => *radius *= factor,
            Self::Line { start, end, .. } => {
                *start = scale_about(*start, c, factor);
                *end = scale_about(*end, c, factor);
            }
            Self::Square { side, .. } => *side *= factor,
            Self::Label { font_size, .. } => *font_size *= factor,
            Self::Math { scale, .. } => *scale *= factor,
        }
        Ok(out)
    }

    /// Rotate the primitive's anchor points about `about`.
    pub fn rotated(&self, angle: f64, about: Point3) -> Self {
        let mut out = self.clone();
        match &mut out {
            Self::Axis(a) => a.frame = a.frame.rotate(angle, about),
            Self::Dot { center, .. } | Self::Square { center, .. } => {
                *center = rotate_point(*center, angle, about)
            }
            Self::Line { start, end, .. } => {
                *start = rotate_point(*start, angle, about);
                *end = rotate_point(*end, angle, about);
            }
            Self::Label { position, .. } | Self::Math { position, .. } => {
                *position = rotate_point(*position, angle, about)
            }
        }
        out
    }

    /// Same primitive drawn in `color`; text primitives have no color and are unchanged.
    pub fn recolored(&self, to: Rgba8) -> Self {
        let mut out = self.clone();
        match &mut out {
            Self::Axis(a) => a.color = to,
            Self::Dot { color, .. } | Self::Line { color, .. } | Self::Square { color, .. } => {
                *color = to
            }
            Self::Label { .. } | Self::Math { .. } => {}
        }
        out
    }
}

fn scale_about(p: Point3, c: Point3, factor: f64) -> Point3 {
    let d = p - c;
    Point3::new(c.x + d.x * factor, c.y + d.y * factor, c.z + d.z * factor)
}

fn visible_glyphs(tex: &str) -> usize {
    let mut n = 0;
    let mut chars = tex.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                while chars.peek().is_some_and(|c| c.is_ascii_alphabetic()) {
                    chars.next();
                }
            }
            '{' | '}' | '^' | '_' | ' ' => {}
            _ => n += 1,
        }
    }
    n.max(1)
}

/// The state of one object: what it looks like and how opaque it is.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Visual {
    pub primitive: Primitive,
    pub opacity: f64,
}

impl Visual {
    /// Fully opaque visual.
    pub fn new(primitive: Primitive) -> Self {
        Self {
            primitive,
            opacity: 1.0,
        }
    }

    /// Same opacity, different shape.
    pub fn with_primitive(&self, primitive: Primitive) -> Self {
        Self {
            primitive,
            opacity: self.opacity,
        }
    }
}

impl From<Primitive> for Visual {
    fn from(value: Primitive) -> Self {
        Self::new(value)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
