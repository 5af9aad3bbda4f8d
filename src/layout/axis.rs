//! Affine value-to-space mapping for number lines.

use crate::foundation::{
    core::{Affine, Point3, Vec2},
    error::{ReelError, ReelResult},
};

/// Domain of an axis: `[min, max]` with tick spacing `step`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AxisRange {
    /// Smallest labelled value.
    pub min: f64,
    /// Largest labelled value.
    pub max: f64,
    /// Distance between ticks.
    pub step: f64,
}

impl AxisRange {
    /// Build a range; checked by [`AxisFrame::new`].
    pub const fn new(min: f64, max: f64, step: f64) -> Self {
        Self { min, max, step }
    }

    /// `max - min`.
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Value in the middle of the domain.
    pub fn midpoint(&self) -> f64 {
        (self.min + self.max) * 0.5
    }
}

/// Immutable mapping from data values to scene points.
///
/// The domain is laid out along `direction`, centered on `center`, with `min` at
/// `center - direction * length / 2`. Transforms return new frames.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AxisFrame {
    range: AxisRange,
    length: f64,
    direction: Vec2,
    center: Point3,
}

impl AxisFrame {
    /// Horizontal frame centered on the origin.
    pub fn new(range: AxisRange, length: f64) -> ReelResult<Self> {
        if !length.is_finite() || length <= 0.0 {
            return Err(ReelError::invalid_frame(format!(
                "axis length must be finite and > 0, got {length}"
            )));
        }
        if !range.min.is_finite() || !range.max.is_finite() || range.min >= range.max {
            return Err(ReelError::invalid_frame(format!(
                "axis domain must be finite with min < max, got [{}, {}]",
                range.min, range.max
            )));
        }
        if !range.step.is_finite() || range.step <= 0.0 {
            return Err(ReelError::invalid_frame(format!(
                "axis step must be finite and > 0, got {}",
                range.step
            )));
        }
        Ok(Self {
            range,
            length,
            direction: Vec2::new(1.0, 0.0),
            center: Point3::ORIGIN,
        })
    }

    pub fn range(&self) -> AxisRange {
        self.range
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    /// Unit vector pointing from `min` toward `max`.
    pub fn direction(&self) -> Vec2 {
        self.direction
    }

    pub fn center(&self) -> Point3 {
        self.center
    }

    /// Scene distance covered by one data unit.
    pub fn unit_length(&self) -> f64 {
        self.length / self.range.span()
    }

    /// Scene point of `value`. Values outside the domain extrapolate along the same line.
    pub fn value_to_point(&self, value: f64) -> Point3 {
        let t = (value - self.range.min) / self.range.span() - 0.5;
        self.center + self.direction * (t * self.length)
    }

    /// Endpoint at `min`.
    pub fn start(&self) -> Point3 {
        self.value_to_point(self.range.min)
    }

    /// Endpoint at `max`.
    pub fn end(&self) -> Point3 {
        self.value_to_point(self.range.max)
    }

    /// Tick values from `min` to `max` inclusive.
    pub fn ticks(&self) -> Vec<f64> {
        let count = (self.range.span() / self.range.step + 1e-9).floor() as usize;
        (0..=count)
            .map(|i| self.range.min + self.range.step * i as f64)
            .collect()
    }

    /// Tick values paired with their scene points.
    pub fn tick_points(&self) -> Vec<(f64, Point3)> {
        self.ticks()
            .into_iter()
            .map(|v| (v, self.value_to_point(v)))
            .collect()
    }

    /// Same frame re-centered on `center`.
    pub fn move_to(&self, center: Point3) -> Self {
        Self { center, ..*self }
    }

    /// Same frame translated by `by`.
    pub fn shift(&self, by: Vec2) -> Self {
        self.move_to(self.center + by)
    }

    /// Frame rotated by `angle` radians (counter-clockwise) about `about`.
    pub fn rotate(&self, angle: f64, about: Point3) -> Self {
        Self {
            direction: (Affine::rotate(angle) * self.direction.to_point()).to_vec2(),
            center: rotate_point(self.center, angle, about),
            ..*self
        }
    }

    /// Frame rotated in place about its own center.
    pub fn rotate_about_center(&self, angle: f64) -> Self {
        self.rotate(angle, self.center)
    }

    /// Frame stretched by `factor` about its center.
    pub fn scale(&self, factor: f64) -> ReelResult<Self> {
        if !factor.is_finite() || factor <= 0.0 {
            return Err(ReelError::invalid_frame(format!(
                "axis scale factor must be finite and > 0, got {factor}"
            )));
        }
        Ok(Self {
            length: self.length * factor,
            ..*self
        })
    }
}

/// Rotate `frame` by `angle` radians about `about`; an isometry of every mapped point.
pub fn rotate(frame: &AxisFrame, angle: f64, about: Point3) -> AxisFrame {
    frame.rotate(angle, about)
}

/// Rotate a single point with the same isometry [`AxisFrame::rotate`] applies.
pub fn rotate_point(p: Point3, angle: f64, about: Point3) -> Point3 {
    let a = Affine::rotate_about(angle, about.to_point());
    p.with_plane(a * p.to_point())
}

#[cfg(test)]
#[path = "../../tests/unit/layout/axis.rs"]
mod tests;
