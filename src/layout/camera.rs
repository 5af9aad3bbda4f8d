use crate::foundation::{
    core::{Point3, Vec2},
    error::{ReelError, ReelResult},
};

/// 2D viewport handed to the engine: where the camera looks and how wide its frame is.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Camera {
    /// Point at the middle of the frame.
    pub center: Point3,
    /// Frame width in scene units.
    pub width: f64,
}

impl Camera {
    pub fn new(center: Point3, width: f64) -> ReelResult<Self> {
        check_width(width)?;
        if !center.is_finite() {
            return Err(ReelError::invalid_frame("camera center must be finite"));
        }
        Ok(Self { center, width })
    }

    pub fn move_to(self, center: Point3) -> Self {
        Self { center, ..self }
    }

    pub fn shift(self, by: Vec2) -> Self {
        self.move_to(self.center + by)
    }

    pub fn set_width(self, width: f64) -> ReelResult<Self> {
        check_width(width)?;
        Ok(Self { width, ..self })
    }

    /// Zoom out by `factor` (values below 1 zoom in).
    pub fn scale(self, factor: f64) -> ReelResult<Self> {
        self.set_width(self.width * factor)
    }
}

fn check_width(width: f64) -> ReelResult<()> {
    if !width.is_finite() || width <= 0.0 {
        return Err(ReelError::invalid_frame(format!(
            "camera width must be finite and > 0, got {width}"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/layout/camera.rs"]
mod tests;
