//! The three scripted stages of the reel.

pub mod algebraic;
pub mod geometric;
pub mod introduction;

use crate::{
    foundation::{
        core::Rgba8,
        error::ReelResult,
    },
    layout::axis::{AxisFrame, AxisRange},
    scene::model::{AxisPrimitive, Primitive},
    stage::script::SceneScript,
    stats::aggregate::{DataPoint, compute_deviation_stats},
};

/// Stroke width of a plain number line.
pub(crate) const DEFAULT_STROKE: f64 = 2.0;

/// Number line in the reel's axis color, centered on the origin and pointing right.
pub(crate) fn number_line(
    range: AxisRange,
    length: f64,
    font_size: f64,
    stroke_width: f64,
    numbers: bool,
) -> ReelResult<AxisPrimitive> {
    Ok(AxisPrimitive {
        frame: AxisFrame::new(range, length)?,
        numbers,
        font_size,
        stroke_width,
        color: Rgba8::GREEN_E,
    })
}

pub(crate) fn axis(prim: AxisPrimitive) -> Primitive {
    Primitive::Axis(prim)
}

/// Build all three stage scripts for `data`, in playback order.
#[tracing::instrument(skip(data), fields(points = data.len()))]
pub fn build_reel(data: &[DataPoint]) -> ReelResult<Vec<SceneScript>> {
    let stats = compute_deviation_stats(data)?;
    tracing::debug!(
        mean = stats.mean,
        count = stats.count,
        variance = stats.variance,
        "dataset aggregated"
    );
    Ok(vec![
        introduction::script()?,
        geometric::script(data, &stats)?,
        algebraic::script(&stats)?,
    ])
}

#[cfg(test)]
#[path = "../tests/unit/stages.rs"]
mod tests;
