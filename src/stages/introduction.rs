//! Opening pan along a fine-grained number line.

use crate::{
    direct::{
        director::Capabilities,
        step::{Change, Play, SceneStep},
    },
    foundation::error::ReelResult,
    layout::{axis::AxisRange, camera::Camera},
    scene::model::Visual,
    stage::{machine::StageId, script::SceneScript},
    stages::{DEFAULT_STROKE, axis, number_line},
};

pub const FINE_LINE: &str = "number-line-fine";
pub const COARSE_LINE: &str = "number-line-coarse";

const LINE_LENGTH: f64 = 170.0;
const FONT_SIZE: f64 = 40.0;
const CAMERA_WIDTH: f64 = 10.0;
const PAN_FROM: f64 = 2.0;
const PAN_TO: f64 = 150.0;

pub fn script() -> ReelResult<SceneScript> {
    let fine = number_line(
        AxisRange::new(-10.0, 160.0, 1.0),
        LINE_LENGTH,
        FONT_SIZE,
        DEFAULT_STROKE,
        true,
    )?;
    let coarse = number_line(
        AxisRange::new(-10.0, 160.0, 10.0),
        LINE_LENGTH,
        FONT_SIZE,
        DEFAULT_STROKE,
        true,
    )?;
    let camera = Camera::new(fine.frame.value_to_point(PAN_FROM), CAMERA_WIDTH)?;
    let pan_to = fine.frame.value_to_point(PAN_TO);

    Ok(
        SceneScript::new(StageId::Introduction, Capabilities::CAMERA, Some(camera))
            .step(SceneStep::instant(
                "show fine number line",
                [Change::add(FINE_LINE, Visual::new(axis(fine)))],
            ))
            .step(SceneStep::wait(1.0))
            .step(
                SceneStep::play(
                    "pan along the line",
                    [Change::Camera {
                        center: Some(pan_to),
                        width: None,
                    }],
                )
                .run_time(5.0),
            )
            .step(SceneStep::wait(2.0))
            .step(SceneStep::play(
                "switch to steps of ten",
                [
                    Play::new(Change::fade_out(FINE_LINE)).run_time(1.0),
                    Play::new(Change::fade_in(COARSE_LINE, Visual::new(axis(coarse))))
                        .run_time(2.0),
                ],
            ))
            .step(SceneStep::wait(1.0)),
    )
}

#[cfg(test)]
#[path = "../../tests/unit/stages/introduction.rs"]
mod tests;
