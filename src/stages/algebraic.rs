//! Algebraic derivation: fill the variance and standard-deviation formulas with the numbers
//! the geometric stage produced.

use crate::{
    direct::{
        director::Capabilities,
        step::{Change, Play, SceneStep},
    },
    foundation::{
        core::{DOWN, LEFT, Point3, RIGHT, Rgba8, UP},
        error::{ReelError, ReelResult},
    },
    layout::place::{DEFAULT_BUFF, Side, next_to},
    scene::model::{ObjectId, Primitive, Visual},
    stage::{machine::StageId, script::SceneScript},
    stats::aggregate::{AggregateResult, format_quantity},
};

pub const SQUARE: &str = "variance-square";
pub const SD_FORMULA: &str = "sd-formula";
pub const VARIANCE_FORMULA: &str = "variance-formula";
pub const SURFACE: &str = "surface";
pub const FILLED_VARIANCE: &str = "filled-variance";
pub const VARIANCE: &str = "variance";
pub const SQUARE_COPY: &str = "variance-square-copy";
pub const SD_LINE: &str = "sd-line";
pub const FILLED_SD: &str = "filled-sd";
pub const RESULT: &str = "sd-result";

const SQUARE_SIDE: f64 = 4.0;
const MATH_SCALE: f64 = 0.7;
const SD_FORMULA_AT: Point3 = Point3::xy(5.0, 3.5);
const VARIANCE_NUDGE: f64 = 0.2;
const UNIT_SIDE: f64 = 1.0;
const UNIT_ROW_START: f64 = -4.0;
const UNIT_SPACING: f64 = 1.2;

fn unit_square_id(i: u32) -> ObjectId {
    ObjectId::new(format!("unit-square-{i}"))
}

fn square(center: Point3, side: f64) -> Primitive {
    Primitive::Square {
        center,
        side,
        color: Rgba8::BLUE,
        fill_opacity: 1.0,
    }
}

fn math(tex: impl Into<String>, position: Point3) -> Primitive {
    Primitive::Math {
        tex: tex.into(),
        position,
        scale: MATH_SCALE,
    }
}

/// Formula typeset directly below `anchor`.
fn math_below(anchor: &Primitive, tex: impl Into<String>) -> Primitive {
    let m = math(tex, Point3::ORIGIN);
    let at = next_to(
        anchor.center(),
        anchor.extent(),
        m.extent(),
        Side::Down,
        DEFAULT_BUFF,
    );
    m.moved_to(at)
}

/// Surface caption as it appears on screen. The narrated caption drops the square on the
/// deviation; the number is still the sum of squares.
fn surface_tex(ssd: &str) -> String {
    format!(r"\sum_{{i=1}}^{{i=n}}(Y_i - \overline{{Y}}) = {ssd}")
}

/// Filled-in variance as it appears on screen. The narrated numerator reads `SSD^2` while
/// the value shown next (`s^2_y = variance`) is `SSD / (n - 1)`.
fn filled_variance_tex(ssd: &str, dof: u32) -> String {
    format!(r"s^2_y = \frac{{{ssd}^2}}{{{dof}}}")
}

pub fn script(stats: &AggregateResult) -> ReelResult<SceneScript> {
    if stats.count <= 1 {
        return Err(ReelError::degenerate_dataset(format!(
            "cannot split the variance square over {} observations",
            stats.count
        )));
    }
    let ssd = format_quantity(stats.sum_of_squared_deviations);
    let dof = stats.degrees_of_freedom();
    let variance = format_quantity(stats.variance);
    let sd = format_quantity(stats.standard_deviation);

    let big = square(Point3::ORIGIN, SQUARE_SIDE);
    let sd_formula = math(r"s_y = \sqrt{s^2_y}", SD_FORMULA_AT);
    let variance_formula = math_below(
        &sd_formula,
        r"s^2_y = \frac{\sum_{i=1}^{n} (Y_i - \overline{Y})^2}{n - 1}",
    )
    .shifted(LEFT * VARIANCE_NUDGE);
    let surface = math_below(&big, surface_tex(&ssd));
    let filled_variance = math_below(&variance_formula, filled_variance_tex(&ssd, dof));

    let units: Vec<(ObjectId, Visual)> = (0..dof)
        .map(|i| {
            let c = Point3::xy(UNIT_ROW_START + UNIT_SPACING * f64::from(i), 0.0);
            (unit_square_id(i), Visual::new(square(c, UNIT_SIDE)))
        })
        .collect();
    let survivor = unit_square_id(0);
    let survivor_prim = square(
        Point3::xy(UNIT_ROW_START, 0.0) + RIGHT * 3.0,
        UNIT_SIDE,
    );

    let variance_value = math_below(&filled_variance, format!("s^2_y = {variance}"));
    let variance_under_square = math_below(&survivor_prim, format!("s^2_y = {variance}")).center();

    let copy = survivor_prim.shifted(RIGHT * 2.0);
    let copy_center = copy.center();
    let bottom = copy_center + DOWN * (UNIT_SIDE / 2.0);
    let sd_line = Primitive::line(bottom, bottom + UP * UNIT_SIDE, Rgba8::BLUE);

    let filled_sd = math_below(&sd_formula, format!(r"s_y = \sqrt{{{variance}}}"));
    let result = math_below(&filled_sd, format!("s_y = {sd}"));
    let result_under_line = math_below(&sd_line, format!("s_y = {sd}")).center();

    let s = SceneScript::new(StageId::DerivationAlgebraic, Capabilities::NONE, None)
        .step(SceneStep::instant(
            "show variance square",
            [Change::add(SQUARE, big)],
        ))
        .step(SceneStep::play(
            "write sd formula",
            [Change::create(SD_FORMULA, sd_formula)],
        ))
        .step(SceneStep::wait(1.0))
        .step(SceneStep::play(
            "write variance formula",
            [Change::create(VARIANCE_FORMULA, variance_formula)],
        ))
        .step(SceneStep::wait(1.0))
        .step(SceneStep::play(
            "write surface",
            [Change::create(SURFACE, surface)],
        ))
        .step(SceneStep::wait(1.0))
        .step(SceneStep::play(
            "fill in variance",
            [Change::create(FILLED_VARIANCE, filled_variance)],
        ))
        .step(SceneStep::play(
            "split square",
            [
                Change::Replace {
                    from: vec![ObjectId::new(SQUARE)],
                    to: units,
                },
                Change::fade_out(SURFACE),
            ],
        ))
        .step(SceneStep::wait(1.0))
        .step(SceneStep::play(
            "keep one unit square",
            [Change::FadeOut {
                ids: (1..dof).map(unit_square_id).collect(),
            }],
        ))
        .step(SceneStep::wait(1.0))
        .step(SceneStep::play(
            "center unit square",
            [Change::Shift {
                ids: vec![survivor.clone()],
                by: RIGHT * 3.0,
            }],
        ))
        .step(SceneStep::wait(1.0))
        .step(SceneStep::play(
            "write variance",
            [Change::create(VARIANCE, variance_value)],
        ))
        .step(SceneStep::wait(1.0))
        .step(SceneStep::play(
            "move variance under square",
            [
                Change::move_to(VARIANCE, variance_under_square),
                Change::fade_out(FILLED_VARIANCE),
                Change::fade_out(VARIANCE_FORMULA),
            ],
        ))
        .step(SceneStep::wait(1.0))
        .step(
            SceneStep::play(
                "recall sd formula",
                [Change::Indicate {
                    id: ObjectId::new(SD_FORMULA),
                    scale_factor: 1.5,
                    color: Rgba8::PURE_GREEN,
                }],
            )
            .run_time(2.0),
        )
        .step(SceneStep::play(
            "copy unit square",
            [Change::ReplaceFromCopy {
                from: survivor,
                to: (ObjectId::new(SQUARE_COPY), Visual::new(survivor_prim)),
            }],
        ))
        .step(SceneStep::play(
            "move copy aside",
            [Change::move_to(SQUARE_COPY, copy_center)],
        ))
        .step(SceneStep::wait(1.0))
        .step(SceneStep::play(
            "square becomes its side",
            [Change::replace(SQUARE_COPY, SD_LINE, sd_line)],
        ))
        .step(SceneStep::wait(1.0))
        .step(SceneStep::play(
            "fill in sd",
            [Change::create(FILLED_SD, filled_sd)],
        ))
        .step(SceneStep::wait(1.0))
        .step(SceneStep::play(
            "write result",
            [Change::create(RESULT, result)],
        ))
        .step(SceneStep::play(
            "move result under line",
            [
                Play::new(Change::move_to(RESULT, result_under_line)),
                Play::new(Change::fade_out(FILLED_SD)),
            ],
        ))
        .step(SceneStep::wait(1.0));
    Ok(s)
}

#[cfg(test)]
#[path = "../../tests/unit/stages/algebraic.rs"]
mod tests;
