//! Geometric derivation: dots on a number line become deviation lines, the lines become
//! squares, and the squares merge into one aggregate square.

use std::f64::consts::FRAC_PI_2;

use crate::{
    direct::{
        director::Capabilities,
        step::{Change, SceneStep},
    },
    foundation::{
        core::{LEFT, Point3, Rgba8, UP, Vec2},
        error::{ReelError, ReelResult},
        math::nearly_zero,
    },
    layout::{
        axis::{AxisRange, rotate_point},
        camera::Camera,
    },
    scene::model::{ObjectId, Primitive, Visual},
    stage::{machine::StageId, script::SceneScript},
    stages::{DEFAULT_STROKE, axis, number_line},
    stats::aggregate::{AggregateResult, DataPoint, format_quantity},
};

pub const DOT_AXIS: &str = "dot-axis";
pub const VERTICAL_AXIS: &str = "vertical-axis";
pub const MEAN_LINE: &str = "mean-line";
pub const AGGREGATE_SQUARE: &str = "aggregate-square";

const HEIGHT_RANGE: AxisRange = AxisRange::new(90.0, 200.0, 10.0);
const HEIGHT_LENGTH: f64 = 110.0;
const HEIGHT_FONT: f64 = 40.0;
/// Camera width and label size of each widening step.
const WIDEN: [(f64, f64); 3] = [(37.0, 110.0), (64.0, 180.0), (90.0, 250.0)];
const WIDE_STROKE: f64 = 20.0;

const DOT_RANGE: AxisRange = AxisRange::new(110.0, 190.0, 10.0);
const DOT_AXIS_LENGTH: f64 = 8.0;
const DOT_AXIS_FONT: f64 = 30.0;
const DOT_RADIUS: f64 = 0.05;
/// Vertical gap between stacked repeats of one value.
const STACK_STEP: f64 = 0.5;
/// Value the camera and both short axes are anchored on.
const FOCUS_VALUE: f64 = 150.0;

const LABEL_OFFSET: f64 = 0.5;
const SLIDE_LEFT: f64 = 6.0;
const MEAN_LINE_END_X: f64 = 10.0;
const DASH_RATIO: f64 = 0.3;

const SQUARE_SCALE: f64 = 3.0;
const SQUARE_OFFSET: Vec2 = Vec2::new(3.0, -3.0);
const SQUARE_FILL: f64 = 0.8;
/// Slots in the lower row of plucked squares.
const LOWER_ROW_SLOTS: usize = 4;
const AGGREGATE_CENTER: Point3 = Point3::xy(26.0, -10.0);

/// Scene length of one data unit on a plucked square's side.
///
/// The aggregate square's side divided by this is `√SSD` in data units.
pub fn deviation_unit() -> f64 {
    DOT_AXIS_LENGTH / DOT_RANGE.span() * SQUARE_SCALE
}

fn height_axis_id(k: usize) -> ObjectId {
    ObjectId::new(format!("height-axis-{k}"))
}

fn dot_id(i: usize) -> ObjectId {
    ObjectId::new(format!("dot-{i}"))
}

fn deviation_id(i: usize) -> ObjectId {
    ObjectId::new(format!("deviation-{i}"))
}

fn square_id(i: usize) -> ObjectId {
    ObjectId::new(format!("square-{i}"))
}

fn label_id(v: f64) -> ObjectId {
    ObjectId::new(format!("tick-label-{}", format_quantity(v)))
}

fn dot(center: Point3) -> Visual {
    Visual::new(Primitive::Dot {
        center,
        radius: DOT_RADIUS,
        color: Rgba8::RED,
    })
}

/// Offset of the `slot`-th plucked line: four slots along the bottom, the rest above.
fn square_slot(slot: usize) -> (f64, f64) {
    let movement = 10.0 * slot as f64;
    if slot < LOWER_ROW_SLOTS {
        (movement, -18.0)
    } else {
        (movement - 55.0, -6.0)
    }
}

pub fn script(data: &[DataPoint], stats: &AggregateResult) -> ReelResult<SceneScript> {
    let height = number_line(HEIGHT_RANGE, HEIGHT_LENGTH, HEIGHT_FONT, DEFAULT_STROKE, true)?;
    let focus = height.frame.value_to_point(FOCUS_VALUE);
    let mut camera = Camera::new(focus, 10.0)?;
    let mut s = SceneScript::new(
        StageId::DerivationGeometric,
        Capabilities::CAMERA_AND_ZOOM,
        Some(camera),
    );

    s.push(SceneStep::instant(
        "show height axis",
        [Change::add(height_axis_id(0), Visual::new(axis(height.clone())))],
    ));
    let height_center = height.frame.center();
    for (k, (width, font)) in WIDEN.into_iter().enumerate() {
        let mut wider = number_line(HEIGHT_RANGE, HEIGHT_LENGTH, font, WIDE_STROKE, true)?;
        wider.frame = wider.frame.move_to(height_center);
        camera = camera.set_width(width)?;
        s.push(SceneStep::play(
            format!("widen view {}", k + 1),
            [
                Change::Camera {
                    center: None,
                    width: Some(width),
                },
                Change::replace(height_axis_id(k), height_axis_id(k + 1), axis(wider)),
            ],
        ));
    }
    s.push(SceneStep::wait(2.0));

    let mut dot_axis = number_line(DOT_RANGE, DOT_AXIS_LENGTH, DOT_AXIS_FONT, DEFAULT_STROKE, true)?;
    dot_axis.frame = dot_axis.frame.move_to(Point3::xy(focus.x, height_center.y));
    camera = camera.set_width(9.5)?;
    s.push(SceneStep::play(
        "swap in the data axis",
        [
            Change::replace(height_axis_id(WIDEN.len()), DOT_AXIS, axis(dot_axis.clone())),
            Change::Camera {
                center: None,
                width: Some(camera.width),
            },
        ],
    ));
    s.push(SceneStep::wait(2.0));

    let mut dots: Vec<Point3> = data
        .iter()
        .flat_map(|p| {
            let base = dot_axis.frame.value_to_point(p.value);
            (1..=p.multiplicity).map(move |k| base + UP * (STACK_STEP * f64::from(k)))
        })
        .collect();
    let last = dots
        .len()
        .checked_sub(1)
        .ok_or_else(|| ReelError::degenerate_dataset("no data points to lay out"))?;
    s.push(
        SceneStep::play(
            "draw data dots",
            [Change::Create {
                objects: dots
                    .iter()
                    .enumerate()
                    .map(|(i, c)| (dot_id(i), dot(*c)))
                    .collect(),
            }],
        )
        .run_time(2.0),
    );

    // Upright axis without numbers; tick values become separate labels beside it.
    let pivot = dot_axis.frame.value_to_point(FOCUS_VALUE);
    let mut vertical =
        number_line(DOT_RANGE, DOT_AXIS_LENGTH, DOT_AXIS_FONT, DEFAULT_STROKE, false)?;
    vertical.frame = vertical.frame.rotate_about_center(FRAC_PI_2).move_to(pivot);
    let labels: Vec<(ObjectId, Visual)> = vertical
        .frame
        .tick_points()
        .into_iter()
        .map(|(v, p)| {
            let label = Primitive::Label {
                text: format_quantity(v),
                position: p + LEFT * LABEL_OFFSET,
                font_size: DOT_AXIS_FONT,
            };
            (label_id(v), Visual::new(label))
        })
        .collect();
    for d in &mut dots {
        *d = rotate_point(*d, -FRAC_PI_2, pivot);
    }
    let dot_ids: Vec<ObjectId> = (0..dots.len()).map(dot_id).collect();

    s.push(SceneStep::play(
        "hide dots",
        [Change::FadeOut {
            ids: dot_ids.clone(),
        }],
    ));
    camera = camera.set_width(15.0)?;
    s.push(
        SceneStep::play(
            "turn axis upright",
            [
                Change::replace(DOT_AXIS, VERTICAL_AXIS, axis(vertical.clone())),
                Change::Camera {
                    center: None,
                    width: Some(camera.width),
                },
                Change::FadeIn {
                    objects: dots
                        .iter()
                        .enumerate()
                        .map(|(i, c)| (dot_id(i), dot(*c)))
                        .collect(),
                },
                Change::FadeIn {
                    objects: labels.clone(),
                },
            ],
        )
        .run_time(2.0),
    );
    s.push(SceneStep::wait(1.0));

    let slide = LEFT * SLIDE_LEFT;
    let mut group = vec![ObjectId::new(VERTICAL_AXIS)];
    group.extend(labels.iter().map(|(id, _)| id.clone()));
    group.extend(dot_ids.iter().cloned());
    s.push(
        SceneStep::play("slide left", [Change::Shift { ids: group, by: slide }]).run_time(2.0),
    );
    vertical.frame = vertical.frame.shift(slide);
    for d in &mut dots {
        *d = *d + slide;
    }
    s.push(SceneStep::wait(1.0));

    let mean_y = vertical.frame.value_to_point(stats.mean).y;
    let mean_line = Primitive::Line {
        start: Point3::xy(vertical.frame.center().x, mean_y),
        end: Point3::xy(MEAN_LINE_END_X, mean_y),
        color: Rgba8::WHITE,
        dash_ratio: Some(DASH_RATIO),
    };
    s.push(SceneStep::play(
        "draw mean line",
        [Change::create(MEAN_LINE, mean_line)],
    ));
    s.push(SceneStep::wait(1.0));

    let mut next_x = dots[last].x + 1.0;
    for i in (0..dots.len()).rev() {
        dots[i] = Point3::xy(next_x, dots[i].y);
        s.push(
            SceneStep::play(format!("spread dot {i}"), [Change::move_to(dot_id(i), dots[i])])
                .run_time(0.5),
        );
        next_x += 1.0;
    }

    let mut lines: Vec<(usize, Point3, Point3)> = Vec::with_capacity(dots.len());
    for i in (0..dots.len()).rev() {
        let (start, end) = (dots[i], Point3::xy(dots[i].x, mean_y));
        s.push(
            SceneStep::play(
                format!("draw deviation {i}"),
                [Change::create(
                    deviation_id(i),
                    Primitive::line(start, end, Rgba8::BLUE),
                )],
            )
            .run_time(0.5),
        );
        s.push(
            SceneStep::play(format!("drop dot {i}"), [Change::fade_out(dot_id(i))]).run_time(0.1),
        );
        lines.push((i, start, end));
    }
    s.push(SceneStep::wait(1.0));

    camera = camera.scale(4.0)?.shift(Vec2::new(22.0, -12.0));
    s.push(SceneStep::play(
        "zoom out for squares",
        [Change::Camera {
            center: Some(camera.center),
            width: Some(camera.width),
        }],
    ));
    s.push(SceneStep::wait(1.0));

    let mut squares: Vec<ObjectId> = Vec::new();
    let mut total_area = 0.0;
    for (slot, (i, start, end)) in lines.into_iter().enumerate() {
        let length = start.distance(end);
        if nearly_zero(length) {
            s.push(
                SceneStep::play(
                    format!("drop empty deviation {i}"),
                    [Change::fade_out(deviation_id(i))],
                )
                .run_time(0.1),
            );
            continue;
        }

        let (x_shift, y) = square_slot(slot);
        let placed_start = Point3::xy(start.x + x_shift, y);
        let placed_end = Point3::xy(end.x + x_shift, y - length);
        let mid = placed_start.midpoint(placed_end);
        let half = Vec2::new(
            (placed_start.x - mid.x) * SQUARE_SCALE,
            (placed_start.y - mid.y) * SQUARE_SCALE,
        );
        let (top, bottom) = (mid + half, mid + (-half));
        s.push(SceneStep::play(
            format!("pluck deviation {i}"),
            [Change::morph(
                deviation_id(i),
                Primitive::line(top, bottom, Rgba8::BLUE),
            )],
        ));

        let side = SQUARE_SCALE * length;
        total_area += side * side;
        let square = Primitive::Square {
            center: top + SQUARE_OFFSET,
            side,
            color: Rgba8::BLUE,
            fill_opacity: SQUARE_FILL,
        };
        s.push(SceneStep::play(
            format!("square deviation {i}"),
            [Change::replace(deviation_id(i), square_id(i), square)],
        ));
        squares.push(square_id(i));
    }
    s.push(SceneStep::wait(1.0));

    let mut clear = vec![ObjectId::new(MEAN_LINE), ObjectId::new(VERTICAL_AXIS)];
    clear.extend(labels.into_iter().map(|(id, _)| id));
    s.push(SceneStep::play("clear axis", [Change::FadeOut { ids: clear }]));

    let aggregate = Primitive::Square {
        center: AGGREGATE_CENTER,
        side: total_area.sqrt(),
        color: Rgba8::BLUE,
        fill_opacity: 1.0,
    };
    s.push(
        SceneStep::play(
            "merge squares",
            [Change::Replace {
                from: squares,
                to: vec![(ObjectId::new(AGGREGATE_SQUARE), Visual::new(aggregate))],
            }],
        )
        .run_time(2.0),
    );
    s.push(SceneStep::wait(1.0));
    Ok(s)
}

#[cfg(test)]
#[path = "../../tests/unit/stages/geometric.rs"]
mod tests;
