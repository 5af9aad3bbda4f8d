use super::*;
use crate::{direct::step::StepBody, stats::aggregate::{HEIGHT_SAMPLE, compute_deviation_stats}};
use approx::assert_relative_eq;

fn build() -> SceneScript {
    let stats = compute_deviation_stats(&HEIGHT_SAMPLE).unwrap();
    script(&HEIGHT_SAMPLE, &stats).unwrap()
}

#[test]
fn script_is_well_ordered() {
    build().validate().unwrap();
}

#[test]
fn deviation_unit_matches_axis_scale() {
    assert_relative_eq!(deviation_unit(), 0.3, epsilon = 1e-12);
}

#[test]
fn slots_fill_lower_row_first() {
    assert_eq!(square_slot(0), (0.0, -18.0));
    assert_eq!(square_slot(3), (30.0, -18.0));
    assert_eq!(square_slot(5), (-5.0, -6.0));
    assert_eq!(square_slot(8), (25.0, -6.0));
}

#[test]
fn one_dot_per_observation() {
    let s = build();
    let created = s
        .steps
        .iter()
        .find(|st| st.label == "draw data dots")
        .unwrap();
    let Change::Create { objects } = &created.plays()[0].change else {
        panic!("expected create");
    };
    assert_eq!(objects.len(), 9);
    // Second observation of 140 sits one stack step above the first.
    let y = |i: usize| objects[i].1.primitive.center().y;
    assert_relative_eq!(y(3) - y(2), STACK_STEP, epsilon = 1e-12);
}

#[test]
fn eight_squares_merge_into_aggregate() {
    let s = build();
    let merge = s.steps.iter().find(|st| st.label == "merge squares").unwrap();
    let Change::Replace { from, to } = &merge.plays()[0].change else {
        panic!("expected replace");
    };
    assert_eq!(from.len(), 8);
    let Primitive::Square { side, center, .. } = &to[0].1.primitive else {
        panic!("expected square");
    };
    assert_relative_eq!(side / deviation_unit(), 3000f64.sqrt(), epsilon = 1e-9);
    assert_eq!(*center, AGGREGATE_CENTER);
    assert_eq!(merge.duration_s(), 2.0);
}

#[test]
fn camera_ends_zoomed_out() {
    let s = build();
    let zoom = s
        .steps
        .iter()
        .find(|st| st.label == "zoom out for squares")
        .unwrap();
    let StepBody::Play { plays, .. } = &zoom.body else {
        panic!("expected play");
    };
    let Change::Camera { center, width } = &plays[0].change else {
        panic!("expected camera change");
    };
    assert_eq!(*width, Some(60.0));
    let c = center.unwrap();
    assert_relative_eq!(c.x, 27.0, epsilon = 1e-9);
    assert_relative_eq!(c.y, -12.0, epsilon = 1e-9);
}

#[test]
fn empty_dataset_is_degenerate() {
    let stats = compute_deviation_stats(&HEIGHT_SAMPLE).unwrap();
    assert!(matches!(
        script(&[], &stats),
        Err(ReelError::DegenerateDataset(_))
    ));
}
