use super::*;
use crate::{
    foundation::core::{Point3, Rgba8},
    scene::model::Primitive,
};

fn dot(x: f64) -> Visual {
    Visual::new(Primitive::Dot {
        center: Point3::xy(x, 0.0),
        radius: 0.05,
        color: Rgba8::RED,
    })
}

fn timing(start_s: f64) -> Timing {
    Timing::new(start_s, 1.0, Ease::Smooth).unwrap()
}

fn single(kind: TransitionKind, id: &str, start_s: f64) -> TransitionDirective {
    let (from, to) = match kind {
        TransitionKind::Add | TransitionKind::Create | TransitionKind::FadeIn => {
            (None, Some(dot(0.0)))
        }
        TransitionKind::Remove | TransitionKind::FadeOut => (Some(dot(0.0)), None),
        _ => (Some(dot(0.0)), Some(dot(1.0))),
    };
    plan_transition(kind, id.into(), from, to, timing(start_s))
        .unwrap()
        .remove(0)
}

#[test]
fn endpoints_must_fit_the_kind() {
    let err = plan_transition(
        TransitionKind::FadeIn,
        "a".into(),
        Some(dot(0.0)),
        Some(dot(1.0)),
        timing(0.0),
    )
    .unwrap_err();
    assert!(matches!(err, ReelError::Validation(_)));

    assert!(
        plan_transition(
            TransitionKind::MoveTo,
            "a".into(),
            Some(dot(0.0)),
            None,
            timing(0.0)
        )
        .is_err()
    );
    assert!(
        plan_transition(
            TransitionKind::Replace,
            "a".into(),
            Some(dot(0.0)),
            Some(dot(1.0)),
            timing(0.0)
        )
        .is_err()
    );
}

#[test]
fn instant_kinds_drop_duration() {
    let d = single(TransitionKind::Add, "a", 2.0);
    assert_eq!(d.timing.start_s, 2.0);
    assert_eq!(d.timing.duration_s, 0.0);
    assert_eq!(single(TransitionKind::Create, "a", 2.0).timing.duration_s, 1.0);
}

#[test]
fn timing_rejects_negative_values() {
    assert!(Timing::new(-1.0, 1.0, Ease::Linear).is_err());
    assert!(Timing::new(0.0, f64::NAN, Ease::Linear).is_err());
    assert_eq!(Timing::new(1.5, 2.0, Ease::Linear).unwrap().end_s(), 3.5);
}

#[test]
fn replace_merges_many_into_one() {
    let sources: Vec<(ObjectId, Visual)> =
        (0..3).map(|i| (format!("sq{i}").into(), dot(i as f64))).collect();
    let out = plan_replace(&sources, &[("total".into(), dot(9.0))], false, timing(0.0)).unwrap();
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].kind, TransitionKind::Replace);
    assert_eq!(out[0].objects().len(), 4);
    let DirectiveState::Morph { from, to, .. } = &out[0].state else {
        panic!("expected morph state");
    };
    assert_eq!(from.len(), 3);
    assert_eq!(to, &dot(9.0));
}

#[test]
fn replace_splits_one_into_many() {
    let targets: Vec<(ObjectId, Visual)> =
        (0..8).map(|i| (format!("unit{i}").into(), dot(i as f64))).collect();
    let out = plan_replace(&[("square".into(), dot(0.0))], &targets, false, timing(0.0)).unwrap();
    assert_eq!(out.len(), 8);
    assert!(out.iter().all(|d| d.objects()[0].as_str() == "square"));
    verify_object_order(&out).unwrap();
}

#[test]
fn replace_rejects_uneven_counts() {
    let two: Vec<(ObjectId, Visual)> = vec![("a".into(), dot(0.0)), ("b".into(), dot(1.0))];
    let three: Vec<(ObjectId, Visual)> = vec![
        ("x".into(), dot(0.0)),
        ("y".into(), dot(1.0)),
        ("z".into(), dot(2.0)),
    ];
    assert!(plan_replace(&two, &three, false, timing(0.0)).is_err());
    assert!(plan_replace(&[], &three, false, timing(0.0)).is_err());
    assert_eq!(plan_replace(&two, &two, true, timing(0.0)).unwrap().len(), 2);
}

#[test]
fn camera_directive_targets_the_camera() {
    let from = Camera::new(Point3::ORIGIN, 10.0).unwrap();
    let to = from.set_width(15.0).unwrap();
    let out = plan_camera(from, to, timing(0.0)).unwrap();
    assert_eq!(out[0].target.as_str(), CAMERA_ID);
    assert_eq!(out[0].kind, TransitionKind::Camera);
}

#[test]
fn order_check_rejects_going_back_in_time() {
    let seq = [
        single(TransitionKind::Create, "a", 0.0),
        single(TransitionKind::MoveTo, "a", 2.0),
        single(TransitionKind::Shift, "a", 1.0),
    ];
    assert!(matches!(
        verify_object_order(&seq),
        Err(ReelError::StepOrderViolation { .. })
    ));
}

#[test]
fn order_check_rejects_use_after_removal() {
    let seq = [
        single(TransitionKind::Create, "a", 0.0),
        single(TransitionKind::FadeOut, "a", 1.0),
        single(TransitionKind::Indicate, "a", 2.0),
    ];
    assert!(matches!(
        verify_object_order(&seq),
        Err(ReelError::StaleReference { .. })
    ));
}

#[test]
fn order_check_allows_bringing_objects_back() {
    let seq = [
        single(TransitionKind::Create, "dot", 0.0),
        single(TransitionKind::FadeOut, "dot", 1.0),
        single(TransitionKind::FadeIn, "dot", 2.0),
        single(TransitionKind::MoveTo, "dot", 3.0),
    ];
    verify_object_order(&seq).unwrap();
}

#[test]
fn order_check_rejects_reusing_a_replaced_source_later() {
    let mut seq = plan_replace(
        &[("line".into(), dot(0.0))],
        &[("square".into(), dot(1.0))],
        false,
        timing(0.0),
    )
    .unwrap();
    seq.push(single(TransitionKind::Shift, "line", 1.0));
    assert!(verify_object_order(&seq).is_err());
}
