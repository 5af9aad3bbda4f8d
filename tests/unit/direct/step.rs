use super::*;

fn square() -> Visual {
    Visual::new(Primitive::Square {
        center: Point3::ORIGIN,
        side: 1.0,
        color: Rgba8::BLUE,
        fill_opacity: 1.0,
    })
}

#[test]
fn step_lasts_as_long_as_its_longest_change() {
    let step = SceneStep::play(
        "relabel",
        [
            Play::new(Change::fade_out("line")).run_time(1.0),
            Play::new(Change::fade_in("line2", square())).run_time(2.0),
        ],
    );
    assert_eq!(step.duration_s(), 2.0);

    let step = SceneStep::play("pan", [Change::fade_out("x")]).run_time(5.0);
    assert_eq!(step.duration_s(), 5.0);
    assert_eq!(SceneStep::wait(1.5).duration_s(), 1.5);
    assert_eq!(
        SceneStep::instant("add", [Change::add("a", square())]).duration_s(),
        0.0
    );
}

#[test]
fn replace_references_consumes_and_produces() {
    let c = Change::replace("old", "new", square());
    assert_eq!(c.references(), vec![&ObjectId::from("old")]);
    assert_eq!(c.consumes(), vec![&ObjectId::from("old")]);
    assert_eq!(c.produces(), vec![&ObjectId::from("new")]);
    assert_eq!(c.touches().len(), 2);
}

#[test]
fn copy_keeps_source() {
    let c = Change::ReplaceFromCopy {
        from: "sq".into(),
        to: ("sq-copy".into(), square()),
    };
    assert!(c.consumes().is_empty());
    assert_eq!(c.produces(), vec![&ObjectId::from("sq-copy")]);
}

#[test]
fn camera_capability_needs() {
    let pan = Change::Camera {
        center: Some(Point3::ORIGIN),
        width: None,
    };
    assert!(pan.needs_pan());
    assert!(!pan.needs_zoom());
    assert!(pan.touches().is_empty());
}

#[test]
fn wait_ignores_play_builders() {
    let w = SceneStep::wait(1.0).run_time(9.0).ease(Ease::Linear);
    assert_eq!(w.duration_s(), 1.0);
    assert!(w.plays().is_empty());
}
