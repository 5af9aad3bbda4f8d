use super::*;
use crate::direct::step::StepBody;
use approx::assert_abs_diff_eq;

#[test]
fn pans_from_two_to_one_fifty() {
    let s = script().unwrap();
    s.validate().unwrap();
    let cam = s.camera.unwrap();
    assert_eq!(cam.width, 10.0);
    // Line is centered on value 75 with one scene unit per value.
    assert_abs_diff_eq!(cam.center.x, -73.0, epsilon = 1e-9);

    let pan = &s.steps[2];
    assert_eq!(pan.duration_s(), 5.0);
    let StepBody::Play { plays, .. } = &pan.body else {
        panic!("expected play");
    };
    let Change::Camera {
        center: Some(c),
        width: None,
    } = plays[0].change
    else {
        panic!("expected a pure pan");
    };
    assert_abs_diff_eq!(c.x, 75.0, epsilon = 1e-9);
}

#[test]
fn cross_fade_lasts_two_seconds() {
    let s = script().unwrap();
    let fade = s
        .steps
        .iter()
        .find(|st| st.label == "switch to steps of ten")
        .unwrap();
    assert_eq!(fade.duration_s(), 2.0);
    assert_eq!(s.duration_s(), 11.0);
}
