use super::*;
use approx::assert_abs_diff_eq;
use std::f64::consts::FRAC_PI_2;

fn dot_axis() -> AxisFrame {
    AxisFrame::new(AxisRange::new(110.0, 190.0, 10.0), 8.0).unwrap()
}

#[test]
fn domain_is_centered_on_frame_center() {
    let f = dot_axis();
    assert_eq!(f.value_to_point(150.0), Point3::ORIGIN);
    assert_eq!(f.start(), Point3::xy(-4.0, 0.0));
    assert_eq!(f.end(), Point3::xy(4.0, 0.0));
    assert_eq!(f.unit_length(), 0.1);
}

#[test]
fn extrapolation_stays_on_the_line() {
    let f = AxisFrame::new(AxisRange::new(-10.0, 160.0, 1.0), 170.0).unwrap();
    // One scene unit per data unit, centered at 75.
    for (v, x) in [(2.0, -73.0), (200.0, 125.0), (-20.0, -95.0)] {
        let p = f.value_to_point(v);
        assert_abs_diff_eq!(p.x, x, epsilon = 1e-9);
        assert_eq!(p.y, 0.0);
    }
}

#[test]
fn rejects_degenerate_frames() {
    let r = AxisRange::new(0.0, 10.0, 1.0);
    assert!(matches!(
        AxisFrame::new(r, 0.0),
        Err(ReelError::InvalidFrame(_))
    ));
    assert!(matches!(
        AxisFrame::new(r, -1.0),
        Err(ReelError::InvalidFrame(_))
    ));
    assert!(AxisFrame::new(AxisRange::new(5.0, 5.0, 1.0), 1.0).is_err());
    assert!(AxisFrame::new(AxisRange::new(0.0, 5.0, 0.0), 1.0).is_err());
    assert!(AxisFrame::new(r, f64::INFINITY).is_err());
}

#[test]
fn ticks_include_both_ends() {
    let f = dot_axis();
    assert_eq!(
        f.ticks(),
        vec![110.0, 120.0, 130.0, 140.0, 150.0, 160.0, 170.0, 180.0, 190.0]
    );
    let tens = AxisFrame::new(AxisRange::new(-10.0, 160.0, 10.0), 170.0).unwrap();
    assert_eq!(tens.ticks().len(), 18);
    assert_eq!(tens.tick_points()[0].1, tens.start());
}

#[test]
fn quarter_turn_makes_axis_vertical() {
    let f = dot_axis().rotate_about_center(FRAC_PI_2);
    let low = f.value_to_point(110.0);
    let high = f.value_to_point(190.0);
    assert_abs_diff_eq!(low.x, 0.0, epsilon = 1e-12);
    assert_abs_diff_eq!(low.y, -4.0, epsilon = 1e-12);
    assert_abs_diff_eq!(high.y, 4.0, epsilon = 1e-12);
}

#[test]
fn rotation_about_external_point_moves_center() {
    let f = dot_axis().move_to(Point3::xy(2.0, 0.0));
    let r = rotate(&f, FRAC_PI_2, Point3::ORIGIN);
    assert_abs_diff_eq!(r.center().x, 0.0, epsilon = 1e-12);
    assert_abs_diff_eq!(r.center().y, 2.0, epsilon = 1e-12);
}

#[test]
fn rotate_point_matches_frame_rotation() {
    let f = dot_axis().move_to(Point3::xy(5.0, 0.0));
    let about = f.value_to_point(150.0);
    let rotated = f.rotate(-FRAC_PI_2, about);
    for v in [110.0, 135.0, 190.0] {
        let a = rotate_point(f.value_to_point(v), -FRAC_PI_2, about);
        let b = rotated.value_to_point(v);
        assert_abs_diff_eq!(a.x, b.x, epsilon = 1e-12);
        assert_abs_diff_eq!(a.y, b.y, epsilon = 1e-12);
    }
}

#[test]
fn scale_stretches_about_center() {
    let f = dot_axis().move_to(Point3::xy(1.0, 1.0));
    let s = f.scale(2.0).unwrap();
    assert_eq!(s.center(), f.center());
    assert_eq!(s.length(), 16.0);
    assert!(f.scale(0.0).is_err());
}
