use super::*;
use crate::foundation::core::{DOWN, RIGHT};

#[test]
fn zoom_out_and_pan_like_the_square_reveal() {
    let cam = Camera::new(Point3::xy(5.0, 0.0), 15.0).unwrap();
    let next = cam.scale(4.0).unwrap().shift(DOWN * 12.0 + RIGHT * 22.0);
    assert_eq!(next.width, 60.0);
    assert_eq!(next.center, Point3::xy(27.0, -12.0));
}

#[test]
fn rejects_non_positive_width() {
    assert!(Camera::new(Point3::ORIGIN, 0.0).is_err());
    let cam = Camera::new(Point3::ORIGIN, 10.0).unwrap();
    assert!(cam.set_width(-1.0).is_err());
    assert!(cam.scale(0.0).is_err());
    assert!(matches!(
        cam.set_width(f64::NAN),
        Err(ReelError::InvalidFrame(_))
    ));
}

#[test]
fn move_keeps_width() {
    let cam = Camera::new(Point3::ORIGIN, 10.0).unwrap();
    let moved = cam.move_to(Point3::xy(150.0, 0.0));
    assert_eq!(moved.width, 10.0);
    assert_eq!(moved.center.x, 150.0);
}
