use super::*;
use approx::assert_abs_diff_eq;

#[test]
fn endpoints_are_stable() {
    for ease in [Ease::Linear, Ease::Smooth] {
        assert_abs_diff_eq!(ease.apply(0.0), 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(ease.apply(1.0), 1.0, epsilon = 1e-12);
    }
}

#[test]
fn monotonic_spot_check() {
    for ease in [Ease::Linear, Ease::Smooth] {
        let a = ease.apply(0.25);
        let b = ease.apply(0.5);
        let c = ease.apply(0.75);
        assert!(a < b);
        assert!(b < c);
    }
}

#[test]
fn smooth_is_symmetric_about_midpoint() {
    assert_abs_diff_eq!(Ease::Smooth.apply(0.5), 0.5, epsilon = 1e-12);
    assert_abs_diff_eq!(
        Ease::Smooth.apply(0.2) + Ease::Smooth.apply(0.8),
        1.0,
        epsilon = 1e-12
    );
}

#[test]
fn there_and_back_peaks_in_the_middle() {
    let e = Ease::ThereAndBack;
    assert_abs_diff_eq!(e.apply(0.0), 0.0, epsilon = 1e-12);
    assert_abs_diff_eq!(e.apply(0.5), 1.0, epsilon = 1e-12);
    assert_abs_diff_eq!(e.apply(1.0), 0.0, epsilon = 1e-12);
}

#[test]
fn input_is_clamped() {
    assert_eq!(Ease::Linear.apply(-1.0), 0.0);
    assert_eq!(Ease::Linear.apply(2.0), 1.0);
}
