use super::*;
use crate::layout::axis::AxisRange;
use approx::assert_abs_diff_eq;

fn vertical_line() -> Primitive {
    Primitive::line(Point3::xy(2.0, 3.0), Point3::xy(2.0, 0.0), Rgba8::BLUE)
}

#[test]
fn line_scales_about_its_midpoint() {
    let scaled = vertical_line().scaled(3.0).unwrap();
    let Primitive::Line { start, end, .. } = scaled else {
        panic!("expected line");
    };
    assert_eq!(start, Point3::xy(2.0, 6.0));
    assert_eq!(end, Point3::xy(2.0, -3.0));
}

#[test]
fn moved_to_recenters_every_shape() {
    let target = Point3::xy(-1.0, 4.0);
    let axis = Primitive::Axis(AxisPrimitive {
        frame: AxisFrame::new(AxisRange::new(0.0, 10.0, 1.0), 5.0).unwrap(),
        numbers: true,
        font_size: 30.0,
        stroke_width: 2.0,
        color: Rgba8::GREEN_E,
    });
    let shapes = [
        axis,
        vertical_line(),
        Primitive::Dot {
            center: Point3::ORIGIN,
            radius: 0.05,
            color: Rgba8::RED,
        },
        Primitive::Math {
            tex: "s_y".to_string(),
            position: Point3::xy(3.0, 3.0),
            scale: 0.7,
        },
    ];
    for shape in shapes {
        let c = shape.moved_to(target).center();
        assert_abs_diff_eq!(c.x, target.x, epsilon = 1e-12);
        assert_abs_diff_eq!(c.y, target.y, epsilon = 1e-12);
    }
}

#[test]
fn scaling_rejects_non_positive_factor() {
    assert!(vertical_line().scaled(0.0).is_err());
    assert!(vertical_line().scaled(-2.0).is_err());
}

#[test]
fn fraction_formulas_are_taller() {
    let plain = Primitive::Math {
        tex: "s_y = 19.36".to_string(),
        position: Point3::ORIGIN,
        scale: 1.0,
    };
    let frac = Primitive::Math {
        tex: r"s^2_y = \frac{3000}{8}".to_string(),
        position: Point3::ORIGIN,
        scale: 1.0,
    };
    assert!(frac.extent().height > plain.extent().height);
    // "s", "y", "=", "1", "9", ".", "3", "6"
    assert_abs_diff_eq!(plain.extent().width, 8.0 * 0.3, epsilon = 1e-12);
}

#[test]
fn recolor_leaves_text_untouched() {
    let math = Primitive::Math {
        tex: "x".to_string(),
        position: Point3::ORIGIN,
        scale: 1.0,
    };
    assert_eq!(math.recolored(Rgba8::PURE_GREEN), math);
    let Primitive::Line { color, .. } = vertical_line().recolored(Rgba8::RED) else {
        panic!("expected line");
    };
    assert_eq!(color, Rgba8::RED);
}

#[test]
fn quarter_turn_of_dot_about_point() {
    let dot = Primitive::Dot {
        center: Point3::xy(8.0, 0.5),
        radius: 0.05,
        color: Rgba8::RED,
    };
    let turned = dot.rotated(-std::f64::consts::FRAC_PI_2, Point3::xy(5.0, 0.0));
    let c = turned.center();
    assert_abs_diff_eq!(c.x, 5.5, epsilon = 1e-12);
    assert_abs_diff_eq!(c.y, -3.0, epsilon = 1e-12);
}

#[test]
fn reshaping_keeps_opacity() {
    let v = Visual {
        primitive: vertical_line(),
        opacity: 0.4,
    };
    let w = v.with_primitive(Primitive::Square {
        center: Point3::ORIGIN,
        side: 1.0,
        color: Rgba8::BLUE,
        fill_opacity: 0.8,
    });
    assert_eq!(w.opacity, 0.4);
}

#[test]
fn serializes_with_shape_tag() {
    let json = serde_json::to_value(Visual::new(vertical_line())).unwrap();
    assert_eq!(json["primitive"]["shape"], "line");
    assert!(json["primitive"].get("dash_ratio").is_none());
}
