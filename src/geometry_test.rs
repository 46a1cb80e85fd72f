#![allow(clippy::float_cmp)]

use super::*;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

// =============================================================
// finite_or_zero
// =============================================================

#[test]
fn non_finite_values_read_as_zero() {
    assert_eq!(finite_or_zero(12.5), 12.5);
    assert_eq!(finite_or_zero(f64::NAN), 0.0);
    assert_eq!(finite_or_zero(f64::INFINITY), 0.0);
    assert_eq!(Point::new(f64::NAN, -3.0).finite(), Point::new(0.0, -3.0));
    assert_eq!(Size::new(50.0, f64::NEG_INFINITY).finite(), Size::new(50.0, 0.0));
}

// =============================================================
// render_transform
// =============================================================

#[test]
fn transform_formats_translate_then_rotate() {
    let t = render_transform(Point::new(10.0, 20.5), 45.0);
    assert_eq!(t.to_string(), "translate(10px, 20.5px) rotate(45deg)");
}

#[test]
fn transform_keeps_unbounded_rotation() {
    let t = render_transform(Point::default(), -725.0);
    assert_eq!(t.rotation_deg, -725.0);
    assert_eq!(t.to_string(), "translate(0px, 0px) rotate(-725deg)");
}

// =============================================================
// clamp_position
// =============================================================

#[test]
fn clamp_inside_is_identity() {
    let p = clamp_position(Point::new(30.0, 40.0), Size::new(50.0, 50.0), Size::new(800.0, 600.0));
    assert_eq!(p, Point::new(30.0, 40.0));
}

#[test]
fn clamp_negative_to_zero() {
    let p = clamp_position(Point::new(-12.0, -1.0), Size::new(50.0, 50.0), Size::new(800.0, 600.0));
    assert_eq!(p, Point::new(0.0, 0.0));
}

#[test]
fn clamp_past_far_edge() {
    let p = clamp_position(Point::new(790.0, 590.0), Size::new(50.0, 40.0), Size::new(800.0, 600.0));
    assert_eq!(p, Point::new(750.0, 560.0));
}

#[test]
fn clamp_inverted_bounds_collapse_to_zero() {
    let p = clamp_position(Point::new(25.0, 25.0), Size::new(900.0, 50.0), Size::new(800.0, 600.0));
    assert_eq!(p.x, 0.0);
    assert_eq!(p.y, 25.0);
}

// =============================================================
// center / angle / rotate
// =============================================================

#[test]
fn center_of_box() {
    assert_eq!(center(Point::new(10.0, 20.0), Size::new(100.0, 40.0)), Point::new(60.0, 40.0));
}

#[test]
fn angle_around_cardinal_directions() {
    let pivot = Point::new(0.0, 0.0);
    assert!(approx(angle_around(pivot, Point::new(1.0, 0.0)), 0.0));
    assert!(approx(angle_around(pivot, Point::new(0.0, 1.0)), std::f64::consts::FRAC_PI_2));
    assert!(approx(angle_around(pivot, Point::new(-1.0, 0.0)), std::f64::consts::PI));
}

#[test]
fn rotate_about_quarter_turn() {
    let p = rotate_about(Point::new(10.0, 0.0), Point::new(0.0, 0.0), 90.0);
    assert!(approx(p.x, 0.0));
    assert!(approx(p.y, 10.0));
}

#[test]
fn size_floored_at_minimums() {
    assert_eq!(Size::new(10.0, 100.0).floored(40.0, 30.0), Size::new(40.0, 100.0));
    assert_eq!(Size::new(-5.0, 0.0).floored(40.0, 30.0), Size::new(40.0, 30.0));
}
