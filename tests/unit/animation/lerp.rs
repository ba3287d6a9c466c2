use super::*;

#[test]
fn scalar_endpoints_are_exact() {
    let a = 0.1_f64;
    let b = 0.7_f64;
    assert_eq!(f64::lerp(&a, &b, 0.0), a);
    assert_eq!(f64::lerp(&a, &b, 1.0), b);
    assert!((f64::lerp(&a, &b, 0.5) - 0.4).abs() < 1e-12);
}

#[test]
fn point_lerp_is_componentwise() {
    let a = Point::new(0.0, 10.0);
    let b = Point::new(20.0, -10.0);
    assert_eq!(<Point as Lerp>::lerp(&a, &b, 0.25), Point::new(5.0, 5.0));
    assert_eq!(<Point as Lerp>::lerp(&a, &b, 1.0), b);
}

#[test]
fn vec_lerp_extrapolates_outside_unit_range() {
    let v = <Vec2 as Lerp>::lerp(&Vec2::ZERO, &Vec2::new(2.0, 4.0), 1.5);
    assert_eq!(v, Vec2::new(3.0, 6.0));
}
