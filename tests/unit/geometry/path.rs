use super::*;

fn close(a: Point, b: Point) -> bool {
    (a - b).hypot() < 1e-6
}

#[test]
fn rejects_garbage_and_empty_paths() {
    assert!(SampledPath::parse("not a path").is_err());
    assert!(SampledPath::parse("M 10 10").is_err());
}

#[test]
fn progress_is_weighted_by_segment_length() {
    // 30 units right, then 10 units down.
    let p = SampledPath::parse("M 0 0 L 30 0 L 30 10").unwrap();
    assert!((p.length() - 40.0).abs() < 1e-9);
    assert!(close(p.point_at(0.0).point, Point::new(0.0, 0.0)));
    assert!(close(p.point_at(0.5).point, Point::new(20.0, 0.0)));
    assert!(close(p.point_at(0.75).point, Point::new(30.0, 0.0)));
    assert!(close(p.point_at(1.0).point, Point::new(30.0, 10.0)));
}

#[test]
fn tangent_angle_follows_direction() {
    let p = SampledPath::parse("M 0 0 L 10 0 L 10 10").unwrap();
    assert!(p.point_at(0.25).angle.abs() < 1e-9);
    let down = p.point_at(0.9).angle;
    assert!((down - std::f64::consts::FRAC_PI_2).abs() < 1e-9);
}

#[test]
fn progress_is_clamped() {
    let p = SampledPath::parse("M 0 0 L 10 0").unwrap();
    assert!(close(p.point_at(-1.0).point, Point::ZERO));
    assert!(close(p.point_at(2.0).point, Point::new(10.0, 0.0)));
}

#[test]
fn closing_segment_is_part_of_the_path() {
    let p = SampledPath::parse("M 0 0 L 10 0 L 10 10 L 0 10 Z").unwrap();
    assert_eq!(p.segment_count(), 4);
    assert!((p.length() - 40.0).abs() < 1e-9);
    assert_eq!(p.sample_uniform(8).len(), 8);
    assert!(close(p.start(), Point::ZERO));
}

#[test]
fn curves_are_sampled_on_the_curve() {
    let p = SampledPath::parse("M 0 0 Q 50 100 100 0").unwrap();
    let mid = p.point_at(0.5).point;
    assert!((mid.x - 50.0).abs() < 1e-9);
    assert!((mid.y - 50.0).abs() < 1e-9);
}
