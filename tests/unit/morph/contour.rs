use super::*;
use crate::geometry::shapes::ShapeRegistry;

fn extract(shape: &str, w: f64, h: f64) -> Contour {
    extract_contour(
        &ShapeRegistry::with_builtins(),
        shape,
        Size::new(w, h),
        &ShapeParams::default(),
    )
}

#[test]
fn rectangle_yields_clockwise_corners_from_top_left() {
    let c = extract("rectangle", 40.0, 20.0);
    assert!(c.closed);
    assert_eq!(
        c.points,
        vec![
            Point::new(-20.0, -10.0),
            Point::new(20.0, -10.0),
            Point::new(20.0, 10.0),
            Point::new(-20.0, 10.0),
        ]
    );
}

#[test]
fn ellipse_samples_sixty_points_on_boundary() {
    let c = extract("circle", 100.0, 50.0);
    assert_eq!(c.len(), CURVE_SAMPLES);
    for p in &c.points {
        let v = (p.x / 50.0).powi(2) + (p.y / 25.0).powi(2);
        assert!((v - 1.0).abs() < 1e-9);
    }
}

#[test]
fn point_lists_are_used_as_is() {
    let c = extract("triangle", 10.0, 10.0);
    assert_eq!(c.len(), 3);
    let b = extract("bracketLeft", 10.0, 10.0);
    assert!(!b.closed);
}

#[test]
fn curve_paths_are_sampled_sixty_times() {
    let c = extract("heart", 100.0, 100.0);
    assert_eq!(c.len(), CURVE_SAMPLES);
    assert!(c.closed);
}

#[test]
fn composite_uses_first_part() {
    // Cylinder's first part is its top ellipse.
    let c = extract("cylinder", 60.0, 100.0);
    assert_eq!(c.len(), CURVE_SAMPLES);
    assert!(c.points.iter().all(|p| p.y <= -20.0 + 1e-9));
}

#[test]
fn unknown_and_unusable_geometry_fall_back_to_inscribed_ellipse() {
    let size = Size::new(30.0, 20.0);
    assert_eq!(extract("mysteryShape", 30.0, 20.0), Contour::inscribed(size));

    let mut reg = ShapeRegistry::empty();
    reg.register("broken", |_, _| ShapeGeometry::Path {
        data: "M 0 0 Q".to_owned(),
    });
    reg.register("hollow", |_, _| ShapeGeometry::Multi { shapes: vec![] });
    reg.register("bare", |_, _| ShapeGeometry::Points {
        points: vec![],
        closed: true,
    });
    for name in ["broken", "hollow", "bare"] {
        let c = extract_contour(&reg, name, size, &ShapeParams::default());
        assert_eq!(c, Contour::inscribed(size), "{name}");
    }
}

#[test]
fn resampled_preserves_openness() {
    let open = Contour::open(vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0)]);
    let r = open.resampled(3);
    assert!(!r.closed);
    assert_eq!(r.points[2], Point::new(10.0, 0.0));

    let closed = Contour::closed(vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0)]);
    let r = closed.resampled(4);
    // Out and back: 20 units of perimeter.
    assert_eq!(r.points[2], Point::new(10.0, 0.0));
    assert_eq!(r.points[3], Point::new(5.0, 0.0));
}
