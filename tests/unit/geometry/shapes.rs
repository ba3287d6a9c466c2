use super::*;

fn geom(name: &str, w: f64, h: f64) -> ShapeGeometry {
    ShapeRegistry::with_builtins()
        .geometry(name, Size::new(w, h), &ShapeParams::default())
        .unwrap()
}

#[test]
fn rectangle_is_centered_on_origin() {
    assert_eq!(
        geom("rectangle", 100.0, 40.0),
        ShapeGeometry::Rect {
            x: -50.0,
            y: -20.0,
            w: 100.0,
            h: 40.0,
            radius: 0.0
        }
    );

    let rounded = ShapeParams {
        roundness: true,
        ..ShapeParams::default()
    };
    let g = ShapeRegistry::with_builtins()
        .geometry("rectangle", Size::new(10.0, 10.0), &rounded)
        .unwrap();
    assert!(matches!(g, ShapeGeometry::Rect { radius, .. } if radius == 10.0));
}

#[test]
fn star_alternates_outer_and_inner_radius() {
    let ShapeGeometry::Points { points, closed } = geom("star", 100.0, 100.0) else {
        panic!("star should be a point list");
    };
    assert!(closed);
    assert_eq!(points.len(), 10);
    assert!((points[0].to_vec2().hypot() - 50.0).abs() < 1e-9);
    assert!((points[1].to_vec2().hypot() - 19.0).abs() < 1e-9);
    // First tip points straight up.
    assert!(points[0].x.abs() < 1e-9 && points[0].y < 0.0);
}

#[test]
fn polygon_honors_side_count() {
    let p = ShapeParams {
        polygon_sides: Some(9),
        ..ShapeParams::default()
    };
    let g = ShapeRegistry::with_builtins()
        .geometry("polygon", Size::new(80.0, 80.0), &p)
        .unwrap();
    assert!(matches!(g, ShapeGeometry::Points { ref points, .. } if points.len() == 9));
}

#[test]
fn burst_blob_is_deterministic_per_seed() {
    let reg = ShapeRegistry::with_builtins();
    let with_seed = |seed| ShapeParams {
        seed: Some(seed),
        ..ShapeParams::default()
    };
    let a = reg.geometry("burstBlob", Size::new(120.0, 80.0), &with_seed(3));
    let b = reg.geometry("burstBlob", Size::new(120.0, 80.0), &with_seed(3));
    let c = reg.geometry("burstBlob", Size::new(120.0, 80.0), &with_seed(4));
    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn curve_shapes_produce_parseable_path_data() {
    use crate::geometry::path::SampledPath;

    for name in [
        "capsule",
        "callout",
        "speechBubble",
        "cloud",
        "heart",
        "scroll",
        "document",
        "wavyDivider",
        "ribbon",
    ] {
        let ShapeGeometry::Path { data } = geom(name, 120.0, 90.0) else {
            panic!("{name} should be a path");
        };
        let sampled = SampledPath::parse(&data);
        assert!(sampled.is_ok(), "{name}: {data}");
    }
}

#[test]
fn composites_list_their_parts() {
    let ShapeGeometry::Multi { shapes } = geom("cylinder", 60.0, 100.0) else {
        panic!("cylinder should be composite");
    };
    assert_eq!(shapes.len(), 4);
    assert!(matches!(shapes[0], ShapeGeometry::Ellipse { .. }));
}

#[test]
fn lines_use_their_points_or_the_diagonal() {
    let reg = ShapeRegistry::with_builtins();
    let g = reg
        .geometry("line", Size::new(30.0, 40.0), &ShapeParams::default())
        .unwrap();
    assert_eq!(
        g,
        ShapeGeometry::Points {
            points: vec![Point::new(-15.0, -20.0), Point::new(15.0, 20.0)],
            closed: false
        }
    );

    let own = ShapeParams {
        points: Some(vec![Point::ZERO, Point::new(5.0, 5.0), Point::new(10.0, 0.0)]),
        ..ShapeParams::default()
    };
    let g = reg.geometry("arrow", Size::new(10.0, 5.0), &own).unwrap();
    assert_eq!(
        g,
        ShapeGeometry::Points {
            points: vec![
                Point::new(-5.0, -2.5),
                Point::new(0.0, 2.5),
                Point::new(5.0, -2.5)
            ],
            closed: false
        }
    );
}

#[test]
fn unknown_types_and_silhouettes() {
    let reg = ShapeRegistry::with_builtins();
    assert!(reg
        .geometry("nope", Size::new(1.0, 1.0), &ShapeParams::default())
        .is_none());
    assert!(reg.has_silhouette("circle"));
    assert!(!reg.has_silhouette("image"));
    assert!(!reg.has_silhouette("text"));
    assert!(reg.names().len() > 35);
}

#[test]
fn custom_shapes_can_be_registered() {
    let mut reg = ShapeRegistry::empty();
    assert!(!reg.contains("tri"));
    reg.register("tri", |size: Size, _: &ShapeParams| ShapeGeometry::Points {
        points: vec![
            Point::new(0.0, -size.height / 2.0),
            Point::new(size.width / 2.0, 0.0),
            Point::new(-size.width / 2.0, 0.0),
        ],
        closed: true,
    });
    assert!(reg.contains("tri"));
}

#[test]
fn roundness_accepts_objects_and_flags() {
    let p: ShapeParams = serde_json::from_value(serde_json::json!({ "roundness": { "type": 3 } }))
        .unwrap();
    assert!(p.roundness);
    let p: ShapeParams = serde_json::from_value(serde_json::json!({ "roundness": null })).unwrap();
    assert!(!p.roundness);
    let p: ShapeParams = serde_json::from_value(serde_json::json!({ "starPoints": 7 })).unwrap();
    assert_eq!(p.star_points, Some(7));
}
