use super::*;

#[test]
fn element_json_uses_editor_field_names() {
    let el: Element = serde_json::from_value(serde_json::json!({
        "id": "a",
        "type": "star",
        "x": 10, "y": 20, "width": 100, "height": 80,
        "backgroundColor": "#ff0000",
        "layerId": "L1",
        "starPoints": 6,
        "flowAnimation": true,
        "animations": [
            { "id": "m1", "type": "preset", "name": "fadeIn", "trigger": "on-load",
              "duration": 300, "delay": 0, "easing": "easeOutQuad" }
        ]
    }))
    .unwrap();
    assert_eq!(el.shape_type, "star");
    assert_eq!(el.opacity, 100.0);
    assert_eq!(el.params.star_points, Some(6));
    assert!(el.flow_animation);
    assert_eq!(el.layer_id.as_deref(), Some("L1"));
    assert_eq!(el.animations[0].trigger, Trigger::OnLoad);
    assert_eq!(el.animations[0].easing, Ease::EaseOutQuad);
    assert!(el.contour_override.is_none());
    assert_eq!(el.center(), Point::new(60.0, 60.0));
}

#[test]
fn descriptor_payloads_parse_by_type() {
    let d: AnimationDescriptor = serde_json::from_value(serde_json::json!({
        "id": "p", "type": "path", "trigger": "after-prev", "duration": 1000, "delay": 0,
        "easing": "linear", "pathData": "M 0 0 L 10 0", "isRelative": true, "orientToPath": true
    }))
    .unwrap();
    assert_eq!(d.trigger, Trigger::AfterPrev);
    assert_eq!(
        d.kind,
        AnimationKind::Path {
            path_data: "M 0 0 L 10 0".to_owned(),
            is_relative: true,
            orient_to_path: true
        }
    );

    let d: AnimationDescriptor = serde_json::from_value(serde_json::json!({
        "id": "c", "type": "property", "trigger": "with-prev", "duration": 200,
        "property": "backgroundColor", "to": "#00ff00", "easing": "bogus"
    }))
    .unwrap();
    assert_eq!(d.easing, Ease::Linear);
    assert_eq!(d.delay, 0.0);
    assert!(matches!(d.kind, AnimationKind::Property { to: PropertyValue::Text(_), .. }));

    let d: AnimationDescriptor = serde_json::from_value(serde_json::json!({
        "id": "t", "type": "transition", "trigger": "on-click", "stateId": "s2", "repeat": -1
    }))
    .unwrap();
    assert_eq!(d.cycles(), None);
    assert!(matches!(d.kind, AnimationKind::Transition { ref state_id } if state_id == "s2"));
}

#[test]
fn cycles_count_repeats() {
    let mut d: AnimationDescriptor = serde_json::from_value(serde_json::json!({
        "id": "r", "type": "rotate", "trigger": "on-click", "toAngle": 90
    }))
    .unwrap();
    assert_eq!(d.cycles(), Some(1));
    d.repeat = 2;
    assert_eq!(d.cycles(), Some(3));
    d.repeat = -2;
    assert!(d.validate().is_err());
}

#[test]
fn patch_writes_only_set_fields() {
    let mut el = Element::new("a", "rectangle", Rect::new(0.0, 0.0, 10.0, 10.0));
    el.contour_override = Some(vec![Point::ZERO]);

    let patch = ElementPatch {
        x: Some(5.0),
        background_color: Some("#123456".to_owned()),
        ..ElementPatch::default()
    };
    patch.apply_to(&mut el);
    assert_eq!(el.x, 5.0);
    assert_eq!(el.y, 0.0);
    assert_eq!(el.background_color, "#123456");
    assert!(el.contour_override.is_some());

    ElementPatch {
        contour: ContourPatch::Clear,
        ..ElementPatch::default()
    }
    .apply_to(&mut el);
    assert!(el.contour_override.is_none());
    assert!(ElementPatch::default().is_empty());
}

#[test]
fn snapshot_round_trips_through_patch() {
    let mut src = Element::new("a", "circle", Rect::new(1.0, 2.0, 31.0, 42.0));
    src.opacity = 40.0;
    src.text = Some("hi".to_owned());
    let mut dst = Element::new("a", "rectangle", Rect::new(0.0, 0.0, 1.0, 1.0));
    ElementPatch::from(&src.snapshot()).apply_to(&mut dst);
    assert_eq!(dst, src);
}

#[test]
fn slide_membership_uses_center_inclusively() {
    let slide = Slide {
        id: "s".to_owned(),
        name: String::new(),
        spatial_position: Point::new(0.0, 0.0),
        dimensions: Size::new(100.0, 100.0),
        order: 0,
    };
    // Center exactly on the right edge.
    let edge = Element::new("e", "rectangle", Rect::new(90.0, 40.0, 110.0, 60.0));
    assert!(slide.contains(&edge));
    let outside = Element::new("o", "rectangle", Rect::new(95.0, 0.0, 115.0, 10.0));
    assert!(!slide.contains(&outside));
}
