use super::*;
use crate::foundation::core::Rect;

fn sample() -> Document {
    Document::from_json_str(
        r##"{
        "elements": [
            { "id": "a", "type": "rectangle", "x": 0, "y": 0, "width": 100, "height": 50, "layerId": "front" },
            { "id": "b", "type": "circle", "x": 900, "y": 900, "width": 40, "height": 40 }
        ],
        "layers": [ { "id": "back", "order": 0 }, { "id": "front", "order": 2 } ],
        "slides": [
            { "id": "s0", "spatialPosition": { "x": 0, "y": 0 }, "dimensions": { "width": 800, "height": 600 } },
            { "id": "s1", "spatialPosition": { "x": 800, "y": 800 }, "dimensions": { "width": 800, "height": 600 } }
        ],
        "states": [
            { "id": "wide", "name": "Wide", "overrides": { "a": { "width": 300, "backgroundColor": "#00ff00" }, "ghost": { "x": 1 } } }
        ]
    }"##,
    )
    .unwrap()
}

#[test]
fn loads_and_partitions_elements_by_slide() {
    let doc = sample();
    let s0: Vec<_> = doc.elements_on_slide(0).iter().map(|e| e.id.as_str()).collect();
    let s1: Vec<_> = doc.elements_on_slide(1).iter().map(|e| e.id.as_str()).collect();
    assert_eq!(s0, ["a"]);
    assert_eq!(s1, ["b"]);
    assert!(doc.elements_on_slide(7).is_empty());
    assert_eq!(doc.layer_order(Some("front")), 2);
    assert_eq!(doc.layer_order(Some("missing")), 0);
    assert_eq!(doc.layer_order(None), 0);
}

#[test]
fn rejects_duplicate_ids_and_bad_json() {
    let dup = r#"{ "elements": [
        { "id": "a", "type": "rectangle", "x": 0, "y": 0, "width": 1, "height": 1 },
        { "id": "a", "type": "rectangle", "x": 0, "y": 0, "width": 1, "height": 1 } ] }"#;
    assert!(matches!(
        Document::from_json_str(dup),
        Err(MorphError::Validation(_))
    ));
    assert!(matches!(
        Document::from_json_str("{ nope"),
        Err(MorphError::Serde(_))
    ));
    assert!(Document::from_path(Path::new("/definitely/not/here.json")).is_err());
}

#[test]
fn apply_state_writes_overrides_and_skips_stale_ids() {
    let mut doc = sample();
    doc.apply_state("wide").unwrap();
    let a = doc.element(&ElementId::from("a")).unwrap();
    assert_eq!(a.width, 300.0);
    assert_eq!(a.height, 50.0);
    assert_eq!(a.background_color, "#00ff00");
    assert_eq!(doc.active_state_id.as_deref(), Some("wide"));
    assert!(doc.apply_state("missing").is_err());
}

#[test]
fn capture_update_delete_lifecycle() {
    let mut doc = sample();
    let id = doc.capture_state("Start").id.clone();
    assert_eq!(id, "state-2");
    assert_eq!(doc.state(&id).unwrap().overrides.len(), 2);

    doc.element_mut(&ElementId::from("b")).unwrap().x = 5.0;
    doc.update_state(&id).unwrap();
    let b = &doc.state(&id).unwrap().overrides[&ElementId::from("b")];
    assert_eq!(b.x, Some(5.0));

    doc.active_state_id = Some(id.clone());
    doc.delete_state(&id).unwrap();
    assert!(doc.state(&id).is_err());
    assert!(doc.active_state_id.is_none());
    assert!(doc.update_state(&id).is_err());
}

#[test]
fn state_cycling_wraps_both_ways() {
    let mut doc = sample();
    doc.capture_state("Two");
    assert_eq!(doc.next_state_id(), Some("wide"));
    assert_eq!(doc.previous_state_id(), Some("state-2"));
    doc.active_state_id = Some("state-2".to_owned());
    assert_eq!(doc.next_state_id(), Some("wide"));
    assert_eq!(doc.previous_state_id(), Some("wide"));
    assert_eq!(Document::default().next_state_id(), None);
}

#[test]
fn patches_to_removed_elements_report_failure() {
    let mut doc = sample();
    let id = ElementId::from("a");
    assert!(doc.remove_element(&id).is_some());
    let patch = ElementPatch {
        x: Some(1.0),
        ..ElementPatch::default()
    };
    assert!(!doc.apply_patch(&id, &patch));

    doc.elements
        .push(Element::new("c", "rectangle", Rect::new(0.0, 0.0, 2.0, 2.0)));
    assert!(doc.apply_patch(&ElementId::from("c"), &patch));
}
