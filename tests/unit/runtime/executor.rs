use super::*;
use crate::document::Document;
use crate::document::model::Trigger;
use crate::geometry::shapes::ShapeRegistry;

fn doc() -> Document {
    Document::from_json_str(
        r##"{
        "elements": [
            { "id": "a", "type": "rectangle", "x": 10, "y": 20, "width": 100, "height": 50, "angle": 1.0 }
        ],
        "states": [
            { "id": "moved", "name": "Moved", "overrides": { "a": { "x": 110 } } }
        ]
    }"##,
    )
    .unwrap()
}

fn anim(kind: AnimationKind, duration: f64) -> AnimationDescriptor {
    AnimationDescriptor {
        id: "x".into(),
        trigger: Trigger::OnClick,
        duration,
        delay: 0.0,
        easing: Ease::Linear,
        repeat: 0,
        yoyo: false,
        kind,
    }
}

fn preset(name: &str, duration: f64) -> AnimationDescriptor {
    anim(
        AnimationKind::Preset { name: name.into() },
        duration,
    )
}

struct Rig {
    doc: Document,
    engine: AnimationEngine,
    morph: MorphAnimator,
    registry: ShapeRegistry,
}

impl Rig {
    fn new() -> Self {
        Self {
            doc: doc(),
            engine: AnimationEngine::default(),
            morph: MorphAnimator::default(),
            registry: ShapeRegistry::with_builtins(),
        }
    }

    fn start(&mut self, anim: &AnimationDescriptor, now: f64) -> StartedStep {
        let mut exec = EngineExecutor {
            engine: &mut self.engine,
            morph: &mut self.morph,
            store: &mut self.doc,
            provider: &self.registry,
        };
        exec.start_step(&ElementId::from("a"), anim, now)
    }

    fn tick(&mut self, now: f64) -> Vec<RunnerId> {
        self.engine.tick(now, &mut self.doc).finished
    }

    fn el(&self) -> &Element {
        &self.doc.elements[0]
    }
}

#[test]
fn fade_in_starts_transparent_and_ends_opaque() {
    let mut rig = Rig::new();
    let started = rig.start(&preset("fadeIn", 200.0), 0.0);
    assert_eq!(started.runners.len(), 1);
    assert_eq!(started.expected_ms, 200.0);

    rig.tick(0.0);
    assert_eq!(rig.el().opacity, 0.0);
    assert_eq!(rig.tick(200.0), started.runners);
    assert_eq!(rig.el().opacity, 100.0);
}

#[test]
fn scale_in_grows_from_the_center() {
    let mut rig = Rig::new();
    rig.start(&preset("scaleIn", 300.0), 0.0);
    rig.tick(0.0);
    assert!((rig.el().x - 60.0).abs() < 1e-9);
    assert!((rig.el().y - 45.0).abs() < 1e-9);
    assert!(rig.el().width.abs() < 1e-9);
    assert!(rig.el().opacity.abs() < 1e-9);
    rig.tick(300.0);
    assert_eq!((rig.el().x, rig.el().y), (10.0, 20.0));
    assert_eq!((rig.el().width, rig.el().height), (100.0, 50.0));
}

#[test]
fn bounce_and_pulse_return_to_rest() {
    let mut rig = Rig::new();
    let started = rig.start(&preset("bounce", 0.0), 0.0);
    assert_eq!(started.expected_ms, 450.0);
    rig.tick(150.0);
    assert_eq!(rig.el().y, 0.0);
    rig.tick(450.0);
    assert_eq!(rig.el().y, 20.0);

    let started = rig.start(&preset("pulse", 300.0), 1000.0);
    rig.tick(1150.0);
    assert!((rig.el().width - 110.0).abs() < 1e-9);
    assert!((rig.el().x - 5.0).abs() < 1e-9);
    assert_eq!(rig.tick(1300.0), started.runners);
    assert_eq!(rig.el().width, 100.0);
    assert_eq!(rig.el().x, 10.0);
}

#[test]
fn shake_alternates_and_restores_x() {
    let mut rig = Rig::new();
    let started = rig.start(&preset("shake", 100.0), 0.0);
    assert_eq!(started.expected_ms, 400.0);
    rig.tick(50.0);
    assert!((rig.el().x - 15.0).abs() < 1e-9);
    rig.tick(150.0);
    assert!((rig.el().x - 15.0).abs() < 1e-9);
    assert_eq!(rig.tick(400.0), started.runners);
    assert_eq!(rig.el().x, 10.0);
}

#[test]
fn rotate_converts_degrees_and_adds_when_relative() {
    let mut rig = Rig::new();
    rig.start(
        &anim(
            AnimationKind::Rotate {
                to_angle: 90.0,
                relative: true,
            },
            100.0,
        ),
        0.0,
    );
    rig.tick(100.0);
    assert!((rig.el().angle - (1.0 + std::f64::consts::FRAC_PI_2)).abs() < 1e-9);
}

#[test]
fn property_tween_honors_explicit_from() {
    let mut rig = Rig::new();
    rig.start(
        &anim(
            AnimationKind::Property {
                property: "x".into(),
                from: Some(crate::document::model::PropertyValue::Number(0.0)),
                to: crate::document::model::PropertyValue::Number(100.0),
            },
            100.0,
        ),
        0.0,
    );
    rig.tick(25.0);
    assert!((rig.el().x - 25.0).abs() < 1e-9);
}

#[test]
fn unusable_descriptors_start_nothing() {
    let mut rig = Rig::new();
    assert!(rig.start(&preset("spin", 100.0), 0.0).runners.is_empty());
    let bad_prop = anim(
        AnimationKind::Property {
            property: "skew".into(),
            from: None,
            to: crate::document::model::PropertyValue::Number(1.0),
        },
        100.0,
    );
    assert!(rig.start(&bad_prop, 0.0).runners.is_empty());
    let bad_path = anim(
        AnimationKind::Path {
            path_data: "not a path".into(),
            is_relative: false,
            orient_to_path: false,
        },
        100.0,
    );
    assert!(rig.start(&bad_path, 0.0).runners.is_empty());
    assert!(rig.engine.is_empty());
}

#[test]
fn transition_morphs_to_the_named_state() {
    let mut rig = Rig::new();
    let started = rig.start(
        &anim(
            AnimationKind::Transition {
                state_id: "moved".into(),
            },
            100.0,
        ),
        0.0,
    );
    assert_eq!(started.runners.len(), 1);
    rig.tick(100.0);
    assert_eq!(rig.el().x, 110.0);

    let missing = rig.start(
        &anim(
            AnimationKind::Transition {
                state_id: "nope".into(),
            },
            100.0,
        ),
        200.0,
    );
    assert!(missing.runners.is_empty());
}

#[test]
fn deleted_element_starts_nothing() {
    let mut rig = Rig::new();
    rig.doc.remove_element(&ElementId::from("a"));
    assert_eq!(rig.start(&preset("fadeIn", 100.0), 0.0), StartedStep::default());
}
