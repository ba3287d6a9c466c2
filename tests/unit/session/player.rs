use super::*;

fn doc() -> Document {
    Document::from_json_str(
        r##"{
        "elements": [
            { "id": "box", "type": "rectangle", "x": 0, "y": 0, "width": 100, "height": 100,
              "animations": [
                { "id": "in", "type": "preset", "name": "fadeIn", "trigger": "on-load", "duration": 100 },
                { "id": "go", "type": "property", "property": "x", "to": 50, "trigger": "on-click", "duration": 100 },
                { "id": "spin", "type": "rotate", "toAngle": 180, "trigger": "after-prev", "duration": 100 }
              ] }
        ],
        "slides": [
            { "id": "s0", "spatialPosition": { "x": 0, "y": 0 }, "dimensions": { "width": 800, "height": 600 } }
        ],
        "states": [
            { "id": "small", "name": "Small", "overrides": { "box": { "width": 50, "shapeType": "circle" } } },
            { "id": "big", "name": "Big", "overrides": { "box": { "width": 200 } } }
        ]
    }"##,
    )
    .unwrap()
}

fn run_until_idle(player: &mut Player, mut now: Millis) -> Millis {
    for _ in 0..1000 {
        now += 16.0;
        if !player.frame(now).needs_frame && !player.build().is_busy() {
            break;
        }
    }
    now
}

#[test]
fn slide_build_plays_load_then_click_chain() {
    let mut player = Player::new(doc(), PlayerOpts::default());
    player.enter_slide(0, 0.0).unwrap();
    assert_eq!(player.slide(), Some(0));

    let now = run_until_idle(&mut player, 0.0);
    assert_eq!(player.document().elements[0].opacity, 100.0);
    assert!(player.has_more_steps());

    assert_eq!(player.next(now), PlayNext::Started);
    assert_eq!(player.next(now), PlayNext::Busy);
    let now = run_until_idle(&mut player, now);
    let el = &player.document().elements[0];
    assert_eq!(el.x, 50.0);
    assert!((el.angle - std::f64::consts::PI).abs() < 1e-9);
    assert_eq!(player.next(now), PlayNext::Exhausted);

    let events = player.drain_events();
    assert!(matches!(events.last(), Some(BuildEvent::ClickResolved { .. })));
}

#[test]
fn entering_a_missing_slide_is_an_error() {
    let mut player = Player::new(doc(), PlayerOpts::default());
    assert!(matches!(
        player.enter_slide(3, 0.0),
        Err(MorphError::Validation(_))
    ));
}

#[test]
fn state_morph_lands_on_the_target_and_clears_the_contour() {
    let mut player = Player::new(doc(), PlayerOpts::default());
    let runners = player.morph_to_state("small", 0.0).unwrap();
    assert_eq!(runners.len(), 1);
    assert!(player.is_morphing());

    player.frame(400.0);
    let el = &player.document().elements[0];
    assert!(el.contour_override.is_some());
    assert!(el.width < 100.0 && el.width > 50.0);

    player.frame(800.0);
    let el = &player.document().elements[0];
    assert_eq!(el.width, 50.0);
    assert_eq!(el.shape_type, "circle");
    assert!(el.contour_override.is_none());
    assert_eq!(player.document().active_state_id.as_deref(), Some("small"));
    assert!(!player.is_morphing());

    assert!(player.morph_to_state("nope", 900.0).is_err());
}

#[test]
fn state_cycling_wraps_and_instant_apply_skips_runners() {
    let mut player = Player::new(doc(), PlayerOpts::default());
    assert_eq!(player.next_state(0.0).unwrap().as_deref(), Some("small"));
    assert_eq!(player.next_state(10.0).unwrap().as_deref(), Some("big"));
    assert_eq!(player.next_state(20.0).unwrap().as_deref(), Some("small"));
    assert_eq!(player.previous_state(30.0).unwrap().as_deref(), Some("big"));

    let runners = player.apply_state("big", false, 40.0).unwrap();
    assert!(runners.is_empty());
    assert!(!player.is_morphing());
    assert_eq!(player.document().elements[0].width, 200.0);
}

#[test]
fn flow_elements_keep_frames_coming() {
    let mut player = Player::new(doc(), PlayerOpts::default());
    assert!(!player.frame(1.0).needs_frame);
    assert!(player.update_element(&ElementId::from("box"), |el| el.flow_animation = true));
    assert!(player.clock().force_continuous());
    assert!(player.frame(2.0).needs_frame);
    assert!(!player.update_element(&ElementId::from("ghost"), |_| {}));
}

#[test]
fn disabled_animations_finish_in_one_frame() {
    let opts = PlayerOpts {
        engine: EngineOpts {
            animations_enabled: false,
        },
        ..PlayerOpts::default()
    };
    let mut player = Player::new(doc(), opts);
    player.morph_to_state("big", 0.0).unwrap();
    let report = player.frame(1.0);
    assert!(report.redraw);
    assert!(!report.needs_frame);
    assert_eq!(player.document().elements[0].width, 200.0);
}

#[test]
fn options_deserialize_from_partial_json() {
    let opts: PlayerOpts = serde_json::from_str(
        r#"{ "morph": { "durationMs": 400 }, "build": { "watchdogGraceMs": null } }"#,
    )
    .unwrap();
    assert_eq!(opts.morph.duration_ms, 400.0);
    assert_eq!(opts.morph.sample_count, 60);
    assert_eq!(opts.build.watchdog_grace_ms, None);
    assert!(opts.engine.animations_enabled);
}
