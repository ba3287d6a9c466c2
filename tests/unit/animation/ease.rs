use super::*;

#[test]
fn every_curve_maps_endpoints() {
    for (ease, name) in NAMES {
        assert!((ease.apply(0.0)).abs() < 1e-9, "{name} at 0");
        assert!((ease.apply(1.0) - 1.0).abs() < 1e-9, "{name} at 1");
    }
}

#[test]
fn input_is_clamped() {
    assert_eq!(Ease::EaseInQuad.apply(-3.0), 0.0);
    assert_eq!(Ease::EaseInQuad.apply(7.0), 1.0);
}

#[test]
fn in_out_quad_is_symmetric() {
    let e = Ease::EaseInOutQuad;
    assert!((e.apply(0.5) - 0.5).abs() < 1e-12);
    assert!((e.apply(0.25) + e.apply(0.75) - 1.0).abs() < 1e-12);
}

#[test]
fn back_overshoots_and_bounce_stays_in_range() {
    let peak = (1..100)
        .map(|i| Ease::EaseOutBack.apply(f64::from(i) / 100.0))
        .fold(f64::MIN, f64::max);
    assert!(peak > 1.0);

    for i in 0..=100 {
        let v = Ease::EaseOutBounce.apply(f64::from(i) / 100.0);
        assert!((0.0..=1.0 + 1e-9).contains(&v));
    }
}

#[test]
fn names_roundtrip_through_serde() {
    let json = serde_json::to_string(&Ease::EaseOutBounce).unwrap();
    assert_eq!(json, "\"easeOutBounce\"");
    let back: Ease = serde_json::from_str(&json).unwrap();
    assert_eq!(back, Ease::EaseOutBounce);
}

#[test]
fn unknown_name_falls_back_to_linear() {
    let e: Ease = serde_json::from_str("\"easeSpring\"").unwrap();
    assert_eq!(e, Ease::Linear);
    assert_eq!(Ease::from_name("nope"), None);
}
