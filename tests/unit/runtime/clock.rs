use super::*;
use crate::document::Document;
use crate::document::model::Element;
use crate::foundation::core::Rect;

#[test]
fn time_is_monotonic() {
    let mut c = GlobalClock::new();
    assert_eq!(c.advance(16.0), 16.0);
    assert_eq!(c.advance(8.0), 16.0);
    assert_eq!(c.now(), 16.0);
    assert_eq!(c.advance(32.5), 32.5);
}

#[test]
fn flow_elements_force_continuous_ticking() {
    let mut doc = Document::default();
    doc.elements
        .push(Element::new("a", "rectangle", Rect::new(0.0, 0.0, 1.0, 1.0)));
    let mut c = GlobalClock::new();

    assert!(!c.refresh_continuous(&doc));
    assert!(!c.needs_frame(0));
    assert!(c.needs_frame(1));

    doc.elements[0].flow_animation = true;
    assert!(c.refresh_continuous(&doc));
    assert!(c.force_continuous());
    assert!(c.needs_frame(0));
    assert!(!c.refresh_continuous(&doc));

    doc.elements.clear();
    assert!(c.refresh_continuous(&doc));
    assert!(!c.needs_frame(0));
}
