use std::time::{Duration, Instant};

use kickdom::{AnimationState, Document, Easing, Element, TransitionConfig, TweenProperty};

// =============================================================================
// Easing Function Tests
// =============================================================================

#[test]
fn test_easing_linear() {
    assert_eq!(Easing::Linear.apply(0.0), 0.0);
    assert_eq!(Easing::Linear.apply(0.5), 0.5);
    assert_eq!(Easing::Linear.apply(1.0), 1.0);
}

#[test]
fn test_easing_boundaries() {
    // All easing functions should map 0->0 and 1->1
    for easing in [Easing::Linear, Easing::EaseInOut] {
        assert_eq!(easing.apply(0.0), 0.0, "{:?} at 0", easing);
        assert_eq!(easing.apply(1.0), 1.0, "{:?} at 1", easing);
    }
}

#[test]
fn test_easing_in_out_is_symmetric() {
    let ease = Easing::EaseInOut;
    assert_eq!(ease.apply(0.5), 0.5);
    assert!(ease.apply(0.25) < 0.25);
    assert!(ease.apply(0.75) > 0.75);
    assert!((ease.apply(0.25) + ease.apply(0.75) - 1.0).abs() < 1e-6);
}

#[test]
fn test_swing_tween_lags_linear_early() {
    let mut doc = Document::new();
    let list = scroller(&mut doc);
    let mut anim = AnimationState::new();
    let start = Instant::now();

    anim.animate(
        &mut doc,
        list,
        TweenProperty::ScrollTop,
        100.0,
        TransitionConfig::swing(1000),
        start,
    );
    anim.advance(&mut doc, start + Duration::from_millis(250));
    assert!((12..=13).contains(&doc.scroll_top(list)));

    anim.advance(&mut doc, start + Duration::from_millis(1000));
    assert_eq!(doc.scroll_top(list), 100);
    assert!(!anim.has_active_transitions());
}

// =============================================================================
// Tweens
// =============================================================================

fn scroller(doc: &mut Document) -> kickdom::NodeId {
    let body = doc.body();
    doc.append(body, Element::ul().scroll_top(0)).unwrap()
}

#[test]
fn test_zero_duration_completes_on_start() {
    let mut doc = Document::new();
    let list = scroller(&mut doc);
    let mut anim = AnimationState::new();

    anim.animate(
        &mut doc,
        list,
        TweenProperty::ScrollTop,
        7.0,
        TransitionConfig::instant(),
        Instant::now(),
    );

    assert_eq!(doc.scroll_top(list), 7);
    assert!(!anim.has_active_transitions());
}

#[test]
fn test_timed_tween_interpolates() {
    let mut doc = Document::new();
    let list = scroller(&mut doc);
    let mut anim = AnimationState::new();
    let start = Instant::now();

    anim.animate(
        &mut doc,
        list,
        TweenProperty::ScrollTop,
        10.0,
        TransitionConfig::millis(1000),
        start,
    );
    assert_eq!(doc.scroll_top(list), 0);
    assert!(anim.is_animating(list, TweenProperty::ScrollTop));

    anim.advance(&mut doc, start + Duration::from_millis(500));
    assert_eq!(doc.scroll_top(list), 5);

    anim.advance(&mut doc, start + Duration::from_millis(1500));
    assert_eq!(doc.scroll_top(list), 10);
    assert!(!anim.has_active_transitions());
}

#[test]
fn test_reduced_motion_is_instant() {
    let mut doc = Document::new();
    let body = doc.body();
    let panel = doc.append(body, Element::div().opacity(0.0)).unwrap();
    let mut anim = AnimationState::new();
    anim.set_reduced_motion(true);

    anim.animate(
        &mut doc,
        panel,
        TweenProperty::Opacity,
        1.0,
        TransitionConfig::millis(1000),
        Instant::now(),
    );

    assert_eq!(doc.opacity(panel), 1.0);
}

#[test]
fn test_removed_node_drops_tween() {
    let mut doc = Document::new();
    let list = scroller(&mut doc);
    let mut anim = AnimationState::new();
    let start = Instant::now();

    anim.animate(
        &mut doc,
        list,
        TweenProperty::ScrollTop,
        10.0,
        TransitionConfig::millis(1000),
        start,
    );
    doc.remove(list);
    anim.advance(&mut doc, start + Duration::from_millis(100));

    assert!(!anim.has_active_transitions());
}
