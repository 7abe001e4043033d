use std::collections::HashMap;
use std::time::Instant;

use crate::document::{Document, NodeId};
use crate::transitions::TransitionConfig;

/// Which property is being tweened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TweenProperty {
    ScrollTop,
    Opacity,
}

impl TweenProperty {
    fn read(self, doc: &Document, node: NodeId) -> f32 {
        match self {
            TweenProperty::ScrollTop => f32::from(doc.scroll_top(node)),
            TweenProperty::Opacity => doc.opacity(node),
        }
    }

    fn write(self, doc: &mut Document, node: NodeId, value: f32) {
        match self {
            TweenProperty::ScrollTop => {
                doc.set_scroll_top(node, value.round().clamp(0.0, f32::from(u16::MAX)) as u16)
            }
            TweenProperty::Opacity => doc.set_opacity(node, value),
        }
    }
}

/// A single active tween.
#[derive(Debug, Clone)]
struct Tween {
    from: f32,
    to: f32,
    start: Instant,
    config: TransitionConfig,
}

impl Tween {
    fn progress(&self, now: Instant) -> f32 {
        if self.config.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.start);
        (elapsed.as_secs_f32() / self.config.duration.as_secs_f32()).clamp(0.0, 1.0)
    }

    fn value_at(&self, progress: f32) -> f32 {
        self.from + (self.to - self.from) * self.config.easing.apply(progress)
    }
}

/// Tracks property tweens across frames.
///
/// Every tween, zero-length ones included, goes through [`animate`] and
/// [`advance`]; a zero-length tween simply finishes on the step taken when it
/// starts.
///
/// [`animate`]: AnimationState::animate
/// [`advance`]: AnimationState::advance
#[derive(Debug, Default)]
pub struct AnimationState {
    active: HashMap<(NodeId, TweenProperty), Tween>,
    /// Reduced motion flag - when true, tweens complete instantly.
    reduced_motion: bool,
}

impl AnimationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable reduced motion (accessibility).
    pub fn set_reduced_motion(&mut self, enabled: bool) {
        self.reduced_motion = enabled;
    }

    /// Returns true if any tween is still running.
    pub fn has_active_transitions(&self) -> bool {
        !self.active.is_empty()
    }

    pub fn is_animating(&self, node: NodeId, property: TweenProperty) -> bool {
        self.active.contains_key(&(node, property))
    }

    /// Start tweening `property` of `node` from its current value to `to`,
    /// replacing any tween already running on that property, then take the
    /// first step at `now`.
    pub fn animate(
        &mut self,
        doc: &mut Document,
        node: NodeId,
        property: TweenProperty,
        to: f32,
        config: TransitionConfig,
        now: Instant,
    ) {
        if !doc.contains(node) {
            return;
        }
        let config = if self.reduced_motion {
            TransitionConfig::instant()
        } else {
            config
        };
        let tween = Tween {
            from: property.read(doc, node),
            to,
            start: now,
            config,
        };
        log::trace!(
            "tween {property:?} on {node}: {} -> {to} over {:?}",
            tween.from,
            config.duration
        );
        self.active.insert((node, property), tween);
        self.step(doc, node, property, now);
    }

    /// Advance every running tween to `now` and prune finished ones.
    pub fn advance(&mut self, doc: &mut Document, now: Instant) {
        let keys: Vec<(NodeId, TweenProperty)> = self.active.keys().copied().collect();
        for (node, property) in keys {
            self.step(doc, node, property, now);
        }
    }

    /// Drop every tween targeting `node`.
    pub fn cancel(&mut self, node: NodeId) {
        self.active.retain(|(n, _), _| *n != node);
    }

    fn step(&mut self, doc: &mut Document, node: NodeId, property: TweenProperty, now: Instant) {
        let key = (node, property);
        if !doc.contains(node) {
            self.active.remove(&key);
            return;
        }
        let Some(tween) = self.active.get(&key) else {
            return;
        };
        let progress = tween.progress(now);
        property.write(doc, node, tween.value_at(progress));
        if progress >= 1.0 {
            self.active.remove(&key);
        }
    }
}
