use std::time::Duration;

/// Configuration for a single property tween.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionConfig {
    pub duration: Duration,
    pub easing: Easing,
}

impl TransitionConfig {
    pub fn new(duration: Duration, easing: Easing) -> Self {
        Self { duration, easing }
    }

    /// Linear tween lasting `ms` milliseconds.
    pub fn millis(ms: u64) -> Self {
        Self::new(Duration::from_millis(ms), Easing::Linear)
    }

    /// Tween lasting `ms` milliseconds that starts and ends slowly.
    pub fn swing(ms: u64) -> Self {
        Self::new(Duration::from_millis(ms), Easing::EaseInOut)
    }

    /// Zero-length tween; completes on its first step.
    pub fn instant() -> Self {
        Self::millis(0)
    }
}

/// Easing function for transitions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Easing {
    #[default]
    Linear,
    EaseInOut,
}

impl Easing {
    /// Apply easing to progress (0.0 to 1.0).
    pub fn apply(self, t: f32) -> f32 {
        match self {
            Easing::Linear => t,
            Easing::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
        }
    }
}
