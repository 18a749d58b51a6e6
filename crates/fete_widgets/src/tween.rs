//! Time-sampled tweens.
//!
//! Widgets do not tick their animations; they record when a transition
//! started and sample it at whatever time the host renders.

use std::time::Duration;

/// Easing curve applied to normalized progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    /// Constant rate.
    Linear,
    /// Fast start, gentle landing: `1 - 2^(-10t)`.
    #[default]
    ExponentialOut,
    /// Gentle start and landing.
    ExponentialInOut,
}

impl Easing {
    /// Maps progress `t` (clamped to 0-1) through the curve.
    #[must_use]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::ExponentialOut => {
                if t >= 1.0 {
                    1.0
                } else {
                    1.0 - 2.0_f32.powf(-10.0 * t)
                }
            }
            Self::ExponentialInOut => {
                if t <= 0.0 {
                    0.0
                } else if t >= 1.0 {
                    1.0
                } else if t < 0.5 {
                    2.0_f32.powf(20.0 * t - 10.0) / 2.0
                } else {
                    (2.0 - 2.0_f32.powf(-20.0 * t + 10.0)) / 2.0
                }
            }
        }
    }
}

/// A scalar moving from one value to another over a fixed span of host time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    from: f32,
    to: f32,
    started_at: Duration,
    duration: Duration,
    easing: Easing,
}

impl Tween {
    /// A tween resting at `value`.
    #[must_use]
    pub fn at_rest(value: f32, duration: Duration, easing: Easing) -> Self {
        Self {
            from: value,
            to: value,
            started_at: Duration::ZERO,
            duration,
            easing,
        }
    }

    /// Starts moving towards `target` from wherever the tween is at `now`.
    pub fn retarget(&mut self, target: f32, now: Duration) {
        self.from = self.value_at(now);
        self.to = target;
        self.started_at = now;
    }

    /// Jumps to `value` without animating.
    pub fn snap(&mut self, value: f32) {
        self.from = value;
        self.to = value;
    }

    /// Value at host time `now`.
    #[must_use]
    pub fn value_at(&self, now: Duration) -> f32 {
        let t = self.progress(now);
        self.from + (self.to - self.from) * self.easing.apply(t)
    }

    /// The value the tween is heading to.
    #[must_use]
    pub fn target(&self) -> f32 {
        self.to
    }

    /// True once the tween has reached its target.
    #[must_use]
    pub fn is_complete(&self, now: Duration) -> bool {
        self.progress(now) >= 1.0
    }

    fn progress(&self, now: Duration) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_sub(self.started_at);
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
    }
}
