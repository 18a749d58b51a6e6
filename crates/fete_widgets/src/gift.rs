//! The virtual gift.
//!
//! ```text
//! open_dialog ─► unwrap(now) ─(1s)─► Open ─(300ms)─► confetti
//!                    ▲                  │
//!                    └──── close_dialog ┴─(500ms)─► Wrapped
//! ```

use std::time::Duration;

use rand::Rng;
use tracing::debug;

use crate::confetti::{ConfettiBurst, ConfettiStyle};
use crate::tween::{Easing, Tween};

/// Unwrapping animation length.
pub const UNWRAP_DURATION: Duration = Duration::from_millis(1_000);

/// Pause between the gift opening and the confetti.
pub const CONFETTI_DELAY: Duration = Duration::from_millis(300);

/// Delay after closing the dialog before the gift is wrapped again.
pub const RESET_DELAY: Duration = Duration::from_millis(500);

/// Fade-in of the gift contents.
pub const REVEAL_DURATION: Duration = Duration::from_millis(700);

/// Where the gift is in the unwrap sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GiftPhase {
    /// Wrapped, waiting for a tap.
    #[default]
    Wrapped,
    /// Wrapping paper flying off.
    Opening,
    /// Contents revealed.
    Open,
}

/// Transitions the host may want to react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GiftEvent {
    /// The contents became visible.
    Opened,
    /// A confetti burst was thrown; read it from [`Gift::confetti`].
    ConfettiThrown,
    /// The dialog closed long enough ago that the gift is wrapped again.
    Rewrapped,
}

#[derive(Debug, Clone, Copy)]
enum GiftTimer {
    Open,
    Confetti,
    Reset,
}

/// Gift widget state.
#[derive(Debug, Clone)]
pub struct Gift {
    style: ConfettiStyle,
    dialog_open: bool,
    phase: GiftPhase,
    open_at: Option<Duration>,
    confetti_at: Option<Duration>,
    reset_at: Option<Duration>,
    wrapping: Tween,
    contents: Tween,
    confetti: Option<ConfettiBurst>,
}

impl Gift {
    /// A wrapped gift. `compact` selects the smaller confetti burst used on
    /// narrow screens.
    #[must_use]
    pub fn new(compact: bool) -> Self {
        Self {
            style: if compact {
                ConfettiStyle::GIFT_MOBILE
            } else {
                ConfettiStyle::GIFT
            },
            dialog_open: false,
            phase: GiftPhase::Wrapped,
            open_at: None,
            confetti_at: None,
            reset_at: None,
            wrapping: Tween::at_rest(1.0, UNWRAP_DURATION, Easing::ExponentialInOut),
            contents: Tween::at_rest(0.0, REVEAL_DURATION, Easing::Linear),
            confetti: None,
        }
    }

    /// Shows the gift dialog. Cancels a pending re-wrap.
    pub fn open_dialog(&mut self) {
        self.dialog_open = true;
        self.reset_at = None;
    }

    /// Hides the dialog; the gift re-wraps [`RESET_DELAY`] later.
    pub fn close_dialog(&mut self, now: Duration) {
        if !self.dialog_open {
            return;
        }
        self.dialog_open = false;
        self.reset_at = Some(now + RESET_DELAY);
    }

    /// Taps the wrapping at host time `now`.
    ///
    /// Ignored unless the dialog is showing a wrapped gift.
    pub fn unwrap(&mut self, now: Duration) -> bool {
        if !self.dialog_open || self.phase != GiftPhase::Wrapped {
            return false;
        }
        self.phase = GiftPhase::Opening;
        self.open_at = Some(now + UNWRAP_DURATION);
        self.wrapping.retarget(0.0, now);
        debug!("Gift unwrapping at {:?}", now);
        true
    }

    /// Fires due timers in deadline order. Several may fire in one tick after
    /// a long host pause; a rewrap cancels whatever was still pending.
    pub fn tick<R: Rng + ?Sized>(&mut self, rng: &mut R, now: Duration) -> Vec<GiftEvent> {
        let mut events = Vec::new();

        while let Some((at, timer)) = self.next_due(now) {
            match timer {
                GiftTimer::Open => {
                    self.open_at = None;
                    self.phase = GiftPhase::Open;
                    self.contents.retarget(1.0, at);
                    self.confetti_at = Some(at + CONFETTI_DELAY);
                    events.push(GiftEvent::Opened);
                }
                GiftTimer::Confetti => {
                    self.confetti_at = None;
                    self.confetti = Some(ConfettiBurst::throw(&self.style, rng, at));
                    events.push(GiftEvent::ConfettiThrown);
                }
                GiftTimer::Reset => {
                    self.reset_at = None;
                    self.open_at = None;
                    self.confetti_at = None;
                    self.phase = GiftPhase::Wrapped;
                    self.wrapping.snap(1.0);
                    self.contents.snap(0.0);
                    events.push(GiftEvent::Rewrapped);
                }
            }
        }

        if self
            .confetti
            .as_ref()
            .is_some_and(|burst| burst.is_expired(now))
        {
            self.confetti = None;
        }
        events
    }

    /// Earliest timer due at `now`. Ties go to the timer armed first in the
    /// sequence.
    fn next_due(&self, now: Duration) -> Option<(Duration, GiftTimer)> {
        [
            (self.open_at, GiftTimer::Open),
            (self.confetti_at, GiftTimer::Confetti),
            (self.reset_at, GiftTimer::Reset),
        ]
        .into_iter()
        .filter_map(|(at, timer)| at.filter(|&at| now >= at).map(|at| (at, timer)))
        .min_by_key(|&(at, _)| at)
    }

    /// True while the dialog is showing.
    #[must_use]
    pub fn is_dialog_open(&self) -> bool {
        self.dialog_open
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> GiftPhase {
        self.phase
    }

    /// Opacity of the wrapping paper at `now`.
    #[must_use]
    pub fn wrapping_opacity(&self, now: Duration) -> f32 {
        if self.phase == GiftPhase::Open {
            0.0
        } else {
            self.wrapping.value_at(now)
        }
    }

    /// Scale of the wrapping paper at `now`: grows to 1.5x as it fades.
    #[must_use]
    pub fn wrapping_scale(&self, now: Duration) -> f32 {
        1.0 + 0.5 * (1.0 - self.wrapping.value_at(now))
    }

    /// Opacity of the revealed contents at `now`.
    #[must_use]
    pub fn contents_opacity(&self, now: Duration) -> f32 {
        self.contents.value_at(now)
    }

    /// Confetti currently falling, if any.
    #[must_use]
    pub fn confetti(&self) -> Option<&ConfettiBurst> {
        self.confetti.as_ref()
    }
}

impl Default for Gift {
    fn default() -> Self {
        Self::new(false)
    }
}
