//! The birthday cake.
//!
//! ```text
//! Lit ──blow(now)──► Blowing ──tick(now ≥ +1s)──► Blown
//!  │                   │
//!  └ flames visible    └ confetti falling, button disabled
//! ```

use std::time::Duration;

use rand::Rng;
use tracing::debug;

use crate::confetti::{ConfettiBurst, ConfettiStyle};
use crate::notice::Notice;
use crate::tween::{Easing, Tween};

/// Candles on the cake.
pub const CANDLE_COUNT: usize = 3;

/// How long the blow-out animation runs before the wish is made.
pub const BLOW_DURATION: Duration = Duration::from_secs(1);

/// How long the flames take to fade once blown.
pub const FLAME_FADE: Duration = Duration::from_millis(500);

/// Where the cake is in its one-way life.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CakePhase {
    /// Candles burning, waiting for a blow.
    #[default]
    Lit,
    /// Flames out, animation still running.
    Blowing,
    /// Wish made.
    Blown,
}

/// Something the host should react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CakeEvent {
    /// The blow-out animation finished. Show the notice and run any
    /// celebration hooked to the cake.
    WishMade(Notice),
}

/// Cake widget state.
#[derive(Debug, Clone)]
pub struct Cake {
    phase: CakePhase,
    wish_at: Option<Duration>,
    flame: Tween,
    confetti: Option<ConfettiBurst>,
}

impl Default for Cake {
    fn default() -> Self {
        Self::new()
    }
}

impl Cake {
    /// A freshly lit cake.
    #[must_use]
    pub fn new() -> Self {
        Self {
            phase: CakePhase::Lit,
            wish_at: None,
            flame: Tween::at_rest(1.0, FLAME_FADE, Easing::Linear),
            confetti: None,
        }
    }

    /// Blows the candles out at host time `now`.
    ///
    /// Only a lit cake can be blown; later gestures are ignored and return
    /// `false`.
    pub fn blow<R: Rng + ?Sized>(&mut self, rng: &mut R, now: Duration) -> bool {
        if self.phase != CakePhase::Lit {
            return false;
        }
        self.phase = CakePhase::Blowing;
        self.wish_at = Some(now + BLOW_DURATION);
        self.flame.retarget(0.0, now);
        self.confetti = Some(ConfettiBurst::throw(&ConfettiStyle::CAKE, rng, now));
        debug!("Candles blown at {:?}", now);
        true
    }

    /// Advances timers. Returns the wish event on the tick that completes the
    /// animation.
    pub fn tick(&mut self, now: Duration) -> Option<CakeEvent> {
        if self
            .confetti
            .as_ref()
            .is_some_and(|burst| burst.is_expired(now))
        {
            self.confetti = None;
        }

        match self.wish_at {
            Some(at) if now >= at => {
                self.wish_at = None;
                self.phase = CakePhase::Blown;
                Some(CakeEvent::WishMade(Notice::new(
                    "Candles blown!",
                    "Your wish is coming true...",
                )))
            }
            _ => None,
        }
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> CakePhase {
        self.phase
    }

    /// True while the candle flames burn steadily.
    #[must_use]
    pub fn flames_visible(&self) -> bool {
        self.phase == CakePhase::Lit
    }

    /// Flame opacity at host time `now`; fades out after a blow.
    #[must_use]
    pub fn flame_opacity(&self, now: Duration) -> f32 {
        self.flame.value_at(now)
    }

    /// True while the blow button accepts a press.
    #[must_use]
    pub fn can_blow(&self) -> bool {
        self.phase == CakePhase::Lit
    }

    /// Label for the blow button.
    #[must_use]
    pub fn button_label(&self) -> &'static str {
        match self.phase {
            CakePhase::Lit => "Make a Wish & Blow Candles",
            CakePhase::Blowing | CakePhase::Blown => "Candles Blown",
        }
    }

    /// Confetti currently falling, if any.
    #[must_use]
    pub fn confetti(&self) -> Option<&ConfettiBurst> {
        self.confetti.as_ref()
    }
}
