//! # Page Flow
//!
//! Glue between widgets that the page itself owns: the loading gate, the
//! letter the cake unlocks, and which of the two audio sources is allowed
//! to play.
//!
//! ```text
//! load ──1.5s──► content shown
//! CakeEvent::WishMade ──► letter opens, scrolls into view 300ms later
//! PlayerEvent::Started ──► background music paused
//! PlayerEvent::Stopped ──► background music resumes
//! ```

use std::time::Duration;

use tracing::{debug, info};

use crate::cake::CakeEvent;
use crate::player::PlayerEvent;
use crate::tween::{Easing, Tween};

/// How long the loading screen stays up.
pub const LOADING_GATE: Duration = Duration::from_millis(1_500);

/// Letter fade-in time.
pub const LETTER_FADE: Duration = Duration::from_secs(1);

/// Delay between the letter opening and the scroll to it.
pub const LETTER_SCROLL_DELAY: Duration = Duration::from_millis(300);

/// Text on the loading screen.
pub const LOADING_MESSAGE: &str = "Loading a special surprise...";

/// Letter headline.
pub const LETTER_TITLE: &str = "Happy Birthday My Love";

/// Letter body, one entry per paragraph.
pub const LETTER_BODY: &[&str] = &[
    "To my amazing girlfriend,",
    "On this special day, I want to celebrate you and all that you are. Your smile brightens \
     even my darkest days, and your laugh is the sweetest melody I've ever heard. Every moment \
     with you feels like a precious gift I get to unwrap over and over again.",
    "Your love has transformed me in ways I never thought possible. You've shown me what it \
     means to truly care for someone, to put their happiness before my own, and to find joy in \
     the simplest moments we share together.",
    "Today, as you begin another journey around the sun, I promise to be by your side, holding \
     your hand, supporting your dreams, and loving you more deeply with each passing day.",
    "May this year bring you all the happiness, success, and love that you deserve. May your \
     heart be light, your smile be bright, and your spirit soar with the knowledge that you are \
     loved beyond measure.",
    "Happy Birthday, my love. Today and always.",
    "With all my heart,",
    "Your Love",
];

/// Something the host should do for the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageEvent {
    /// Loading finished; render the content.
    Loaded,
    /// Scroll the letter into view.
    ScrollToLetter,
    /// Pause the background track.
    PauseBackground,
    /// Resume the background track.
    ResumeBackground,
}

/// Page-level state.
#[derive(Debug, Clone)]
pub struct Page {
    loaded: bool,
    letter_open: bool,
    letter: Tween,
    scroll_at: Option<Duration>,
    background_playing: bool,
    background_dismissed: bool,
    playlist_playing: bool,
}

impl Default for Page {
    fn default() -> Self {
        Self::new()
    }
}

impl Page {
    /// A page that has just started loading, with background music on.
    #[must_use]
    pub fn new() -> Self {
        Self {
            loaded: false,
            letter_open: false,
            letter: Tween::at_rest(0.0, LETTER_FADE, Easing::Linear),
            scroll_at: None,
            background_playing: true,
            background_dismissed: false,
            playlist_playing: false,
        }
    }

    /// Advances timers, returning what came due in order.
    pub fn tick(&mut self, now: Duration) -> Vec<PageEvent> {
        let mut events = Vec::new();
        if !self.loaded && now >= LOADING_GATE {
            self.loaded = true;
            info!("Page loaded at {:?}", now);
            events.push(PageEvent::Loaded);
        }
        if let Some(at) = self.scroll_at {
            if now >= at {
                self.scroll_at = None;
                events.push(PageEvent::ScrollToLetter);
            }
        }
        events
    }

    /// Reacts to the cake. A made wish opens the letter once.
    pub fn on_cake(&mut self, event: &CakeEvent, now: Duration) {
        let CakeEvent::WishMade(_) = event;
        if self.letter_open {
            return;
        }
        self.letter_open = true;
        self.letter.retarget(1.0, now);
        self.scroll_at = Some(now + LETTER_SCROLL_DELAY);
        debug!("Letter revealed at {:?}", now);
    }

    /// Reacts to the playlist player, returning the background audio change.
    pub fn on_player(&mut self, event: PlayerEvent) -> Option<PageEvent> {
        match event {
            PlayerEvent::Started => {
                self.playlist_playing = true;
                self.set_background(false)
            }
            PlayerEvent::Stopped => {
                self.playlist_playing = false;
                if self.background_dismissed {
                    None
                } else {
                    self.set_background(true)
                }
            }
            PlayerEvent::TrackChanged(_) | PlayerEvent::Seeked(_) => None,
        }
    }

    /// The listener stopped the background track by hand. It stays off
    /// until the page reloads.
    pub fn stop_background(&mut self) -> Option<PageEvent> {
        self.background_dismissed = true;
        self.set_background(false)
    }

    fn set_background(&mut self, playing: bool) -> Option<PageEvent> {
        if self.background_playing == playing {
            return None;
        }
        self.background_playing = playing;
        debug!("Background music {}", if playing { "resumed" } else { "paused" });
        Some(if playing {
            PageEvent::ResumeBackground
        } else {
            PageEvent::PauseBackground
        })
    }

    /// True while the loading screen should be shown.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        !self.loaded
    }

    /// True once the cake has unlocked the letter.
    #[must_use]
    pub fn letter_open(&self) -> bool {
        self.letter_open
    }

    /// Letter opacity at host time `now`.
    #[must_use]
    pub fn letter_opacity(&self, now: Duration) -> f32 {
        self.letter.value_at(now)
    }

    /// True while the background track should be audible.
    #[must_use]
    pub fn background_playing(&self) -> bool {
        self.background_playing
    }

    /// True while the playlist player is playing.
    #[must_use]
    pub fn playlist_playing(&self) -> bool {
        self.playlist_playing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notice::Notice;

    fn wish() -> CakeEvent {
        CakeEvent::WishMade(Notice::new("Candles blown!", "Your wish is coming true..."))
    }

    #[test]
    fn test_loading_gate() {
        let mut page = Page::new();
        assert!(page.is_loading());
        assert!(page.tick(Duration::from_millis(1_499)).is_empty());
        assert_eq!(page.tick(LOADING_GATE), vec![PageEvent::Loaded]);
        assert!(!page.is_loading());
        assert!(page.tick(Duration::from_secs(5)).is_empty());
    }

    #[test]
    fn test_wish_opens_letter_and_scrolls() {
        let mut page = Page::new();
        page.tick(Duration::from_secs(2));
        assert!(!page.letter_open());
        assert_eq!(page.letter_opacity(Duration::from_secs(2)), 0.0);

        page.on_cake(&wish(), Duration::from_secs(10));
        assert!(page.letter_open());
        assert!((page.letter_opacity(Duration::from_millis(10_500)) - 0.5).abs() < 1e-5);
        assert_eq!(page.letter_opacity(Duration::from_secs(11)), 1.0);

        assert!(page.tick(Duration::from_millis(10_299)).is_empty());
        assert_eq!(
            page.tick(Duration::from_millis(10_300)),
            vec![PageEvent::ScrollToLetter]
        );
        assert!(page.tick(Duration::from_secs(12)).is_empty());
    }

    #[test]
    fn test_second_wish_does_not_rescroll() {
        let mut page = Page::new();
        page.on_cake(&wish(), Duration::from_secs(3));
        page.tick(Duration::from_secs(4));
        page.on_cake(&wish(), Duration::from_secs(5));
        assert!(page.tick(Duration::from_secs(6)).is_empty());
    }

    #[test]
    fn test_playlist_pauses_background() {
        let mut page = Page::new();
        assert!(page.background_playing());

        assert_eq!(
            page.on_player(PlayerEvent::Started),
            Some(PageEvent::PauseBackground)
        );
        assert!(page.playlist_playing());
        assert!(!page.background_playing());
        assert_eq!(page.on_player(PlayerEvent::TrackChanged(1)), None);

        assert_eq!(
            page.on_player(PlayerEvent::Stopped),
            Some(PageEvent::ResumeBackground)
        );
        assert!(page.background_playing());
        assert!(!page.playlist_playing());
    }

    #[test]
    fn test_dismissed_background_stays_off() {
        let mut page = Page::new();
        assert_eq!(page.stop_background(), Some(PageEvent::PauseBackground));
        assert_eq!(page.on_player(PlayerEvent::Started), None);
        assert_eq!(page.on_player(PlayerEvent::Stopped), None);
        assert!(!page.background_playing());
    }

    #[test]
    fn test_cake_drives_letter_end_to_end() {
        use crate::cake::Cake;
        use fete_core::ShowSeed;

        let mut rng = ShowSeed::new(9).rng();
        let mut cake = Cake::new();
        let mut page = Page::new();
        page.tick(LOADING_GATE);

        cake.blow(&mut rng, Duration::from_secs(4));
        let event = cake.tick(Duration::from_secs(5));
        assert!(event.is_some());
        if let Some(event) = event {
            page.on_cake(&event, Duration::from_secs(5));
        }
        assert!(page.letter_open());
        assert!(!LETTER_BODY.is_empty());
        assert_eq!(LETTER_TITLE, "Happy Birthday My Love");
    }
}
