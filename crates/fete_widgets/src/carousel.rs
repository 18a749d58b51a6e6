//! Auto-advancing photo carousel.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Time between automatic advances.
pub const AUTO_ADVANCE: Duration = Duration::from_millis(3_000);

/// One slide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Photo {
    /// Image URL or path.
    pub src: String,
    /// Alt text.
    pub alt: String,
    /// Tilt in degrees, for the polaroid look.
    pub rotation_deg: f32,
}

impl Photo {
    /// Creates a slide.
    pub fn new(src: impl Into<String>, alt: impl Into<String>, rotation_deg: f32) -> Self {
        Self {
            src: src.into(),
            alt: alt.into(),
            rotation_deg,
        }
    }
}

/// Carousel state.
///
/// The active index is always in range for a non-empty carousel; an empty
/// carousel ignores every gesture.
#[derive(Debug, Clone)]
pub struct Carousel {
    photos: Vec<Photo>,
    active: usize,
    hovering: bool,
    next_advance: Option<Duration>,
}

impl Carousel {
    /// Creates a carousel at the first slide. Auto-advance starts on the first
    /// [`Carousel::tick`].
    #[must_use]
    pub fn new(photos: Vec<Photo>) -> Self {
        Self {
            photos,
            active: 0,
            hovering: false,
            next_advance: None,
        }
    }

    /// The slides.
    #[must_use]
    pub fn photos(&self) -> &[Photo] {
        &self.photos
    }

    /// Index of the visible slide.
    #[must_use]
    pub fn active_index(&self) -> usize {
        self.active
    }

    /// The visible slide.
    #[must_use]
    pub fn active(&self) -> Option<&Photo> {
        self.photos.get(self.active)
    }

    /// Shows the next slide, wrapping to the first.
    pub fn next(&mut self) {
        if !self.photos.is_empty() {
            self.active = (self.active + 1) % self.photos.len();
        }
    }

    /// Shows the previous slide, wrapping to the last.
    pub fn prev(&mut self) {
        if !self.photos.is_empty() {
            self.active = self.active.checked_sub(1).unwrap_or(self.photos.len() - 1);
        }
    }

    /// Jumps to `index`. Out-of-range indices are ignored.
    pub fn go_to(&mut self, index: usize) {
        if index < self.photos.len() {
            self.active = index;
        }
    }

    /// Pointer entered the carousel: auto-advance pauses.
    pub fn hover_start(&mut self) {
        self.hovering = true;
        self.next_advance = None;
    }

    /// Pointer left: auto-advance restarts with a full interval.
    pub fn hover_end(&mut self, now: Duration) {
        self.hovering = false;
        self.next_advance = Some(now + AUTO_ADVANCE);
    }

    /// True while auto-advance is paused.
    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.hovering
    }

    /// Advances automatically when the interval has elapsed. Returns true if
    /// the slide changed.
    pub fn tick(&mut self, now: Duration) -> bool {
        if self.hovering || self.photos.len() < 2 {
            return false;
        }
        match self.next_advance {
            None => {
                self.next_advance = Some(now + AUTO_ADVANCE);
                false
            }
            Some(at) if now >= at => {
                self.next();
                self.next_advance = Some(at + AUTO_ADVANCE);
                // A long host pause skips ahead by one slide, not many.
                if now >= at + AUTO_ADVANCE {
                    self.next_advance = Some(now + AUTO_ADVANCE);
                }
                true
            }
            Some(_) => false,
        }
    }
}
