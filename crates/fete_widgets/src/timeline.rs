//! Relationship timeline.

use serde::{Deserialize, Serialize};

/// One milestone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEvent {
    /// Free-form date label ("Our first date").
    pub date: String,
    /// Headline.
    pub title: String,
    /// Body text.
    pub description: String,
    /// Optional illustration.
    #[serde(default)]
    pub image: Option<String>,
}

/// Which side of the center line an event is laid out on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Left of the line.
    Left,
    /// Right of the line.
    Right,
}

impl Side {
    /// Even positions go left, odd go right.
    #[must_use]
    pub fn for_index(index: usize) -> Self {
        if index % 2 == 0 {
            Self::Left
        } else {
            Self::Right
        }
    }
}

/// Timeline state: the ordered events and the one opened for detail.
#[derive(Debug, Clone, Default)]
pub struct Timeline {
    events: Vec<TimelineEvent>,
    selected: Option<usize>,
}

impl Timeline {
    /// Creates a timeline in the given order.
    #[must_use]
    pub fn new(events: Vec<TimelineEvent>) -> Self {
        Self {
            events,
            selected: None,
        }
    }

    /// Events with their layout side.
    pub fn layout(&self) -> impl Iterator<Item = (Side, &TimelineEvent)> {
        self.events
            .iter()
            .enumerate()
            .map(|(i, event)| (Side::for_index(i), event))
    }

    /// Opens the detail view for `index`. Out-of-range indices are ignored.
    pub fn select(&mut self, index: usize) {
        if index < self.events.len() {
            self.selected = Some(index);
        }
    }

    /// Closes the detail view.
    pub fn close(&mut self) {
        self.selected = None;
    }

    /// The event whose detail is open.
    #[must_use]
    pub fn selected(&self) -> Option<&TimelineEvent> {
        self.selected.and_then(|i| self.events.get(i))
    }

    /// Number of events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// True if there are no events.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
