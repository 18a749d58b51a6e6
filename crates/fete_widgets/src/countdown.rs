//! Countdown to a calendar moment.

use chrono::{DateTime, Datelike, Months, Utc};

/// Remaining time split into display units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimeLeft {
    /// Whole days.
    pub days: i64,
    /// Hours past the whole days (0-23).
    pub hours: i64,
    /// Minutes past the whole hours (0-59).
    pub minutes: i64,
    /// Seconds past the whole minutes (0-59).
    pub seconds: i64,
}

impl TimeLeft {
    /// Time from `now` until `target`, all zero once the target has passed.
    #[must_use]
    pub fn until(target: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        let remaining = target.signed_duration_since(now);
        if remaining.num_milliseconds() <= 0 {
            return Self::default();
        }
        let total = remaining.num_seconds();
        Self {
            days: total / 86_400,
            hours: total % 86_400 / 3_600,
            minutes: total % 3_600 / 60,
            seconds: total % 60,
        }
    }

    /// True when nothing is left.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }

    /// Units with their labels, largest first.
    #[must_use]
    pub fn units(&self) -> [(&'static str, i64); 4] {
        [
            ("days", self.days),
            ("hours", self.hours),
            ("minutes", self.minutes),
            ("seconds", self.seconds),
        ]
    }
}

/// A countdown widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Countdown {
    target: DateTime<Utc>,
    left: TimeLeft,
    finished: bool,
}

impl Countdown {
    /// Counts down to `target`.
    #[must_use]
    pub fn new(target: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        let mut countdown = Self {
            target,
            left: TimeLeft::default(),
            finished: false,
        };
        countdown.tick(now);
        countdown
    }

    /// Counts down to the same moment one year after `now`. Falls back to
    /// `now` itself for dates chrono cannot represent.
    #[must_use]
    pub fn one_year_from(now: DateTime<Utc>) -> Self {
        let target = now.checked_add_months(Months::new(12)).unwrap_or(now);
        Self::new(target, now)
    }

    /// Recomputes the remaining time. Once finished, the countdown stays
    /// finished.
    pub fn tick(&mut self, now: DateTime<Utc>) -> TimeLeft {
        if !self.finished {
            self.left = TimeLeft::until(self.target, now);
            self.finished = self.left.is_zero() && now >= self.target;
        }
        self.left
    }

    /// Latest computed remaining time.
    #[must_use]
    pub fn time_left(&self) -> TimeLeft {
        self.left
    }

    /// True once the target has passed.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// The moment being counted down to.
    #[must_use]
    pub fn target(&self) -> DateTime<Utc> {
        self.target
    }

    /// Year of the target, for headings like "Until your 2027 birthday".
    #[must_use]
    pub fn target_year(&self) -> i32 {
        self.target.year()
    }
}
