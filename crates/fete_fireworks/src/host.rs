//! A virtual-clock [`FrameHost`].
//!
//! `ManualHost` never sleeps: time moves only when [`ManualHost::advance`] is
//! called. The headless preview and the test suites drive displays with it.

use std::time::Duration;

use rand::Rng;

use crate::display::{FireworksDisplay, FrameHost, FrameRequest, TimerId};
use crate::state::FrameReport;
use crate::surface::DrawSurface;

/// Deterministic host with a virtual clock.
#[derive(Debug, Default)]
pub struct ManualHost {
    now: Duration,
    next_id: u64,
    frames: Vec<FrameRequest>,
    timers: Vec<(TimerId, Duration)>,
    frames_requested: u64,
    frames_cancelled: u64,
    timers_cleared: u64,
}

impl ManualHost {
    /// Creates a host at time zero with nothing scheduled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Moves the clock forward and returns the timers that came due, earliest
    /// first. Returned timers are no longer pending.
    pub fn advance(&mut self, delta: Duration) -> Vec<TimerId> {
        self.now = self.now.saturating_add(delta);
        let now = self.now;

        let mut due: Vec<(TimerId, Duration)> = Vec::new();
        self.timers.retain(|&(timer, deadline)| {
            if deadline <= now {
                due.push((timer, deadline));
                false
            } else {
                true
            }
        });
        due.sort_by_key(|&(timer, deadline)| (deadline, timer.id()));
        due.into_iter().map(|(timer, _)| timer).collect()
    }

    /// Pops the oldest pending frame request, as a vsync would.
    pub fn take_frame(&mut self) -> Option<FrameRequest> {
        if self.frames.is_empty() {
            None
        } else {
            Some(self.frames.remove(0))
        }
    }

    /// True if a frame callback is pending.
    #[must_use]
    pub fn has_pending_frame(&self) -> bool {
        !self.frames.is_empty()
    }

    /// Number of frame callbacks queued.
    #[must_use]
    pub fn pending_frames(&self) -> usize {
        self.frames.len()
    }

    /// Number of timers still pending.
    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Frame requests ever made.
    #[must_use]
    pub fn frames_requested(&self) -> u64 {
        self.frames_requested
    }

    /// Frame requests cancelled before firing.
    #[must_use]
    pub fn frames_cancelled(&self) -> u64 {
        self.frames_cancelled
    }

    /// Timers cleared before firing.
    #[must_use]
    pub fn timers_cleared(&self) -> u64 {
        self.timers_cleared
    }

    fn mint(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

impl FrameHost for ManualHost {
    fn request_frame(&mut self) -> FrameRequest {
        let request = FrameRequest::new(self.mint());
        self.frames.push(request);
        self.frames_requested += 1;
        request
    }

    fn cancel_frame(&mut self, request: FrameRequest) {
        let before = self.frames.len();
        self.frames.retain(|&r| r != request);
        if self.frames.len() != before {
            self.frames_cancelled += 1;
        }
    }

    fn set_timeout(&mut self, delay: Duration) -> TimerId {
        let timer = TimerId::new(self.mint());
        let deadline = self.now.saturating_add(delay);
        self.timers.push((timer, deadline));
        timer
    }

    fn clear_timeout(&mut self, timer: TimerId) {
        let before = self.timers.len();
        self.timers.retain(|&(t, _)| t != timer);
        if self.timers.len() != before {
            self.timers_cleared += 1;
        }
    }
}

impl<R: Rng> FireworksDisplay<ManualHost, R> {
    /// Advances the virtual clock by `frame_dt`, fires due timers, then the
    /// pending frame callback if there is one.
    pub fn tick(
        &mut self,
        frame_dt: Duration,
        mut surface: Option<&mut (dyn DrawSurface + '_)>,
    ) -> Option<FrameReport> {
        let due = self.host_mut().advance(frame_dt);
        for timer in due {
            self.on_timeout(timer, surface.as_deref_mut());
        }

        self.host_mut().take_frame()?;
        let now = self.host().now();
        self.on_frame(now, surface)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timers_fire_in_deadline_order() {
        let mut host = ManualHost::new();
        let late = host.set_timeout(Duration::from_millis(30));
        let early = host.set_timeout(Duration::from_millis(10));
        let never = host.set_timeout(Duration::from_secs(60));

        assert!(host.advance(Duration::from_millis(5)).is_empty());
        assert_eq!(host.advance(Duration::from_millis(30)), vec![early, late]);
        assert_eq!(host.pending_timers(), 1);

        host.clear_timeout(never);
        host.clear_timeout(never);
        assert_eq!(host.timers_cleared(), 1);
    }

    #[test]
    fn test_frames_are_fifo() {
        let mut host = ManualHost::new();
        let a = host.request_frame();
        let b = host.request_frame();
        host.cancel_frame(a);

        assert_eq!(host.take_frame(), Some(b));
        assert_eq!(host.take_frame(), None);
        assert_eq!(host.frames_requested(), 2);
        assert_eq!(host.frames_cancelled(), 1);
    }
}
