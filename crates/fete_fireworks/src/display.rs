//! # Fireworks Display
//!
//! Drives a [`SimulationState`] from host frame callbacks:
//! ```text
//! start(now)
//! ├─ request_frame ─────────────────┐
//! └─ set_timeout(duration) ──┐      │
//!                            │      ▼
//!                            │   on_frame(now, surface)
//!                            │   ├─ sync size, base fill on first frame
//!                            │   ├─ step(dt) + render
//!                            │   └─ request_frame (exactly one pending)
//!                            ▼
//!                      on_timeout(timer) ──► stop(surface)
//!                                            ├─ cancel_frame
//!                                            ├─ clear_timeout
//!                                            └─ clear state + surface
//! ```
//!
//! The host owns the clock and the scheduling primitives; the display only
//! holds the opaque handles it was given and hands them back when cancelling.

use std::time::Duration;

use fete_core::Rgba;
use rand::Rng;
use tracing::{debug, info};

use crate::config::FireworksConfig;
use crate::error::FireworksResult;
use crate::render::render;
use crate::state::{FrameReport, SimulationState};
use crate::surface::DrawSurface;

/// Handle for a pending frame callback, minted by a [`FrameHost`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameRequest(u64);

impl FrameRequest {
    /// Wraps a host-specific identifier.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// The host-specific identifier.
    #[must_use]
    pub const fn id(self) -> u64 {
        self.0
    }
}

/// Handle for a pending one-shot timer, minted by a [`FrameHost`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

impl TimerId {
    /// Wraps a host-specific identifier.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// The host-specific identifier.
    #[must_use]
    pub const fn id(self) -> u64 {
        self.0
    }
}

/// Scheduling primitives supplied by the host environment.
///
/// A browser shell maps these to `requestAnimationFrame` and `setTimeout`;
/// a native shell to its event loop; tests use [`crate::ManualHost`].
pub trait FrameHost {
    /// Schedules one frame callback.
    fn request_frame(&mut self) -> FrameRequest;

    /// Cancels a frame callback that has not fired yet.
    fn cancel_frame(&mut self, request: FrameRequest);

    /// Schedules a one-shot timer `delay` from now.
    fn set_timeout(&mut self, delay: Duration) -> TimerId;

    /// Cancels a timer that has not fired yet.
    fn clear_timeout(&mut self, timer: TimerId);
}

impl<H: FrameHost + ?Sized> FrameHost for &mut H {
    fn request_frame(&mut self) -> FrameRequest {
        (**self).request_frame()
    }

    fn cancel_frame(&mut self, request: FrameRequest) {
        (**self).cancel_frame(request);
    }

    fn set_timeout(&mut self, delay: Duration) -> TimerId {
        (**self).set_timeout(delay)
    }

    fn clear_timeout(&mut self, timer: TimerId) {
        (**self).clear_timeout(timer);
    }
}

/// Aggregate statistics across every show a display has run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DisplayStats {
    /// Frames simulated.
    pub frames: u64,
    /// Shows started.
    pub shows_started: u64,
    /// Emitters launched.
    pub emitters_launched: u64,
    /// Emitters that burst.
    pub emitters_exploded: u64,
    /// Particles created.
    pub particles_spawned: u64,
    /// Particles that faded out.
    pub particles_expired: u64,
    /// Entities that did not fit in their pool.
    pub dropped: u64,
    /// Most particles alive at once.
    pub peak_particles: u32,
}

impl DisplayStats {
    fn record(&mut self, report: &FrameReport) {
        self.frames += 1;
        self.emitters_launched += u64::from(report.launched.is_some());
        self.emitters_exploded += u64::from(report.emitters_exploded);
        self.particles_spawned += u64::from(report.particles_spawned);
        self.particles_expired += u64::from(report.particles_expired);
        self.dropped += u64::from(report.dropped);
        self.peak_particles = self.peak_particles.max(report.live_particles);
    }
}

/// A time-bounded fireworks display.
///
/// Create it once per container, call [`FireworksDisplay::start`] from a user
/// gesture and forward the host's frame and timer callbacks. The display stops
/// itself after `duration_secs`, clearing the surface.
pub struct FireworksDisplay<H: FrameHost, R: Rng> {
    host: H,
    rng: R,
    state: SimulationState,
    running: bool,
    pending_frame: Option<FrameRequest>,
    stop_timer: Option<TimerId>,
    started_at: Duration,
    last_frame_at: Option<Duration>,
    needs_base_fill: bool,
    stats: DisplayStats,
}

impl<H: FrameHost, R: Rng> FireworksDisplay<H, R> {
    /// Creates an idle display. The surface size is picked up on the first
    /// frame.
    ///
    /// # Errors
    ///
    /// Returns an error if the config fails validation.
    pub fn new(host: H, config: FireworksConfig, rng: R) -> FireworksResult<Self> {
        Ok(Self {
            host,
            rng,
            state: SimulationState::new(config, 0, 0)?,
            running: false,
            pending_frame: None,
            stop_timer: None,
            started_at: Duration::ZERO,
            last_frame_at: None,
            needs_base_fill: true,
            stats: DisplayStats::default(),
        })
    }

    /// Starts a show at host time `now`.
    ///
    /// Returns false, doing nothing, if a show is already running.
    pub fn start(&mut self, now: Duration) -> bool {
        if self.running {
            return false;
        }
        self.state.restart();
        self.running = true;
        self.started_at = now;
        self.last_frame_at = None;
        self.needs_base_fill = true;
        self.stats.shows_started += 1;

        let duration = self.duration();
        self.pending_frame = Some(self.host.request_frame());
        self.stop_timer = Some(self.host.set_timeout(duration));
        info!("Fireworks display started ({:.1}s show)", duration.as_secs_f32());
        true
    }

    /// Handles a frame callback at host time `now`.
    ///
    /// Without a surface nothing is simulated or drawn, but the loop keeps
    /// going so the show resumes once the host provides one. Returns the step
    /// report, or `None` if no step ran.
    pub fn on_frame(
        &mut self,
        now: Duration,
        surface: Option<&mut (dyn DrawSurface + '_)>,
    ) -> Option<FrameReport> {
        if !self.running || self.pending_frame.take().is_none() {
            return None;
        }

        // Backstop for hosts whose timers are throttled or lost.
        if now.saturating_sub(self.started_at) >= self.duration() {
            self.stop(surface);
            return None;
        }

        let Some(surface) = surface else {
            self.pending_frame = Some(self.host.request_frame());
            return None;
        };

        let dt = match self.last_frame_at {
            Some(last) => now.saturating_sub(last).as_secs_f32(),
            None => self.state.config().reference_frame_secs,
        };
        self.last_frame_at = Some(now);

        let (width, height) = surface.size();
        if self.state.size() != (width, height) {
            debug!("Surface resized to {}x{}", width, height);
            self.state.resize(width, height);
            self.needs_base_fill = true;
        }
        if self.needs_base_fill && !surface.is_empty_area() {
            surface.fill(Rgba::BLACK);
            self.needs_base_fill = false;
        }

        let report = self.state.step(dt, &mut self.rng);
        self.stats.record(&report);
        if report.finished {
            self.stop(Some(surface));
            return Some(report);
        }

        render(&self.state, surface);
        self.pending_frame = Some(self.host.request_frame());
        Some(report)
    }

    /// Handles a timer callback. Returns true if it was this display's
    /// auto-stop timer.
    pub fn on_timeout(
        &mut self,
        timer: TimerId,
        surface: Option<&mut (dyn DrawSurface + '_)>,
    ) -> bool {
        if self.stop_timer != Some(timer) {
            return false;
        }
        self.stop_timer = None;
        self.stop(surface);
        true
    }

    /// Stops the show early, releasing both host handles and clearing the
    /// surface. Does nothing if no show is running.
    pub fn stop(&mut self, surface: Option<&mut (dyn DrawSurface + '_)>) {
        if !self.running {
            return;
        }
        self.running = false;
        self.release_handles();
        self.state.stop_spawning();
        self.state.clear();
        if let Some(surface) = surface {
            surface.clear();
        }
        info!(
            "Fireworks display stopped after {} frames ({} live particles peak)",
            self.state.frame(),
            self.stats.peak_particles
        );
    }

    /// Adopts new container dimensions. In-flight entities are discarded.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.state.resize(width, height);
        self.needs_base_fill = true;
    }

    /// True while a show is running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Aggregate statistics.
    #[must_use]
    pub fn stats(&self) -> DisplayStats {
        self.stats
    }

    /// The simulation being displayed.
    #[must_use]
    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    /// The scheduling host.
    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable access to the scheduling host.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    fn duration(&self) -> Duration {
        Duration::try_from_secs_f32(self.state.config().duration_secs).unwrap_or(Duration::MAX)
    }

    fn release_handles(&mut self) {
        if let Some(request) = self.pending_frame.take() {
            self.host.cancel_frame(request);
        }
        if let Some(timer) = self.stop_timer.take() {
            self.host.clear_timeout(timer);
        }
    }
}

impl<H: FrameHost, R: Rng> Drop for FireworksDisplay<H, R> {
    fn drop(&mut self) {
        self.release_handles();
    }
}

impl<H: FrameHost, R: Rng> std::fmt::Debug for FireworksDisplay<H, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FireworksDisplay")
            .field("running", &self.running)
            .field("pending_frame", &self.pending_frame)
            .field("stop_timer", &self.stop_timer)
            .field("frame", &self.state.frame())
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::ManualHost;
    use crate::surface::{PixelSurface, RecordingSurface};
    use fete_core::ShowSeed;
    use rand_chacha::ChaCha8Rng;

    const FRAME: Duration = Duration::from_micros(16_667);

    fn display(config: FireworksConfig) -> FireworksDisplay<ManualHost, ChaCha8Rng> {
        FireworksDisplay::new(ManualHost::new(), config, ShowSeed::new(3).rng()).unwrap()
    }

    /// Delivers the host's queued frame callback, as a vsync would.
    fn run_frame(
        d: &mut FireworksDisplay<ManualHost, ChaCha8Rng>,
        now: Duration,
        surface: Option<&mut (dyn DrawSurface + '_)>,
    ) -> Option<FrameReport> {
        d.host_mut().take_frame();
        d.on_frame(now, surface)
    }

    #[test]
    fn test_start_is_idempotent() {
        let mut d = display(FireworksConfig::default());
        assert!(d.start(Duration::ZERO));
        assert!(!d.start(Duration::ZERO));
        assert!(d.is_running());
        assert_eq!(d.stats().shows_started, 1);
        assert_eq!(d.host().frames_requested(), 1);
        assert_eq!(d.host().pending_timers(), 1);
    }

    #[test]
    fn test_first_frame_paints_base_and_sizes_state() {
        let mut d = display(FireworksConfig::default());
        let mut surface = RecordingSurface::new(320, 200);
        d.start(Duration::ZERO);

        let report = run_frame(&mut d, FRAME, Some(&mut surface)).unwrap();
        assert_eq!(report.frame, 1);
        assert_eq!(d.state().size(), (320, 200));
        assert_eq!(surface.commands()[0], crate::DrawCommand::Fill { color: Rgba::BLACK });
        assert!(d.host().has_pending_frame());
    }

    #[test]
    fn test_frames_outside_a_show_are_ignored() {
        let mut d = display(FireworksConfig::default());
        let mut surface = RecordingSurface::new(10, 10);
        assert!(run_frame(&mut d, FRAME, Some(&mut surface)).is_none());

        d.start(Duration::ZERO);
        assert!(run_frame(&mut d, FRAME, Some(&mut surface)).is_some());
        d.stop(Some(&mut surface));
        assert!(run_frame(&mut d, FRAME * 2, Some(&mut surface)).is_none());
        assert_eq!(d.stats().frames, 1);
    }

    #[test]
    fn test_missing_surface_keeps_loop_alive() {
        let mut d = display(FireworksConfig::default());
        d.start(Duration::ZERO);
        assert!(run_frame(&mut d, FRAME, None).is_none());
        assert!(d.is_running());
        assert!(d.host().has_pending_frame());
        assert_eq!(d.stats().frames, 0);
    }

    #[test]
    fn test_timeout_stops_and_clears() {
        let mut d = display(FireworksConfig::default());
        let mut surface = PixelSurface::new(64, 64);
        d.start(Duration::ZERO);
        run_frame(&mut d, FRAME, Some(&mut surface));
        assert!(surface.painted_pixels() > 0);

        let due = d.host_mut().advance(Duration::from_secs(10));
        assert_eq!(due.len(), 1);
        assert!(!d.on_timeout(TimerId::new(9_999), Some(&mut surface)));
        assert!(d.on_timeout(due[0], Some(&mut surface)));

        assert!(!d.is_running());
        assert_eq!(surface.painted_pixels(), 0);
        assert_eq!(d.host().pending_frames(), 0);
        assert_eq!(d.host().frames_cancelled(), 1);
        assert_eq!(d.host().pending_timers(), 0);
    }

    #[test]
    fn test_one_frame_request_queued_at_a_time() {
        let mut d = display(FireworksConfig::default());
        let mut surface = RecordingSurface::new(32, 32);
        d.start(Duration::ZERO);
        assert_eq!(d.host().pending_frames(), 1);

        for i in 1..=30 {
            run_frame(&mut d, FRAME * i, Some(&mut surface));
            assert_eq!(d.host().pending_frames(), 1);
        }
        run_frame(&mut d, FRAME * 31, None);
        assert_eq!(d.host().pending_frames(), 1);

        d.stop(Some(&mut surface));
        assert_eq!(d.host().pending_frames(), 0);
    }

    #[test]
    fn test_wall_clock_backstop() {
        let mut d = display(FireworksConfig {
            duration_secs: 1.0,
            ..FireworksConfig::default()
        });
        let mut surface = RecordingSurface::new(10, 10);
        d.start(Duration::ZERO);

        assert!(run_frame(&mut d, Duration::from_secs(2), Some(&mut surface)).is_none());
        assert!(!d.is_running());
        assert_eq!(surface.commands().last(), Some(&crate::DrawCommand::Clear));
        assert_eq!(d.host().pending_timers(), 0);
    }

    #[test]
    fn test_stop_then_restart() {
        let mut d = display(FireworksConfig::default());
        d.start(Duration::ZERO);
        d.stop(None);
        assert!(!d.is_running());
        assert_eq!(d.host().frames_cancelled(), 1);
        assert_eq!(d.host().timers_cleared(), 1);

        assert!(d.start(Duration::from_secs(20)));
        assert_eq!(d.state().frame(), 0);
        assert_eq!(d.stats().shows_started, 2);
    }

    #[test]
    fn test_drop_releases_handles() {
        let mut host = ManualHost::new();
        {
            let mut d = FireworksDisplay::new(
                &mut host,
                FireworksConfig::default(),
                ShowSeed::new(1).rng(),
            )
            .unwrap();
            d.start(Duration::ZERO);
        }
        assert!(!host.has_pending_frame());
        assert_eq!(host.pending_timers(), 0);
    }
}
