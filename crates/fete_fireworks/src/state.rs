//! Simulation state.
//!
//! Everything a show needs between frames lives here: the config, both slot
//! pools, the surface dimensions and the show clock. The state is advanced by
//! [`crate::advance`] and drawn by [`crate::render`]; it never schedules
//! anything itself.

use fete_core::{SlotHandle, SlotPool, Vec2};

use crate::config::FireworksConfig;
use crate::emitter::Emitter;
use crate::error::FireworksResult;
use crate::particle::Particle;

/// What happened during one simulation step.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameReport {
    /// Step number since the show (re)started, starting at 1.
    pub frame: u64,
    /// Launch point of the emitter spawned this step, if any.
    pub launched: Option<Vec2>,
    /// Emitters that burst this step.
    pub emitters_exploded: u32,
    /// Particles created by those bursts.
    pub particles_spawned: u32,
    /// Particles that faded out this step.
    pub particles_expired: u32,
    /// Emitters or particles that did not fit in their pool.
    pub dropped: u32,
    /// Live emitters after the step.
    pub live_emitters: u32,
    /// Live particles after the step.
    pub live_particles: u32,
    /// True once the show duration has elapsed and the pools were emptied.
    pub finished: bool,
}

/// Explicit state of a fireworks show.
#[derive(Debug, Clone)]
pub struct SimulationState {
    pub(crate) config: FireworksConfig,
    pub(crate) emitters: SlotPool<Emitter>,
    pub(crate) particles: SlotPool<Particle>,
    pub(crate) width: u32,
    pub(crate) height: u32,
    /// Simulated seconds since the show started.
    pub(crate) elapsed: f32,
    pub(crate) frame: u64,
    pub(crate) spawning: bool,
    pub(crate) last_report: FrameReport,
}

impl SimulationState {
    /// Creates a show for a `width` x `height` surface.
    ///
    /// Both pools are allocated here, sized from the config.
    ///
    /// # Errors
    ///
    /// Returns an error if the config fails validation.
    pub fn new(config: FireworksConfig, width: u32, height: u32) -> FireworksResult<Self> {
        config.validate()?;
        Ok(Self {
            emitters: SlotPool::new(config.max_emitters),
            particles: SlotPool::new(config.max_particles),
            config,
            width,
            height,
            elapsed: 0.0,
            frame: 0,
            spawning: true,
            last_report: FrameReport::default(),
        })
    }

    /// The show configuration.
    #[must_use]
    pub fn config(&self) -> &FireworksConfig {
        &self.config
    }

    /// Surface dimensions the show is laid out for.
    #[must_use]
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// True if the surface has no area; nothing spawns or draws.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Simulated seconds since the show started.
    #[must_use]
    pub fn elapsed_secs(&self) -> f32 {
        self.elapsed
    }

    /// Number of steps since the show started.
    #[must_use]
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// True while new emitters may still be launched.
    #[must_use]
    pub fn is_spawning(&self) -> bool {
        self.spawning
    }

    /// True once the show duration has elapsed.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.config.duration_secs
    }

    /// Report from the latest step.
    #[must_use]
    pub fn last_report(&self) -> FrameReport {
        self.last_report
    }

    /// Live emitters in slot order.
    pub fn live_emitters(&self) -> impl Iterator<Item = &Emitter> {
        self.emitters.iter().map(|(_, e)| e)
    }

    /// Live particles in slot order.
    pub fn live_particles(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter().map(|(_, p)| p)
    }

    /// Live particles with their slots. A slot live across consecutive steps
    /// holds the same particle: bursts only fill slots that were already free.
    pub fn particle_slots(&self) -> impl Iterator<Item = (SlotHandle, &Particle)> {
        self.particles.iter()
    }

    /// Number of live emitters.
    #[must_use]
    pub fn emitter_count(&self) -> usize {
        self.emitters.len()
    }

    /// Number of live particles.
    #[must_use]
    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    /// Stops launching new emitters. Entities already in flight finish.
    pub fn stop_spawning(&mut self) {
        self.spawning = false;
    }

    /// Drops every entity without touching the show clock.
    pub fn clear(&mut self) {
        self.emitters.clear();
        self.particles.clear();
    }

    /// Adopts new surface dimensions. In-flight entities are discarded: their
    /// coordinates belong to the old layout.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.clear();
    }

    /// Rewinds the show clock and empties the pools for a fresh show.
    pub fn restart(&mut self) {
        self.clear();
        self.elapsed = 0.0;
        self.frame = 0;
        self.spawning = true;
        self.last_report = FrameReport::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = FireworksConfig {
            friction: 0.0,
            ..FireworksConfig::default()
        };
        assert!(SimulationState::new(config, 10, 10).is_err());
    }

    #[test]
    fn test_pools_sized_from_config() {
        let config = FireworksConfig {
            max_emitters: 3,
            max_particles: 200,
            ..FireworksConfig::default()
        };
        let state = SimulationState::new(config, 640, 360).unwrap();
        assert_eq!(state.emitters.capacity(), 3);
        assert_eq!(state.particles.capacity(), 200);
        assert_eq!(state.size(), (640, 360));
        assert!(state.is_spawning());
        assert!(!state.is_finished());
    }

    #[test]
    fn test_resize_discards_entities() {
        let mut state = SimulationState::new(FireworksConfig::default(), 100, 100).unwrap();
        state.emitters.insert(Emitter::default()).unwrap();
        state.particles.insert(Particle::default()).unwrap();

        state.resize(0, 0);
        assert_eq!(state.emitter_count(), 0);
        assert_eq!(state.particle_count(), 0);
        assert!(state.is_degenerate());
    }
}
