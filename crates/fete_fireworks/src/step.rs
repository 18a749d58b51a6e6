//! The step function.
//!
//! One step is one frame of the show:
//! 1. Maybe launch an emitter (probability scaled by frame length)
//! 2. Advance emitters; each one that explodes becomes a burst
//! 3. Advance particles; faded ones are culled
//!
//! No step allocates: emitters and particles live in pre-sized slot pools.

use fete_core::{SlotPool, Vec2};
use rand::Rng;
use tracing::{debug, trace};

use crate::config::FireworksConfig;
use crate::emitter::{Emitter, EmitterStatus};
use crate::particle::Particle;
use crate::state::{FrameReport, SimulationState};

/// Advances `state` by `dt_secs` and returns it.
///
/// This is the pure form of [`SimulationState::step`]: given the same state,
/// delta and generator state, the result is always the same.
///
/// ```rust
/// use fete_core::ShowSeed;
/// use fete_fireworks::{advance, FireworksConfig, SimulationState};
///
/// let mut rng = ShowSeed::new(1).rng();
/// let mut state = SimulationState::new(FireworksConfig::default(), 320, 180).unwrap();
/// for _ in 0..60 {
///     state = advance(state, 1.0 / 60.0, &mut rng);
/// }
/// assert_eq!(state.frame(), 60);
/// ```
#[must_use]
pub fn advance<R: Rng + ?Sized>(mut state: SimulationState, dt_secs: f32, rng: &mut R) -> SimulationState {
    state.step(dt_secs, rng);
    state
}

impl SimulationState {
    /// Advances the show in place by `dt_secs` and reports what happened.
    ///
    /// Once the show duration has elapsed the pools are emptied, spawning is
    /// switched off and every further step reports `finished`.
    #[allow(clippy::cast_precision_loss)]
    pub fn step<R: Rng + ?Sized>(&mut self, dt_secs: f32, rng: &mut R) -> FrameReport {
        let scale = self.config.frame_scale(dt_secs);
        self.frame += 1;
        self.elapsed += scale * self.config.reference_frame_secs;

        let mut report = FrameReport {
            frame: self.frame,
            ..FrameReport::default()
        };

        if self.is_finished() {
            self.spawning = false;
            self.clear();
            report.finished = true;
            self.last_report = report;
            return report;
        }

        let Self {
            config,
            emitters,
            particles,
            width,
            height,
            spawning,
            ..
        } = self;
        let config = &*config;
        let (width, height) = (*width as f32, *height as f32);

        if *spawning && width > 0.0 && height > 0.0 {
            let chance = (config.spawn_probability * scale).min(1.0);
            if rng.gen::<f32>() < chance {
                let emitter = Emitter::launch(rng, width, height, config);
                if emitters.insert(emitter).is_some() {
                    report.launched = Some(emitter.position);
                } else {
                    report.dropped += 1;
                }
            }
        }

        emitters.retain_mut(|emitter| match emitter.advance(scale, config) {
            EmitterStatus::Flying => true,
            EmitterStatus::Exploded => {
                let (spawned, dropped) =
                    burst(rng, particles, emitter.position, emitter.hue, config);
                report.emitters_exploded += 1;
                report.particles_spawned += spawned;
                report.dropped += dropped;
                false
            }
        });

        particles.retain_mut(|particle| {
            let visible = particle.advance(scale, config);
            if !visible {
                report.particles_expired += 1;
            }
            visible
        });

        report.live_emitters = saturating_u32(emitters.len());
        report.live_particles = saturating_u32(particles.len());
        self.last_report = report;

        trace!(
            frame = report.frame,
            emitters = report.live_emitters,
            particles = report.live_particles,
            "fireworks step"
        );
        report
    }
}

/// Fills `particles` with one burst. Returns `(spawned, dropped)`.
fn burst<R: Rng + ?Sized>(
    rng: &mut R,
    particles: &mut SlotPool<Particle>,
    origin: Vec2,
    hue: f32,
    config: &FireworksConfig,
) -> (u32, u32) {
    let count = rng.gen_range(config.burst_min..=config.burst_max);
    for spawned in 0..count {
        if particles.insert(Particle::burst_member(rng, origin, hue, config)).is_none() {
            let dropped = count - spawned;
            debug!(spawned, dropped, "particle pool full, burst truncated");
            return (spawned, dropped);
        }
    }
    (count, 0)
}

fn saturating_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fete_core::ShowSeed;

    const DT: f32 = 1.0 / 60.0;

    fn state(config: FireworksConfig) -> SimulationState {
        SimulationState::new(config, 800, 450).unwrap()
    }

    #[test]
    fn test_certain_spawn_launches_every_frame() {
        let mut s = state(FireworksConfig {
            spawn_probability: 1.0,
            ..FireworksConfig::default()
        });
        let mut rng = ShowSeed::new(5).rng();

        let report = s.step(DT, &mut rng);
        let launched = report.launched.unwrap();
        assert_eq!(launched.y, 450.0);
        assert_eq!(s.emitter_count(), 1);
    }

    #[test]
    fn test_zero_probability_never_spawns() {
        let mut s = state(FireworksConfig {
            spawn_probability: 0.0,
            ..FireworksConfig::default()
        });
        let mut rng = ShowSeed::new(5).rng();
        for _ in 0..600 {
            assert!(s.step(DT, &mut rng).launched.is_none());
        }
        assert_eq!(s.emitter_count(), 0);
    }

    #[test]
    fn test_burst_size_within_bounds() {
        let config = FireworksConfig {
            spawn_probability: 1.0,
            burst_min: 30,
            burst_max: 100,
            ..FireworksConfig::default()
        };
        let mut s = state(config);
        let mut rng = ShowSeed::new(8).rng();

        let mut bursts = 0;
        for _ in 0..300 {
            let report = s.step(DT, &mut rng);
            if report.emitters_exploded > 0 {
                bursts += report.emitters_exploded;
                let per_burst_min = 30 * report.emitters_exploded;
                let per_burst_max = 100 * report.emitters_exploded;
                assert!(report.particles_spawned >= per_burst_min);
                assert!(report.particles_spawned <= per_burst_max);
            }
        }
        assert!(bursts > 0);
    }

    #[test]
    fn test_full_pool_truncates_burst() {
        let config = FireworksConfig {
            max_particles: 10,
            burst_min: 10,
            burst_max: 10,
            ..FireworksConfig::default()
        };
        let mut s = state(config);
        let mut rng = ShowSeed::new(9).rng();
        for _ in 0..7 {
            s.particles.insert(Particle { alpha: 1.0, decay: 0.015, ..Particle::default() }).unwrap();
        }

        let (spawned, dropped) = burst(&mut rng, &mut s.particles, Vec2::ZERO, 0.0, &s.config);
        assert_eq!(spawned, 3);
        assert_eq!(dropped, 7);
        assert!(s.particles.is_full());
    }

    #[test]
    fn test_finishes_after_duration() {
        let mut s = state(FireworksConfig {
            duration_secs: 1.0,
            spawn_probability: 1.0,
            ..FireworksConfig::default()
        });
        let mut rng = ShowSeed::new(1).rng();

        let mut finished_at = None;
        for frame in 1..=120 {
            if s.step(DT, &mut rng).finished {
                finished_at = Some(frame);
                break;
            }
        }

        let finished_at = finished_at.unwrap();
        assert!((60..=61).contains(&finished_at));
        assert_eq!(s.emitter_count(), 0);
        assert_eq!(s.particle_count(), 0);
        assert!(!s.is_spawning());
        assert!(s.step(DT, &mut rng).finished);
    }

    #[test]
    fn test_degenerate_surface_spawns_nothing() {
        let mut s = SimulationState::new(
            FireworksConfig {
                spawn_probability: 1.0,
                ..FireworksConfig::default()
            },
            0,
            0,
        )
        .unwrap();
        let mut rng = ShowSeed::new(2).rng();
        for _ in 0..120 {
            s.step(DT, &mut rng);
        }
        assert_eq!(s.emitter_count(), 0);
        assert_eq!(s.particle_count(), 0);
    }

    #[test]
    fn test_advance_matches_step() {
        let config = FireworksConfig::default();
        let mut a = state(config.clone());
        let mut b = state(config);
        let mut rng_a = ShowSeed::new(77).rng();
        let mut rng_b = ShowSeed::new(77).rng();

        for _ in 0..240 {
            a.step(DT, &mut rng_a);
            b = advance(b, DT, &mut rng_b);
            assert_eq!(a.last_report(), b.last_report());
        }
    }
}
