//! Whole-show properties of the fireworks loop.

use std::collections::HashMap;
use std::time::Duration;

use fete_core::ShowSeed;
use fete_fireworks::{
    advance, DrawSurface, FireworksConfig, FireworksDisplay, ManualHost, PixelSurface,
    RecordingSurface, SimulationState,
};

const FRAME: Duration = Duration::from_micros(16_667);
const DT: f32 = 1.0 / 60.0;

fn busy_config() -> FireworksConfig {
    FireworksConfig {
        spawn_probability: 0.5,
        ..FireworksConfig::default()
    }
}

#[test]
fn test_particle_opacity_never_increases() {
    let mut rng = ShowSeed::new(2024).rng();
    let mut state = SimulationState::new(busy_config(), 640, 360).unwrap();
    let mut checked = 0usize;

    for _ in 0..600 {
        let before: HashMap<_, _> = state.particle_slots().map(|(h, p)| (h, p.alpha)).collect();
        state = advance(state, DT, &mut rng);

        for (handle, particle) in state.particle_slots() {
            if let Some(previous) = before.get(&handle) {
                assert!(particle.alpha <= *previous, "opacity rose in slot {}", handle.index());
                checked += 1;
            }
        }
    }
    assert!(checked > 1_000);
}

#[test]
fn test_every_explosion_yields_a_bounded_burst() {
    let config = FireworksConfig {
        burst_min: 30,
        burst_max: 100,
        ..busy_config()
    };
    let mut rng = ShowSeed::new(99).rng();
    let mut state = SimulationState::new(config, 800, 600).unwrap();
    let mut explosions = 0;

    for _ in 0..600 {
        let report = state.step(DT, &mut rng);
        assert_eq!(report.dropped, 0);
        assert!(report.particles_spawned >= 30 * report.emitters_exploded);
        assert!(report.particles_spawned <= 100 * report.emitters_exploded);
        explosions += report.emitters_exploded;
    }
    assert!(explosions > 10);
}

#[test]
fn test_display_stops_and_clears_within_duration() {
    for seed in [1, 2, 3, 42, 1_000_003] {
        let config = FireworksConfig {
            duration_secs: 2.0,
            spawn_probability: 1.0,
            ..FireworksConfig::default()
        };
        let mut display =
            FireworksDisplay::new(ManualHost::new(), config, ShowSeed::new(seed).rng()).unwrap();
        let mut surface = PixelSurface::new(200, 120);

        display.start(Duration::ZERO);
        let mut frames = 0;
        while display.is_running() {
            display.tick(FRAME, Some(&mut surface));
            frames += 1;
            assert!(frames <= 121, "show outlived its duration");
        }

        assert!(display.host().now() <= Duration::from_secs(2) + FRAME);
        assert_eq!(surface.painted_pixels(), 0);
        assert_eq!(display.state().particle_count(), 0);
        assert_eq!(display.state().emitter_count(), 0);
        assert!(!display.host().has_pending_frame());
        assert_eq!(display.host().pending_timers(), 0);
    }
}

#[test]
fn test_zero_sized_container_draws_nothing() {
    let mut display =
        FireworksDisplay::new(ManualHost::new(), busy_config(), ShowSeed::new(5).rng()).unwrap();
    let mut surface = RecordingSurface::new(0, 0);

    display.start(Duration::ZERO);
    for _ in 0..120 {
        display.tick(FRAME, Some(&mut surface));
    }
    assert!(surface.commands().is_empty());
    assert_eq!(display.stats().emitters_launched, 0);

    // Shrinking a live show to nothing behaves the same.
    let mut surface = RecordingSurface::new(300, 200);
    for _ in 0..30 {
        display.tick(FRAME, Some(&mut surface));
    }
    assert!(!surface.commands().is_empty());
    display.resize(0, 0);
    surface.resize(0, 0);
    for _ in 0..30 {
        display.tick(FRAME, Some(&mut surface));
    }
    assert!(surface.commands().is_empty());
    assert_eq!(display.state().particle_count(), 0);
}

#[test]
fn test_seeded_launch_positions_are_reproducible() {
    fn launches(seed: u64) -> Vec<f32> {
        let mut rng = ShowSeed::new(seed).rng();
        let mut state = SimulationState::new(busy_config(), 1024, 768).unwrap();
        let mut xs = Vec::new();
        for _ in 0..300 {
            if let Some(position) = state.step(DT, &mut rng).launched {
                xs.push(position.x);
            }
        }
        xs
    }

    let first = launches(31);
    assert!(first.len() > 50);
    assert_eq!(first, launches(31));
    assert_ne!(first, launches(32));
}

#[test]
fn test_variable_frame_rate_covers_same_show_time() {
    let config = FireworksConfig {
        duration_secs: 1.0,
        ..FireworksConfig::default()
    };
    let mut rng = ShowSeed::new(8).rng();
    let mut at_60 = SimulationState::new(config.clone(), 100, 100).unwrap();
    let mut at_30 = SimulationState::new(config, 100, 100).unwrap();

    let frames_60 = (0..).take_while(|_| !at_60.step(DT, &mut rng).finished).count();
    let frames_30 = (0..).take_while(|_| !at_30.step(DT * 2.0, &mut rng).finished).count();
    assert!(frames_60.abs_diff(frames_30 * 2) <= 2);
}
