//! Emitters: the rising shells of a fireworks show.
//!
//! An emitter is launched from the bottom edge towards a random target in the
//! upper half of the surface. Friction bleeds its speed every frame; once it
//! reaches the target, or slows below the explode speed, it bursts.

use fete_core::{Hsla, Vec2};
use rand::Rng;

use crate::config::FireworksConfig;

/// Outcome of advancing an emitter by one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmitterStatus {
    /// Still climbing.
    Flying,
    /// Reached its target or stalled; must be converted into a burst.
    Exploded,
}

/// A rising firework shell.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Emitter {
    /// Current position in pixels.
    pub position: Vec2,
    /// Where the shell is aimed.
    pub target: Vec2,
    /// Heading in radians (screen space, +y down).
    pub angle: f32,
    /// Speed in pixels per reference frame.
    pub speed: f32,
    /// Hue in degrees, inherited by the burst.
    pub hue: f32,
    /// Lightness (0-1).
    pub brightness: f32,
    /// Current opacity.
    pub alpha: f32,
    /// Opacity lost per reference frame.
    pub decay: f32,
}

impl Emitter {
    /// Launches a new emitter from a random point on the bottom edge.
    ///
    /// Random draws happen in a fixed order (launch x, target x, target y,
    /// speed, hue, brightness) so a seeded generator reproduces the show.
    pub fn launch<R: Rng + ?Sized>(
        rng: &mut R,
        width: f32,
        height: f32,
        config: &FireworksConfig,
    ) -> Self {
        let position = Vec2::new(rng.gen::<f32>() * width, height);
        let target = Vec2::new(rng.gen::<f32>() * width, rng.gen::<f32>() * height / 2.0);
        let speed = rng.gen_range(config.emitter_speed_min..=config.emitter_speed_max);
        let hue = (rng.gen::<f32>() * 360.0).floor();
        let brightness = rng.gen_range(config.brightness_min..=config.brightness_max);

        Self {
            position,
            target,
            angle: position.angle_to(target),
            speed,
            hue,
            brightness,
            alpha: 1.0,
            decay: config.emitter_decay,
        }
    }

    /// Advances the emitter by `scale` reference frames.
    pub fn advance(&mut self, scale: f32, config: &FireworksConfig) -> EmitterStatus {
        let velocity = Vec2::from_polar(self.angle, self.speed);
        self.position += velocity * scale + Vec2::new(0.0, config.gravity * scale);
        self.speed *= config.friction.powf(scale);
        self.alpha = (self.alpha - self.decay * scale).max(0.0);

        if self.position.distance(self.target) < config.explode_distance
            || self.speed < config.explode_speed
        {
            EmitterStatus::Exploded
        } else {
            EmitterStatus::Flying
        }
    }

    /// Fill color at the current opacity.
    #[must_use]
    pub fn color(&self) -> Hsla {
        Hsla::new(self.hue, 1.0, self.brightness, self.alpha)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fete_core::ShowSeed;

    #[test]
    fn test_launch_from_bottom_edge_towards_upper_half() {
        let config = FireworksConfig::default();
        let mut rng = ShowSeed::new(3).rng();

        for _ in 0..100 {
            let e = Emitter::launch(&mut rng, 800.0, 450.0, &config);
            assert_eq!(e.position.y, 450.0);
            assert!((0.0..800.0).contains(&e.position.x));
            assert!((0.0..225.0).contains(&e.target.y));
            assert!((5.0..=10.0).contains(&e.speed));
            assert!((0.0..360.0).contains(&e.hue));
            assert_eq!(e.alpha, 1.0);
        }
    }

    #[test]
    fn test_friction_eventually_explodes() {
        let config = FireworksConfig::default();
        let mut emitter = Emitter {
            position: Vec2::new(0.0, 1000.0),
            target: Vec2::new(0.0, -10_000.0),
            angle: -std::f32::consts::FRAC_PI_2,
            speed: 10.0,
            hue: 10.0,
            brightness: 0.5,
            alpha: 1.0,
            decay: config.emitter_decay,
        };

        let mut frames = 0;
        while emitter.advance(1.0, &config) == EmitterStatus::Flying {
            frames += 1;
            assert!(frames < 100, "emitter never stalled");
        }
        // 10 * 0.95^n < 0.5  =>  n = 59
        assert_eq!(frames + 1, 59);
    }

    #[test]
    fn test_explodes_near_target() {
        let config = FireworksConfig::default();
        let mut emitter = Emitter {
            position: Vec2::new(100.0, 100.0),
            target: Vec2::new(106.0, 100.0),
            angle: 0.0,
            speed: 5.0,
            hue: 0.0,
            brightness: 0.5,
            alpha: 1.0,
            decay: 0.0,
        };
        assert_eq!(emitter.advance(1.0, &config), EmitterStatus::Exploded);
    }

    #[test]
    fn test_opacity_never_negative() {
        let config = FireworksConfig::default();
        let mut emitter = Emitter {
            speed: 1_000.0,
            alpha: 0.01,
            decay: 0.5,
            target: Vec2::new(1e9, 0.0),
            ..Emitter::default()
        };
        emitter.advance(1.0, &config);
        assert_eq!(emitter.alpha, 0.0);
    }
}
