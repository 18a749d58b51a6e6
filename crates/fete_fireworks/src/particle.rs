//! Burst particles.

use std::f32::consts::{FRAC_PI_2, TAU};

use fete_core::{Hsla, Vec2};
use rand::Rng;

use crate::config::FireworksConfig;

/// One fragment of an exploded emitter.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Particle {
    /// Current position in pixels.
    pub position: Vec2,
    /// Heading in radians.
    pub angle: f32,
    /// Speed in pixels per reference frame.
    pub speed: f32,
    /// Hue in degrees.
    pub hue: f32,
    /// Lightness (0-1).
    pub brightness: f32,
    /// Current opacity. Never increases.
    pub alpha: f32,
    /// Opacity lost per reference frame.
    pub decay: f32,
}

impl Particle {
    /// Creates one member of a burst at `origin`, colored around `hue`.
    pub fn burst_member<R: Rng + ?Sized>(
        rng: &mut R,
        origin: Vec2,
        hue: f32,
        config: &FireworksConfig,
    ) -> Self {
        let angle = rng.gen::<f32>() * TAU;
        // Cosine of a uniform quarter turn biases speeds towards the rim.
        let speed = (rng.gen::<f32>() * FRAC_PI_2).cos() * config.particle_speed_max;
        let hue = hue + rng.gen_range(-config.hue_jitter..=config.hue_jitter);
        let brightness = rng.gen_range(config.brightness_min..=config.brightness_max);
        let decay = rng.gen_range(config.particle_decay_min..=config.particle_decay_max);

        Self {
            position: origin,
            angle,
            speed,
            hue,
            brightness,
            alpha: 1.0,
            decay,
        }
    }

    /// Advances by `scale` reference frames. Returns false once the particle
    /// has faded below the visibility threshold.
    pub fn advance(&mut self, scale: f32, config: &FireworksConfig) -> bool {
        let velocity = Vec2::from_polar(self.angle, self.speed);
        self.position += velocity * scale + Vec2::new(0.0, config.gravity * scale);
        self.speed *= config.friction.powf(scale);
        self.alpha = (self.alpha - self.decay * scale).max(0.0);

        self.alpha >= config.visibility_threshold
    }

    /// Fill color at the current opacity.
    #[must_use]
    pub fn color(&self) -> Hsla {
        Hsla::new(self.hue, 1.0, self.brightness, self.alpha)
    }
}
