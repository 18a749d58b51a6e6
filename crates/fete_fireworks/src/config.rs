//! # Show Configuration
//!
//! Every physics constant is expressed per *reference frame* (1/60 s by
//! default). The step function scales them by `dt / reference_frame_secs`, so
//! a 30 FPS host sees the same trajectories as a 60 FPS host.
//!
//! Configs are loaded once at startup from TOML. Missing keys keep their
//! [`Default`] values, so a file only lists what it changes:
//!
//! ```toml
//! duration_secs = 6.0
//! spawn_probability = 0.08
//! burst_min = 30
//! burst_max = 100
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{FireworksError, FireworksResult};

/// Configuration for a fireworks show.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FireworksConfig {
    /// Wall-clock length of a show in seconds.
    pub duration_secs: f32,
    /// Length of the frame the physics constants are tuned for.
    pub reference_frame_secs: f32,
    /// Longest frame the step function will integrate in one go.
    pub max_frame_secs: f32,

    /// Chance per reference frame of launching a new emitter.
    pub spawn_probability: f32,
    /// Emitter pool capacity.
    pub max_emitters: usize,
    /// Particle pool capacity.
    pub max_particles: usize,

    /// Speed multiplier applied every reference frame.
    pub friction: f32,
    /// Downward pixels added to vertical motion every reference frame.
    pub gravity: f32,

    /// Slowest launch speed (px per reference frame).
    pub emitter_speed_min: f32,
    /// Fastest launch speed (px per reference frame).
    pub emitter_speed_max: f32,
    /// Emitter opacity lost per reference frame.
    pub emitter_decay: f32,
    /// An emitter this close to its target explodes.
    pub explode_distance: f32,
    /// An emitter slower than this explodes.
    pub explode_speed: f32,

    /// Fewest particles in a burst (inclusive).
    pub burst_min: u32,
    /// Most particles in a burst (inclusive).
    pub burst_max: u32,
    /// Fastest particle launch speed.
    pub particle_speed_max: f32,
    /// Slowest particle fade per reference frame.
    pub particle_decay_min: f32,
    /// Fastest particle fade per reference frame.
    pub particle_decay_max: f32,
    /// Particle hue deviates from its emitter by at most this many degrees.
    pub hue_jitter: f32,
    /// Darkest lightness (0-1).
    pub brightness_min: f32,
    /// Brightest lightness (0-1).
    pub brightness_max: f32,
    /// Particles below this opacity are removed.
    pub visibility_threshold: f32,

    /// Opacity of the black overlay painted each frame (trail length).
    pub trail_alpha: f32,
    /// Emitter dot radius in pixels.
    pub emitter_radius: f32,
    /// Particle dot radius in pixels.
    pub particle_radius: f32,
}

impl Default for FireworksConfig {
    fn default() -> Self {
        Self {
            duration_secs: 10.0,
            reference_frame_secs: 1.0 / 60.0,
            max_frame_secs: 0.1,

            spawn_probability: 0.05,
            max_emitters: 64,
            max_particles: 8_192,

            friction: 0.95,
            gravity: 0.3,

            emitter_speed_min: 5.0,
            emitter_speed_max: 10.0,
            emitter_decay: 0.015,
            explode_distance: 5.0,
            explode_speed: 0.5,

            burst_min: 50,
            burst_max: 99,
            particle_speed_max: 10.0,
            particle_decay_min: 0.015,
            particle_decay_max: 0.025,
            hue_jitter: 10.0,
            brightness_min: 0.5,
            brightness_max: 1.0,
            visibility_threshold: 0.01,

            trail_alpha: 0.1,
            emitter_radius: 3.0,
            particle_radius: 2.0,
        }
    }
}

impl FireworksConfig {
    /// Loads and validates a config file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid TOML, or
    /// fails [`FireworksConfig::validate`].
    pub fn from_file(path: &Path) -> FireworksResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| FireworksError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed or a value is out of range.
    pub fn from_toml(content: &str) -> FireworksResult<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks every range the simulation relies on.
    ///
    /// # Errors
    ///
    /// Returns [`FireworksError::InvalidConfig`] naming the first bad field.
    pub fn validate(&self) -> FireworksResult<()> {
        positive("duration_secs", self.duration_secs)?;
        positive("reference_frame_secs", self.reference_frame_secs)?;
        positive("max_frame_secs", self.max_frame_secs)?;
        if self.max_frame_secs < self.reference_frame_secs {
            return invalid("max_frame_secs must be at least reference_frame_secs");
        }

        unit("spawn_probability", self.spawn_probability)?;
        if self.max_emitters == 0 {
            return invalid("max_emitters must be greater than zero");
        }

        if !(self.friction > 0.0 && self.friction <= 1.0) {
            return invalid("friction must be in (0, 1]");
        }
        finite("gravity", self.gravity)?;

        ordered("emitter_speed", self.emitter_speed_min, self.emitter_speed_max)?;
        non_negative("emitter_speed_min", self.emitter_speed_min)?;
        non_negative("emitter_decay", self.emitter_decay)?;
        non_negative("explode_distance", self.explode_distance)?;
        non_negative("explode_speed", self.explode_speed)?;

        if self.burst_min == 0 {
            return invalid("burst_min must be at least 1");
        }
        if self.burst_min > self.burst_max {
            return invalid("burst_min must not exceed burst_max");
        }
        if self.burst_max as usize > self.max_particles {
            return invalid("burst_max must fit in max_particles");
        }
        non_negative("particle_speed_max", self.particle_speed_max)?;
        ordered("particle_decay", self.particle_decay_min, self.particle_decay_max)?;
        // Zero decay would keep particles alive forever.
        positive("particle_decay_min", self.particle_decay_min)?;
        non_negative("hue_jitter", self.hue_jitter)?;
        ordered("brightness", self.brightness_min, self.brightness_max)?;
        unit("brightness_min", self.brightness_min)?;
        unit("brightness_max", self.brightness_max)?;
        if !(self.visibility_threshold > 0.0 && self.visibility_threshold < 1.0) {
            return invalid("visibility_threshold must be in (0, 1)");
        }

        unit("trail_alpha", self.trail_alpha)?;
        non_negative("emitter_radius", self.emitter_radius)?;
        non_negative("particle_radius", self.particle_radius)?;
        Ok(())
    }

    /// Converts a frame delta into a multiple of the reference frame,
    /// clamped to `[0, max_frame_secs]`.
    #[must_use]
    pub fn frame_scale(&self, dt_secs: f32) -> f32 {
        let dt = if dt_secs.is_finite() { dt_secs } else { 0.0 };
        dt.clamp(0.0, self.max_frame_secs) / self.reference_frame_secs
    }
}

fn invalid<T>(message: &str) -> FireworksResult<T> {
    Err(FireworksError::InvalidConfig(message.to_owned()))
}

fn finite(name: &str, value: f32) -> FireworksResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(FireworksError::InvalidConfig(format!("{name} must be finite")))
    }
}

fn positive(name: &str, value: f32) -> FireworksResult<()> {
    finite(name, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(FireworksError::InvalidConfig(format!("{name} must be positive, got {value}")))
    }
}

fn non_negative(name: &str, value: f32) -> FireworksResult<()> {
    finite(name, value)?;
    if value >= 0.0 {
        Ok(())
    } else {
        Err(FireworksError::InvalidConfig(format!("{name} must not be negative, got {value}")))
    }
}

fn unit(name: &str, value: f32) -> FireworksResult<()> {
    finite(name, value)?;
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(FireworksError::InvalidConfig(format!("{name} must be in [0, 1], got {value}")))
    }
}

fn ordered(name: &str, min: f32, max: f32) -> FireworksResult<()> {
    finite(name, min)?;
    finite(name, max)?;
    if min <= max {
        Ok(())
    } else {
        Err(FireworksError::InvalidConfig(format!("{name}_min ({min}) exceeds {name}_max ({max})")))
    }
}
