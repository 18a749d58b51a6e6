//! # FETE Fireworks
//!
//! The particle animation loop behind the greeting page's celebration button.
//!
//! ## Layers
//!
//! | Layer | Type | Owns |
//! |---|---|---|
//! | Simulation | [`SimulationState`] + [`advance`] | emitters, particles, show clock |
//! | Drawing | [`render`] onto a [`DrawSurface`] | nothing; draws what the state holds |
//! | Scheduling | [`FireworksDisplay`] over a [`FrameHost`] | frame request, auto-stop timer |
//!
//! Randomness is always passed in, so a seeded generator replays the same
//! show:
//!
//! ```rust
//! use std::time::Duration;
//!
//! use fete_core::ShowSeed;
//! use fete_fireworks::{FireworksConfig, FireworksDisplay, ManualHost, PixelSurface};
//!
//! let mut surface = PixelSurface::new(320, 180);
//! let mut display =
//!     FireworksDisplay::new(ManualHost::new(), FireworksConfig::default(), ShowSeed::new(7).rng())
//!         .unwrap();
//!
//! display.start(Duration::ZERO);
//! while display.is_running() {
//!     display.tick(Duration::from_millis(16), Some(&mut surface));
//! }
//! assert_eq!(surface.painted_pixels(), 0);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod display;
pub mod emitter;
pub mod error;
pub mod host;
pub mod particle;
pub mod render;
pub mod state;
pub mod step;
pub mod surface;

pub use config::FireworksConfig;
pub use display::{DisplayStats, FireworksDisplay, FrameHost, FrameRequest, TimerId};
pub use emitter::{Emitter, EmitterStatus};
pub use error::{FireworksError, FireworksResult};
pub use host::ManualHost;
pub use particle::Particle;
pub use render::render;
pub use state::{FrameReport, SimulationState};
pub use step::advance;
pub use surface::{DrawCommand, DrawSurface, PixelSurface, RecordingSurface};
