//! # FETE
//!
//! Engine behind a birthday greeting page: a deterministic fireworks display
//! and the state machines for every widget around it.
//!
//! - [`shared`]: slot pools, vector and color math, show seeds
//! - [`fireworks`]: particle simulation, surfaces and the frame-loop driver
//! - [`widgets`]: cake, gift, carousel, timeline, distance map, countdown,
//!   music player, love map and the page flow tying them together
//! - [`preview`]: headless fireworks runs with logged statistics

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod preview;

pub use fete_core as shared;
pub use fete_fireworks as fireworks;
pub use fete_widgets as widgets;
