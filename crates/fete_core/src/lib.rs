//! # FETE Core
//!
//! Shared building blocks for the greeting widgets and the fireworks
//! simulation:
//! - Fixed-capacity slot pools that never allocate after construction
//! - 2D vectors and HSLA/RGBA color math
//! - Deterministic show seeds
//!
//! ## Architecture Rules
//!
//! 1. **No heap allocations in the frame loop** - pools are sized once
//! 2. **Deterministic** - same seed, same show
//! 3. **Host agnostic** - nothing here knows about windows, canvases or DOM
//!
//! ## Example
//!
//! ```rust
//! use fete_core::{ShowSeed, SlotPool};
//!
//! let mut pool: SlotPool<u32> = SlotPool::new(4);
//! let handle = pool.insert(7).unwrap();
//! assert_eq!(pool.get(handle), Some(&7));
//!
//! let _rng = ShowSeed::new(42).rng();
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod color;
pub mod math;
pub mod memory;
pub mod seed;

pub use color::{Hsla, Rgba, Rgba8};
pub use math::Vec2;
pub use memory::{SlotHandle, SlotPool};
pub use seed::ShowSeed;
