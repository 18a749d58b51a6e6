//! # Memory Management
//!
//! Pre-allocated slot pools for zero-allocation frame loops.
//!
//! ## Design Philosophy
//!
//! All slots are allocated once when a show is configured. While frames run:
//! - No heap allocations
//! - Dead slots are recycled through a pre-reserved free list
//! - Iteration order is slot order, so runs are reproducible

mod pool;

pub use pool::{SlotHandle, SlotPool};
