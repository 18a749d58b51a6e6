//! Drawing surfaces.
//!
//! The show only ever needs three primitives: a full-surface fill (the trail
//! overlay), a filled circle (every emitter and particle) and a clear. Hosts
//! implement [`DrawSurface`] on top of whatever they actually draw with.

mod pixel;
mod recording;

pub use pixel::PixelSurface;
pub use recording::RecordingSurface;

use fete_core::{Rgba, Vec2};

/// A single drawing operation, as captured by [`RecordingSurface`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    /// Composite a color over the whole surface.
    Fill {
        /// Overlay color.
        color: Rgba,
    },
    /// Filled circle.
    Circle {
        /// Center in pixels.
        center: Vec2,
        /// Radius in pixels.
        radius: f32,
        /// Fill color.
        color: Rgba,
    },
    /// Reset every pixel to transparent.
    Clear,
}

/// Something the show can be drawn onto.
pub trait DrawSurface {
    /// Current dimensions in pixels.
    fn size(&self) -> (u32, u32);

    /// Composites `color` over the whole surface.
    fn fill(&mut self, color: Rgba);

    /// Composites a filled circle. Parts outside the surface are clipped.
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba);

    /// Resets the surface to transparent.
    fn clear(&mut self);

    /// Changes the dimensions. Previous contents are discarded.
    fn resize(&mut self, width: u32, height: u32);

    /// True if there is nothing to draw onto.
    fn is_empty_area(&self) -> bool {
        let (w, h) = self.size();
        w == 0 || h == 0
    }
}
