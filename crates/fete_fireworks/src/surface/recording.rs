//! Command-log surface.

use fete_core::{Rgba, Vec2};

use super::{DrawCommand, DrawSurface};

/// Records draw calls instead of rasterizing them.
///
/// Useful for hosts that replay the show through their own renderer and for
/// asserting on exactly what a frame drew. Commands accumulate until
/// [`RecordingSurface::take_commands`] or [`RecordingSurface::reset`].
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    width: u32,
    height: u32,
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            commands: Vec::with_capacity(1024),
        }
    }

    /// Commands recorded so far.
    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Drains the recorded commands.
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Forgets recorded commands, keeping the allocation.
    pub fn reset(&mut self) {
        self.commands.clear();
    }

    /// Number of circles recorded.
    #[must_use]
    pub fn circle_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Circle { .. }))
            .count()
    }
}

impl DrawSurface for RecordingSurface {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn fill(&mut self, color: Rgba) {
        self.commands.push(DrawCommand::Fill { color });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
        });
    }

    fn clear(&mut self) {
        self.commands.push(DrawCommand::Clear);
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.commands.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_in_order() {
        let mut surface = RecordingSurface::new(8, 8);
        surface.fill(Rgba::BLACK);
        surface.fill_circle(Vec2::new(1.0, 2.0), 3.0, Rgba::BLACK);
        surface.clear();

        assert_eq!(surface.commands().len(), 3);
        assert_eq!(surface.commands()[0], DrawCommand::Fill { color: Rgba::BLACK });
        assert_eq!(surface.commands()[2], DrawCommand::Clear);
        assert_eq!(surface.circle_count(), 1);

        let taken = surface.take_commands();
        assert_eq!(taken.len(), 3);
        assert!(surface.commands().is_empty());
    }
}
