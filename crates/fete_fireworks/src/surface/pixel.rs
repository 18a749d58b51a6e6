//! Software RGBA8 raster.

use fete_core::{Rgba, Rgba8, Vec2};

use super::DrawSurface;

/// A CPU-side pixel buffer.
///
/// Row-major, top-left origin, one [`Rgba8`] per pixel. Use
/// [`PixelSurface::as_bytes`] to upload or encode the frame.
#[derive(Debug, Clone, Default)]
pub struct PixelSurface {
    width: u32,
    height: u32,
    pixels: Vec<Rgba8>,
}

impl PixelSurface {
    /// Creates a transparent surface.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Rgba8::CLEAR; area(width, height)],
        }
    }

    /// Pixel at `(x, y)`, or `None` outside the surface.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get(self.offset(x, y)).copied()
    }

    /// All pixels, row-major.
    #[must_use]
    pub fn pixels(&self) -> &[Rgba8] {
        &self.pixels
    }

    /// The buffer as raw RGBA bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Number of pixels with any opacity.
    #[must_use]
    pub fn painted_pixels(&self) -> usize {
        self.pixels.iter().filter(|p| p.a > 0).count()
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

impl DrawSurface for PixelSurface {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn fill(&mut self, color: Rgba) {
        for pixel in &mut self.pixels {
            *pixel = pixel.blend(color);
        }
    }

    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        if self.is_empty_area() || radius <= 0.0 || !center.x.is_finite() || !center.y.is_finite() {
            return;
        }

        // Pixel centers inside the circle are covered.
        let max_x = (self.width - 1) as f32;
        let max_y = (self.height - 1) as f32;
        let x0 = (center.x - radius).floor().clamp(0.0, max_x) as u32;
        let x1 = (center.x + radius).ceil().clamp(0.0, max_x) as u32;
        let y0 = (center.y - radius).floor().clamp(0.0, max_y) as u32;
        let y1 = (center.y + radius).ceil().clamp(0.0, max_y) as u32;
        let r2 = radius * radius;

        for y in y0..=y1 {
            let dy = y as f32 + 0.5 - center.y;
            for x in x0..=x1 {
                let dx = x as f32 + 0.5 - center.x;
                if dx * dx + dy * dy <= r2 {
                    let offset = self.offset(x, y);
                    if let Some(pixel) = self.pixels.get_mut(offset) {
                        *pixel = pixel.blend(color);
                    }
                }
            }
        }
    }

    fn clear(&mut self) {
        self.pixels.fill(Rgba8::CLEAR);
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.pixels.clear();
        self.pixels.resize(area(width, height), Rgba8::CLEAR);
    }
}

fn area(width: u32, height: u32) -> usize {
    width as usize * height as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_blends_every_pixel() {
        let mut surface = PixelSurface::new(4, 3);
        surface.fill(Rgba::BLACK);
        assert!(surface.pixels().iter().all(|p| *p == Rgba8 { r: 0, g: 0, b: 0, a: 255 }));
        assert_eq!(surface.as_bytes().len(), 4 * 3 * 4);
    }

    #[test]
    fn test_circle_is_clipped() {
        let mut surface = PixelSurface::new(10, 10);
        surface.fill_circle(Vec2::new(0.0, 0.0), 3.0, Rgba::new(1.0, 0.0, 0.0, 1.0));

        assert_eq!(surface.pixel(0, 0).map(|p| p.r), Some(255));
        assert_eq!(surface.pixel(9, 9), Some(Rgba8::CLEAR));
        assert!(surface.painted_pixels() > 0);
        assert!(surface.painted_pixels() < 16);
    }

    #[test]
    fn test_circle_off_surface_draws_nothing() {
        let mut surface = PixelSurface::new(10, 10);
        surface.fill_circle(Vec2::new(-50.0, -50.0), 2.0, Rgba::BLACK);
        surface.fill_circle(Vec2::new(f32::NAN, 5.0), 2.0, Rgba::BLACK);
        assert_eq!(surface.painted_pixels(), 0);
    }

    #[test]
    fn test_zero_size_is_inert() {
        let mut surface = PixelSurface::new(0, 0);
        surface.fill(Rgba::BLACK);
        surface.fill_circle(Vec2::ZERO, 5.0, Rgba::BLACK);
        assert!(surface.is_empty_area());
        assert!(surface.as_bytes().is_empty());
        assert_eq!(surface.pixel(0, 0), None);
    }

    #[test]
    fn test_resize_discards_contents() {
        let mut surface = PixelSurface::new(2, 2);
        surface.fill(Rgba::BLACK);
        surface.resize(3, 1);
        assert_eq!(surface.size(), (3, 1));
        assert_eq!(surface.painted_pixels(), 0);
    }
}
