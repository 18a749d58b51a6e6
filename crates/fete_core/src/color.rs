//! Color types.
//!
//! Simulation entities carry [`Hsla`] (hue jitter is natural in HSL), surfaces
//! composite in [`Rgba`] and store [`Rgba8`] pixels.

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// RGBA color, components in 0-1.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rgba {
    /// Red component (0-1).
    pub r: f32,
    /// Green component (0-1).
    pub g: f32,
    /// Blue component (0-1).
    pub b: f32,
    /// Alpha component (0-1).
    pub a: f32,
}

impl Rgba {
    /// Transparent black.
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);
    /// Solid black.
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);

    /// Creates a color from RGBA values (0-1).
    #[must_use]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a color from hex value (0xRRGGBB), fully opaque.
    #[must_use]
    pub fn hex(hex: u32) -> Self {
        let r = f32::from(((hex >> 16) & 0xFF) as u8) / 255.0;
        let g = f32::from(((hex >> 8) & 0xFF) as u8) / 255.0;
        let b = f32::from((hex & 0xFF) as u8) / 255.0;
        Self::new(r, g, b, 1.0)
    }

    /// Returns a new color with different alpha.
    #[must_use]
    pub const fn with_alpha(self, a: f32) -> Self {
        Self::new(self.r, self.g, self.b, a)
    }
}

/// HSLA color: hue in degrees, saturation/lightness/alpha in 0-1.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Hsla {
    /// Hue in degrees. Any value is accepted and wrapped into 0-360.
    pub h: f32,
    /// Saturation (0-1).
    pub s: f32,
    /// Lightness (0-1).
    pub l: f32,
    /// Alpha (0-1).
    pub a: f32,
}

impl Hsla {
    /// Creates a new HSLA color.
    #[must_use]
    pub const fn new(h: f32, s: f32, l: f32, a: f32) -> Self {
        Self { h, s, l, a }
    }

    /// Converts to RGBA.
    #[must_use]
    pub fn to_rgba(self) -> Rgba {
        let h = self.h.rem_euclid(360.0) / 60.0;
        let s = self.s.clamp(0.0, 1.0);
        let l = self.l.clamp(0.0, 1.0);

        let chroma = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let x = chroma * (1.0 - (h % 2.0 - 1.0).abs());
        let m = l - chroma / 2.0;

        // `h` is in [0, 6); truncation picks the sextant.
        let (r, g, b) = match h as u32 {
            0 => (chroma, x, 0.0),
            1 => (x, chroma, 0.0),
            2 => (0.0, chroma, x),
            3 => (0.0, x, chroma),
            4 => (x, 0.0, chroma),
            _ => (chroma, 0.0, x),
        };

        Rgba::new(r + m, g + m, b + m, self.a.clamp(0.0, 1.0))
    }
}

/// 8-bit RGBA pixel, laid out for direct upload.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Pod, Zeroable)]
pub struct Rgba8 {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
    /// Alpha.
    pub a: u8,
}

impl Rgba8 {
    /// Fully transparent pixel.
    pub const CLEAR: Self = Self { r: 0, g: 0, b: 0, a: 0 };

    /// Quantizes an [`Rgba`] color.
    #[must_use]
    pub fn from_rgba(color: Rgba) -> Self {
        Self {
            r: quantize(color.r),
            g: quantize(color.g),
            b: quantize(color.b),
            a: quantize(color.a),
        }
    }

    /// Composites `src` over this pixel (source-over).
    #[must_use]
    pub fn blend(self, src: Rgba) -> Self {
        let sa = src.a.clamp(0.0, 1.0);
        if sa <= 0.0 {
            return self;
        }
        let da = f32::from(self.a) / 255.0;
        let out_a = sa + da * (1.0 - sa);
        if out_a <= 0.0 {
            return Self::CLEAR;
        }
        let channel = |s: f32, d: u8| {
            let d = f32::from(d) / 255.0;
            (s * sa + d * da * (1.0 - sa)) / out_a
        };
        Self {
            r: quantize(channel(src.r, self.r)),
            g: quantize(channel(src.g, self.g)),
            b: quantize(channel(src.b, self.b)),
            a: quantize(out_a),
        }
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn quantize(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}
