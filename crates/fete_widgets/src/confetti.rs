//! Confetti bursts.
//!
//! A burst is a list of piece descriptors the host animates with a falling
//! transform. The widget only decides what each piece looks like and when the
//! whole burst can be discarded.

use std::time::Duration;

use fete_core::Rgba;
use rand::seq::SliceRandom;
use rand::Rng;

/// Cake palette.
pub const CAKE_PALETTE: [u32; 5] = [0xFB8CA9, 0xFFD34D, 0xFCB9E9, 0x9B87F5, 0xFFA99F];

/// Gift palette.
pub const GIFT_PALETTE: [u32; 5] = [0xFB8CA9, 0xFFD34D, 0xF43F75, 0xFFC926, 0xFCACBF];

/// Shape of a confetti piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PieceShape {
    /// Sharp corners.
    Square,
    /// Fully rounded.
    Round,
}

/// How a burst is generated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfettiStyle {
    /// Colors as `0xRRGGBB`, picked uniformly.
    pub palette: &'static [u32],
    /// Pieces per burst.
    pub count: usize,
    /// Smallest edge in pixels.
    pub size_min: f32,
    /// Largest edge in pixels.
    pub size_max: f32,
    /// Draw width and height independently; otherwise pieces are square.
    pub independent_sides: bool,
    /// Shortest fall in seconds.
    pub fall_min_secs: f32,
    /// Longest fall in seconds.
    pub fall_max_secs: f32,
    /// Latest start delay in seconds.
    pub max_delay_secs: f32,
    /// Piece shape.
    pub shape: PieceShape,
}

impl ConfettiStyle {
    /// Confetti thrown when the candles are blown out.
    pub const CAKE: Self = Self {
        palette: &CAKE_PALETTE,
        count: 100,
        size_min: 5.0,
        size_max: 13.0,
        independent_sides: false,
        fall_min_secs: 3.0,
        fall_max_secs: 3.0,
        max_delay_secs: 0.5,
        shape: PieceShape::Square,
    };

    /// Confetti thrown when the gift opens on a wide screen.
    pub const GIFT: Self = Self {
        palette: &GIFT_PALETTE,
        count: 100,
        size_min: 5.0,
        size_max: 15.0,
        independent_sides: true,
        fall_min_secs: 2.0,
        fall_max_secs: 4.0,
        max_delay_secs: 0.5,
        shape: PieceShape::Round,
    };

    /// Gift confetti on a narrow screen: half the pieces.
    pub const GIFT_MOBILE: Self = Self {
        count: 50,
        ..Self::GIFT
    };

    /// Latest moment, relative to the burst, at which any piece is still
    /// falling.
    #[must_use]
    pub fn lifetime(&self) -> Duration {
        Duration::try_from_secs_f32(self.fall_max_secs + self.max_delay_secs)
            .unwrap_or(Duration::ZERO)
    }
}

/// One piece of confetti.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfettiPiece {
    /// Fill color.
    pub color: Rgba,
    /// Horizontal start, in percent of the container width (0-100).
    pub left_percent: f32,
    /// Width in pixels.
    pub width: f32,
    /// Height in pixels.
    pub height: f32,
    /// Delay before the piece starts falling.
    pub delay_secs: f32,
    /// Time the fall takes.
    pub fall_secs: f32,
    /// Corner style.
    pub shape: PieceShape,
}

/// A generated burst and the moment it was thrown.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfettiBurst {
    /// The pieces, in creation order.
    pub pieces: Vec<ConfettiPiece>,
    /// Host time of the throw.
    pub thrown_at: Duration,
    /// How long after the throw the burst may be discarded.
    pub lifetime: Duration,
}

impl ConfettiBurst {
    /// Generates a burst with `style` at host time `now`.
    pub fn throw<R: Rng + ?Sized>(style: &ConfettiStyle, rng: &mut R, now: Duration) -> Self {
        let pieces = (0..style.count)
            .map(|_| piece(style, rng))
            .collect();
        Self {
            pieces,
            thrown_at: now,
            lifetime: style.lifetime(),
        }
    }

    /// True once every piece has finished falling.
    #[must_use]
    pub fn is_expired(&self, now: Duration) -> bool {
        now.saturating_sub(self.thrown_at) >= self.lifetime
    }
}

fn piece<R: Rng + ?Sized>(style: &ConfettiStyle, rng: &mut R) -> ConfettiPiece {
    let color = style
        .palette
        .choose(rng)
        .map_or(Rgba::TRANSPARENT, |&hex| Rgba::hex(hex));
    let left_percent = rng.gen::<f32>() * 100.0;
    let width = span(rng, style.size_min, style.size_max);
    let height = if style.independent_sides {
        span(rng, style.size_min, style.size_max)
    } else {
        width
    };
    let fall_secs = span(rng, style.fall_min_secs, style.fall_max_secs);
    let delay_secs = rng.gen::<f32>() * style.max_delay_secs;

    ConfettiPiece {
        color,
        left_percent,
        width,
        height,
        delay_secs,
        fall_secs,
        shape: style.shape,
    }
}

/// Uniform in `[min, max)`; exactly `min` when the range is empty.
fn span<R: Rng + ?Sized>(rng: &mut R, min: f32, max: f32) -> f32 {
    min + rng.gen::<f32>() * (max - min).max(0.0)
}
