//! Random pointer displacement.

use rand::Rng;
use std::fmt;

/// A relative pointer displacement in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Offset {
    pub dx: i32,
    pub dy: i32,
}

impl Offset {
    pub fn is_zero(&self) -> bool {
        self.dx == 0 && self.dy == 0
    }

    /// True if neither axis exceeds `max_offset` in magnitude.
    pub fn within(&self, max_offset: u32) -> bool {
        self.dx.unsigned_abs() <= max_offset && self.dy.unsigned_abs() <= max_offset
    }
}

impl fmt::Display for Offset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:+}, {:+})", self.dx, self.dy)
    }
}

/// Samples dx and dy independently from `[-max_offset, max_offset]`.
///
/// A (0, 0) draw is resampled once and the second draw is accepted as is, so
/// an idle tick is rare but possible. `max_offset` of 0 always yields (0, 0).
pub fn sample_offset<R: Rng + ?Sized>(rng: &mut R, max_offset: u32) -> Offset {
    let m = max_offset.min(i32::MAX as u32) as i32;

    let mut draw = || Offset {
        dx: rng.gen_range(-m..=m),
        dy: rng.gen_range(-m..=m),
    };

    let first = draw();
    if first.is_zero() {
        draw()
    } else {
        first
    }
}
