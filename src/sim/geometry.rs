//! Axis-aligned boxes and scalar helpers
//!
//! Every hit test in the game is a rectangle overlap check; entities expose
//! their hit box as a [`Rect`] and the tick compares them with [`intersects`].

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle (top-left corner + size, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    /// Rectangle of the given size centered on `center`
    pub fn centered(center: Vec2, size: Vec2) -> Self {
        Self {
            min: center - size / 2.0,
            size,
        }
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.min + self.size / 2.0
    }
}

/// Rectangle overlap test
///
/// Boxes are disjoint only if one lies entirely beyond the other's opposite
/// edge on either axis. Touching edges count as overlap.
#[inline]
pub fn intersects(a: &Rect, b: &Rect) -> bool {
    let (a_max, b_max) = (a.max(), b.max());
    !(a_max.x < b.min.x || b_max.x < a.min.x || a_max.y < b.min.y || b_max.y < a.min.y)
}

/// Bound `v` to `[lo, hi]`
///
/// Unlike `f32::clamp` this never panics: if `lo > hi` the result is `lo`.
#[inline]
pub fn clamp(v: f32, lo: f32, hi: f32) -> f32 {
    lo.max(hi.min(v))
}

/// Uniform value in `[lo, hi)`
///
/// Degenerate ranges return `lo` instead of panicking.
#[inline]
pub fn random_between<R: Rng + ?Sized>(rng: &mut R, lo: f32, hi: f32) -> f32 {
    lo + rng.random::<f32>() * (hi - lo)
}
