// File: crates/chart-core/src/geometry.rs
// Summary: Lightweight geometry helpers for pixel math.

use crate::axis::Axis;
use crate::types::Insets;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RectI32 {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl RectI32 {
    /// Plot area of a `width` x `height` surface once `insets` are removed.
    /// Collapses to a 1px rect instead of inverting on tiny surfaces.
    pub fn plot_area(width: i32, height: i32, insets: &Insets) -> Self {
        let left = insets.left as i32;
        let top = insets.top as i32;
        let right = (width - insets.right as i32).max(left + 1);
        let bottom = (height - insets.bottom as i32).max(top + 1);
        Self { left, top, right, bottom }
    }

    pub const fn width(&self) -> i32 { self.right - self.left }
    pub const fn height(&self) -> i32 { self.bottom - self.top }

    /// Map a data X value on `axis` to a horizontal pixel.
    #[inline]
    pub fn sx(&self, axis: &Axis, x: f64) -> f32 {
        self.left as f32 + ((x - axis.min) / axis.span()) as f32 * self.width() as f32
    }

    /// Map a data Y value on `axis` to a vertical pixel (grows downwards).
    #[inline]
    pub fn sy(&self, axis: &Axis, y: f64) -> f32 {
        self.bottom as f32 - ((y - axis.min) / axis.span()) as f32 * self.height() as f32
    }
}
