//! Logical-pixel geometry.

use glam::Vec2;

/// Upper bound applied to the device pixel ratio.
pub const MAX_PIXEL_RATIO: f32 = 2.0;

/// A point in logical (CSS-like) pixels.
pub type Point = Vec2;

/// On-screen size of a container plus its pixel density.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Width in logical pixels.
    pub width: f32,
    /// Height in logical pixels.
    pub height: f32,
    /// Physical pixels per logical pixel, clamped to [`MAX_PIXEL_RATIO`].
    pub pixel_ratio: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(0.0, 0.0, 1.0)
    }
}

impl Viewport {
    /// Create a viewport. Negative or non-finite sizes collapse to zero and the
    /// pixel ratio is clamped to `(0, MAX_PIXEL_RATIO]`.
    pub fn new(width: f32, height: f32, pixel_ratio: f32) -> Self {
        let sanitize = |v: f32| if v.is_finite() && v > 0.0 { v } else { 0.0 };
        let pixel_ratio = if pixel_ratio.is_finite() && pixel_ratio > 0.0 {
            pixel_ratio.min(MAX_PIXEL_RATIO)
        } else {
            1.0
        };
        Self {
            width: sanitize(width),
            height: sanitize(height),
            pixel_ratio,
        }
    }

    /// True when the container has no drawable area.
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    pub fn center(&self) -> Point {
        Point::new(self.width * 0.5, self.height * 0.5)
    }

    /// Backing raster size in physical pixels: `floor(size * pixel_ratio)`.
    pub fn physical_size(&self) -> (u32, u32) {
        (
            (self.width * self.pixel_ratio).floor() as u32,
            (self.height * self.pixel_ratio).floor() as u32,
        )
    }

    /// Whether `p` lies inside `[0, width] x [0, height]`.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= 0.0 && p.x <= self.width && p.y >= 0.0 && p.y <= self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_physical_size_floors() {
        let vp = Viewport::new(100.5, 50.7, 2.0);
        assert_eq!(vp.physical_size(), (201, 101));
    }

    #[test]
    fn test_pixel_ratio_is_clamped() {
        assert_eq!(Viewport::new(10.0, 10.0, 3.0).pixel_ratio, 2.0);
        assert_eq!(Viewport::new(10.0, 10.0, 0.0).pixel_ratio, 1.0);
        assert_eq!(Viewport::new(10.0, 10.0, 0.125).pixel_ratio, 0.125);
    }

    #[test]
    fn test_degenerate_sizes_are_empty() {
        assert!(Viewport::new(0.0, 100.0, 1.0).is_empty());
        assert!(Viewport::new(-5.0, 100.0, 1.0).is_empty());
        assert!(Viewport::new(f32::NAN, 100.0, 1.0).is_empty());
        assert!(!Viewport::new(1.0, 1.0, 1.0).is_empty());
    }

    #[test]
    fn test_distance() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert_eq!(a.distance_squared(b), 25.0);
        assert_eq!(a.distance(b), 5.0);
        assert_eq!(a.midpoint(b), Point::new(1.5, 2.0));
    }
}
