//! The drawing surface the animations paint through.

use crate::color::{ColorStop, Rgba};
use crate::geometry::{Point, Viewport};

/// Soft shadow painted behind subsequent shapes, like a canvas `shadowBlur`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glow {
    pub color: Rgba,
    /// Blur radius in logical pixels.
    pub blur: f32,
}

impl Glow {
    pub const fn new(color: Rgba, blur: f32) -> Self {
        Self { color, blur }
    }
}

/// Linear gradient between two points.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearGradient {
    pub from: Point,
    pub to: Point,
    pub stops: Vec<ColorStop>,
}

impl LinearGradient {
    /// Gradient parameter of `p`, the projection of `p` onto `from -> to`.
    pub fn offset_at(&self, p: Point) -> f32 {
        let d = self.to - self.from;
        let len2 = d.length_squared();
        if len2 <= f32::EPSILON {
            return 0.0;
        }
        (p - self.from).dot(d) / len2
    }
}

/// Elliptical radial gradient. Offset 0 sits on `inner_radius` (measured along
/// x) and offset 1 on the ellipse with radii `radius_x`, `radius_y`.
#[derive(Debug, Clone, PartialEq)]
pub struct RadialGradient {
    pub center: Point,
    pub inner_radius: f32,
    pub radius_x: f32,
    pub radius_y: f32,
    pub stops: Vec<ColorStop>,
}

impl RadialGradient {
    /// Circular gradient between two radii, like `createRadialGradient`.
    pub fn circle(center: Point, inner_radius: f32, radius: f32, stops: Vec<ColorStop>) -> Self {
        Self {
            center,
            inner_radius,
            radius_x: radius,
            radius_y: radius,
            stops,
        }
    }

    /// Elliptical gradient starting at the center, like CSS `radial-gradient`.
    pub fn ellipse(center: Point, radius_x: f32, radius_y: f32, stops: Vec<ColorStop>) -> Self {
        Self {
            center,
            inner_radius: 0.0,
            radius_x,
            radius_y,
            stops,
        }
    }

    pub fn offset_at(&self, p: Point) -> f32 {
        if self.radius_x <= 0.0 || self.radius_y <= 0.0 {
            return 1.0;
        }
        let scaled = (p - self.center) / Point::new(self.radius_x, self.radius_y);
        let d = scaled.length() * self.radius_x;
        let span = self.radius_x - self.inner_radius;
        if span <= 0.0 {
            return if d >= self.radius_x { 1.0 } else { 0.0 };
        }
        (d - self.inner_radius) / span
    }
}

/// An addressable 2D raster target. Coordinates are logical pixels; the
/// implementation maps them to physical pixels using its viewport's pixel
/// ratio.
pub trait Surface {
    /// The logical size and pixel ratio the surface was allocated for.
    fn viewport(&self) -> Viewport;

    /// Reset every pixel to transparent.
    fn clear(&mut self);

    /// Fill the whole surface with a linear gradient.
    fn fill_linear_gradient(&mut self, gradient: &LinearGradient);

    /// Fill the whole surface with a radial gradient.
    fn fill_radial_gradient(&mut self, gradient: &RadialGradient);

    /// Set or remove the glow applied to strokes and circles that follow.
    fn set_glow(&mut self, glow: Option<Glow>);

    fn stroke_line(&mut self, from: Point, to: Point, color: Rgba, width: f32);

    fn stroke_quadratic(&mut self, from: Point, control: Point, to: Point, color: Rgba, width: f32);

    fn fill_circle(&mut self, center: Point, radius: f32, color: Rgba);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_offset_projects_onto_axis() {
        let g = LinearGradient {
            from: Point::new(0.0, 0.0),
            to: Point::new(100.0, 100.0),
            stops: Vec::new(),
        };
        assert_eq!(g.offset_at(Point::new(0.0, 0.0)), 0.0);
        assert_eq!(g.offset_at(Point::new(100.0, 100.0)), 1.0);
        assert_eq!(g.offset_at(Point::new(100.0, 0.0)), 0.5);
    }

    #[test]
    fn test_radial_offset_inside_inner_radius_is_negative() {
        let g = RadialGradient::circle(Point::new(0.0, 0.0), 100.0, 200.0, Vec::new());
        assert!(g.offset_at(Point::new(50.0, 0.0)) < 0.0);
        assert_eq!(g.offset_at(Point::new(150.0, 0.0)), 0.5);
        assert_eq!(g.offset_at(Point::new(0.0, 200.0)), 1.0);
    }

    #[test]
    fn test_ellipse_offset_uses_both_radii() {
        let g = RadialGradient::ellipse(Point::new(0.0, 0.0), 200.0, 100.0, Vec::new());
        assert_eq!(g.offset_at(Point::new(200.0, 0.0)), 1.0);
        assert_eq!(g.offset_at(Point::new(0.0, 100.0)), 1.0);
        assert_eq!(g.offset_at(Point::new(0.0, 50.0)), 0.5);
    }
}
