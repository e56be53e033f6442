//! Software raster surface.
//!
//! Pixels are stored premultiplied in `f32` at `floor(size * pixel_ratio)`
//! resolution. Shapes are anti-aliased with a distance-to-shape coverage
//! estimate and glows are a gaussian-ish falloff around the shape.

use std::f32::consts::PI;

use lumen_core::{
    Glow, LinearGradient, Point, RadialGradient, Rgba, Surface, Viewport, sample_stops,
};
use thiserror::Error;
use tracing::debug;

use crate::path::quadratic_point;

/// Largest raster this surface will allocate, in pixels.
pub const MAX_RASTER_PIXELS: u64 = 16 * 1024 * 1024;

/// Segments used to flatten a quadratic curve.
const CURVE_SEGMENTS: usize = 12;

#[derive(Debug, Error, PartialEq)]
pub enum SurfaceError {
    #[error("raster of {width}x{height} pixels exceeds the limit of {max} pixels")]
    TooLarge { width: u32, height: u32, max: u64 },
}

/// An RGBA pixel buffer implementing [`Surface`].
#[derive(Debug, Clone)]
pub struct Raster {
    viewport: Viewport,
    width: u32,
    height: u32,
    pixels: Vec<[f32; 4]>,
    glow: Option<Glow>,
}

impl Raster {
    /// Allocate a transparent raster for `viewport`.
    pub fn new(viewport: Viewport) -> Result<Self, SurfaceError> {
        let mut raster = Self {
            viewport,
            width: 0,
            height: 0,
            pixels: Vec::new(),
            glow: None,
        };
        raster.resize(viewport)?;
        Ok(raster)
    }

    /// Reallocate for a new container size. Contents are discarded.
    pub fn resize(&mut self, viewport: Viewport) -> Result<(), SurfaceError> {
        let (width, height) = viewport.physical_size();
        let total = width as u64 * height as u64;
        if total > MAX_RASTER_PIXELS {
            return Err(SurfaceError::TooLarge {
                width,
                height,
                max: MAX_RASTER_PIXELS,
            });
        }
        self.viewport = viewport;
        self.width = width;
        self.height = height;
        self.pixels = vec![[0.0; 4]; total as usize];
        self.glow = None;
        debug!(width, height, ratio = viewport.pixel_ratio, "raster allocated");
        Ok(())
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Width in physical pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in physical pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Straight-alpha color of a physical pixel, transparent when out of range.
    pub fn pixel(&self, x: u32, y: u32) -> Rgba {
        self.premultiplied(x, y)
            .map(Rgba::from_premultiplied)
            .unwrap_or(Rgba::TRANSPARENT)
    }

    fn premultiplied(&self, x: u32, y: u32) -> Option<[f32; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    /// Average premultiplied color over the physical-pixel rectangle
    /// `[x0, x1) x [y0, y1)`. Always includes at least the pixel under `(x0, y0)`.
    pub fn average(&self, x0: f32, y0: f32, x1: f32, y1: f32) -> [f32; 4] {
        let clamp_x = |v: f32| (v.max(0.0) as u32).min(self.width);
        let clamp_y = |v: f32| (v.max(0.0) as u32).min(self.height);
        let (sx, sy) = (clamp_x(x0.floor()), clamp_y(y0.floor()));
        let ex = clamp_x(x1.ceil()).max(sx + 1);
        let ey = clamp_y(y1.ceil()).max(sy + 1);

        let mut sum = [0.0f32; 4];
        let mut count = 0u32;
        for y in sy..ey {
            for x in sx..ex {
                if let Some(p) = self.premultiplied(x, y) {
                    for (acc, v) in sum.iter_mut().zip(p) {
                        *acc += v;
                    }
                    count += 1;
                }
            }
        }
        if count > 0 {
            let n = count as f32;
            sum.iter_mut().for_each(|v| *v /= n);
        }
        sum
    }

    /// Source-over blend of a straight color at `coverage` onto pixel `(x, y)`.
    fn blend(&mut self, x: i64, y: i64, color: Rgba, coverage: f32) {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return;
        }
        let coverage = coverage.clamp(0.0, 1.0);
        if coverage <= 0.0 || color.a <= 0.0 {
            return;
        }
        let src = color.with_alpha(color.a * coverage).premultiplied();
        let idx = y as usize * self.width as usize + x as usize;
        if let Some(dst) = self.pixels.get_mut(idx) {
            let keep = 1.0 - src[3];
            for i in 0..4 {
                dst[i] = src[i] + dst[i] * keep;
            }
        }
    }

    fn to_physical(&self, p: Point) -> Point {
        p * self.viewport.pixel_ratio
    }

    /// Logical coordinate of the center of physical pixel `(x, y)`.
    fn pixel_center(&self, x: u32, y: u32) -> Point {
        let ratio = self.viewport.pixel_ratio;
        Point::new((x as f32 + 0.5) / ratio, (y as f32 + 0.5) / ratio)
    }

    fn fill_with(&mut self, shade: impl Fn(Point) -> Rgba) {
        for y in 0..self.height {
            for x in 0..self.width {
                let color = shade(self.pixel_center(x, y));
                self.blend(x as i64, y as i64, color, 1.0);
            }
        }
    }

    /// Iterate pixels within `reach` of the physical-space bounding box.
    fn for_each_near(
        &mut self,
        min: Point,
        max: Point,
        reach: f32,
        mut paint: impl FnMut(&mut Self, i64, i64, Point),
    ) {
        let x0 = ((min.x - reach).floor() as i64).max(0);
        let y0 = ((min.y - reach).floor() as i64).max(0);
        let x1 = ((max.x + reach).ceil() as i64).min(self.width as i64 - 1);
        let y1 = ((max.y + reach).ceil() as i64).min(self.height as i64 - 1);
        for y in y0..=y1 {
            for x in x0..=x1 {
                paint(self, x, y, Point::new(x as f32 + 0.5, y as f32 + 0.5));
            }
        }
    }

    fn stroke_segment(&mut self, a: Point, b: Point, color: Rgba, width: f32) {
        let ratio = self.viewport.pixel_ratio;
        let half = (width * ratio * 0.5).max(0.0);
        let glow = self.glow.map(|g| (g.color, (g.blur * ratio * 0.5).max(0.5)));
        let reach = half + glow.map(|(_, sigma)| sigma * 3.0).unwrap_or(0.0) + 1.0;
        let min = Point::new(a.x.min(b.x), a.y.min(b.y));
        let max = Point::new(a.x.max(b.x), a.y.max(b.y));

        self.for_each_near(min, max, reach, |raster, x, y, center| {
            let d = distance_to_segment(center, a, b);
            if let Some((glow_color, sigma)) = glow {
                let outside = (d - half).max(0.0);
                let strength = (half * 2.0 / sigma).min(1.0);
                let falloff = (-(outside * outside) / (2.0 * sigma * sigma)).exp();
                raster.blend(x, y, glow_color, falloff * strength);
            }
            raster.blend(x, y, color, line_coverage(d, half));
        });
    }
}

/// Coverage of a pixel whose center is `d` away from a stroke of half width `half`.
fn line_coverage(d: f32, half: f32) -> f32 {
    if half >= 0.5 {
        (half + 0.5 - d).clamp(0.0, 1.0)
    } else {
        // Hairlines spread their area over a one-pixel tent.
        (1.0 - d).clamp(0.0, 1.0) * half * 2.0
    }
}

/// Coverage of a pixel whose center is `d` from a disc of radius `r`.
fn disc_coverage(d: f32, r: f32) -> f32 {
    if r >= 0.5 {
        (r + 0.5 - d).clamp(0.0, 1.0)
    } else {
        (1.0 - d).clamp(0.0, 1.0) * (PI * r * r).min(1.0)
    }
}

fn distance_to_segment(p: Point, a: Point, b: Point) -> f32 {
    let ab = b - a;
    let len2 = ab.length_squared();
    if len2 <= f32::EPSILON {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len2).clamp(0.0, 1.0);
    p.distance(a.lerp(b, t))
}

impl Surface for Raster {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn clear(&mut self) {
        self.pixels.iter_mut().for_each(|p| *p = [0.0; 4]);
    }

    fn fill_linear_gradient(&mut self, gradient: &LinearGradient) {
        self.fill_with(|p| sample_stops(&gradient.stops, gradient.offset_at(p)));
    }

    fn fill_radial_gradient(&mut self, gradient: &RadialGradient) {
        self.fill_with(|p| sample_stops(&gradient.stops, gradient.offset_at(p)));
    }

    fn set_glow(&mut self, glow: Option<Glow>) {
        self.glow = glow;
    }

    fn stroke_line(&mut self, from: Point, to: Point, color: Rgba, width: f32) {
        let (a, b) = (self.to_physical(from), self.to_physical(to));
        self.stroke_segment(a, b, color, width);
    }

    fn stroke_quadratic(&mut self, from: Point, control: Point, to: Point, color: Rgba, width: f32) {
        let (a, c, b) = (
            self.to_physical(from),
            self.to_physical(control),
            self.to_physical(to),
        );
        let mut prev = a;
        for i in 1..=CURVE_SEGMENTS {
            let next = quadratic_point(a, c, b, i as f32 / CURVE_SEGMENTS as f32);
            self.stroke_segment(prev, next, color, width);
            prev = next;
        }
    }

    fn fill_circle(&mut self, center: Point, radius: f32, color: Rgba) {
        let ratio = self.viewport.pixel_ratio;
        let c = self.to_physical(center);
        let r = (radius * ratio).max(0.0);
        let glow = self.glow.map(|g| (g.color, (g.blur * ratio * 0.5).max(0.5)));
        let reach = r + glow.map(|(_, sigma)| sigma * 3.0).unwrap_or(0.0) + 1.0;

        self.for_each_near(c, c, reach, |raster, x, y, pixel| {
            let d = pixel.distance(c);
            if let Some((glow_color, sigma)) = glow {
                let outside = (d - r).max(0.0);
                let strength = (r * 2.0 / sigma).min(1.0);
                let falloff = (-(outside * outside) / (2.0 * sigma * sigma)).exp();
                raster.blend(x, y, glow_color, falloff * strength);
            }
            raster.blend(x, y, color, disc_coverage(d, r));
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_core::ColorStop;

    const WHITE: Rgba = Rgba::new(1.0, 1.0, 1.0, 1.0);

    #[test]
    fn test_dimensions_follow_pixel_ratio() {
        let raster = Raster::new(Viewport::new(100.0, 40.0, 2.0)).unwrap();
        assert_eq!((raster.width(), raster.height()), (200, 80));

        let raster = Raster::new(Viewport::new(801.0, 451.0, 0.125)).unwrap();
        assert_eq!((raster.width(), raster.height()), (100, 56));
    }

    #[test]
    fn test_oversized_raster_is_rejected() {
        let err = Raster::new(Viewport::new(100_000.0, 100_000.0, 1.0)).unwrap_err();
        assert!(matches!(err, SurfaceError::TooLarge { .. }));
    }

    #[test]
    fn test_zero_size_raster_ignores_drawing() {
        let mut raster = Raster::new(Viewport::new(0.0, 0.0, 1.0)).unwrap();
        raster.clear();
        raster.fill_circle(Point::new(0.0, 0.0), 5.0, WHITE);
        raster.stroke_line(Point::new(-5.0, 0.0), Point::new(5.0, 0.0), WHITE, 1.0);
        assert_eq!(raster.width(), 0);
        assert_eq!(raster.pixel(0, 0), Rgba::TRANSPARENT);
    }

    #[test]
    fn test_circle_covers_center_not_corner() {
        let mut raster = Raster::new(Viewport::new(20.0, 20.0, 1.0)).unwrap();
        raster.fill_circle(Point::new(10.0, 10.0), 3.0, WHITE);
        assert!(raster.pixel(10, 10).a > 0.99);
        assert_eq!(raster.pixel(0, 0).a, 0.0);
    }

    #[test]
    fn test_glow_spills_past_the_shape() {
        let mut plain = Raster::new(Viewport::new(30.0, 30.0, 1.0)).unwrap();
        plain.fill_circle(Point::new(15.0, 15.0), 2.0, WHITE);

        let mut glowing = Raster::new(Viewport::new(30.0, 30.0, 1.0)).unwrap();
        glowing.set_glow(Some(Glow::new(WHITE.with_alpha(0.8), 8.0)));
        glowing.fill_circle(Point::new(15.0, 15.0), 2.0, WHITE);

        assert_eq!(plain.pixel(20, 15).a, 0.0);
        assert!(glowing.pixel(20, 15).a > 0.0);
    }

    #[test]
    fn test_line_alpha_scales_pixels() {
        let mut raster = Raster::new(Viewport::new(20.0, 5.0, 1.0)).unwrap();
        raster.stroke_line(Point::new(0.0, 2.5), Point::new(20.0, 2.5), WHITE.with_alpha(0.5), 1.0);
        let p = raster.pixel(10, 2);
        assert!((p.a - 0.5).abs() < 1e-4);
        assert_eq!(raster.pixel(10, 0).a, 0.0);
    }

    #[test]
    fn test_clear_resets_pixels() {
        let mut raster = Raster::new(Viewport::new(10.0, 10.0, 1.0)).unwrap();
        raster.fill_circle(Point::new(5.0, 5.0), 4.0, WHITE);
        raster.clear();
        assert!((0..10).all(|x| raster.pixel(x, 5).a == 0.0));
    }

    #[test]
    fn test_linear_gradient_fill_varies_along_axis() {
        let mut raster = Raster::new(Viewport::new(100.0, 1.0, 1.0)).unwrap();
        raster.fill_linear_gradient(&LinearGradient {
            from: Point::new(0.0, 0.0),
            to: Point::new(100.0, 0.0),
            stops: vec![
                ColorStop::new(0.0, Rgba::new(0.0, 0.0, 0.0, 0.0)),
                ColorStop::new(1.0, Rgba::new(0.0, 0.0, 0.0, 1.0)),
            ],
        });
        assert!(raster.pixel(10, 0).a < raster.pixel(90, 0).a);
        assert!((raster.pixel(49, 0).a - 0.495).abs() < 1e-3);
    }

    #[test]
    fn test_quadratic_passes_through_endpoints() {
        let mut raster = Raster::new(Viewport::new(40.0, 40.0, 1.0)).unwrap();
        raster.stroke_quadratic(
            Point::new(5.5, 5.5),
            Point::new(20.0, 40.0),
            Point::new(35.5, 5.5),
            WHITE,
            2.0,
        );
        assert!(raster.pixel(5, 5).a > 0.9);
        assert!(raster.pixel(35, 5).a > 0.9);
        assert_eq!(raster.pixel(20, 5).a, 0.0);
    }

    #[test]
    fn test_average_over_block() {
        let mut raster = Raster::new(Viewport::new(2.0, 2.0, 1.0)).unwrap();
        raster.blend(0, 0, WHITE, 1.0);
        let avg = raster.average(0.0, 0.0, 2.0, 2.0);
        assert!((avg[3] - 0.25).abs() < 1e-6);
        let single = raster.average(0.2, 0.2, 0.4, 0.4);
        assert_eq!(single[3], 1.0);
    }
}
