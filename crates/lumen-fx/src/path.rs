//! Flattened Bézier paths measured by arc length.
//!
//! The time-driven layers draw their curves in progressively, so every path
//! is flattened once into a [`Polyline`] that knows the cumulative length at
//! each vertex and its bounding box for gradient lookups.

use lumen_core::Point;

/// Samples taken per curve segment when flattening.
pub const SAMPLES_PER_SEGMENT: usize = 32;

/// Point on the quadratic Bézier `from -> control -> to` at `t`.
pub fn quadratic_point(from: Point, control: Point, to: Point, t: f32) -> Point {
    let mt = 1.0 - t;
    mt * mt * from + 2.0 * mt * t * control + t * t * to
}

/// Point on the cubic Bézier `p0 -> p1 -> p2 -> p3` at `t`.
pub fn cubic_point(p0: Point, p1: Point, p2: Point, p3: Point, t: f32) -> Point {
    let mt = 1.0 - t;
    mt * mt * mt * p0 + 3.0 * mt * mt * t * p1 + 3.0 * mt * t * t * p2 + t * t * t * p3
}

/// Incremental builder in the spirit of SVG path data: one `move_to`
/// followed by curve segments.
#[derive(Debug, Clone)]
pub struct PathBuilder {
    points: Vec<Point>,
}

impl PathBuilder {
    pub fn move_to(start: Point) -> Self {
        Self {
            points: vec![start],
        }
    }

    fn cursor(&self) -> Point {
        self.points.last().copied().unwrap_or_default()
    }

    pub fn quad_to(mut self, control: Point, to: Point) -> Self {
        let from = self.cursor();
        for s in 1..=SAMPLES_PER_SEGMENT {
            let t = s as f32 / SAMPLES_PER_SEGMENT as f32;
            self.points.push(quadratic_point(from, control, to, t));
        }
        self
    }

    pub fn cubic_to(mut self, c1: Point, c2: Point, to: Point) -> Self {
        let from = self.cursor();
        for s in 1..=SAMPLES_PER_SEGMENT {
            let t = s as f32 / SAMPLES_PER_SEGMENT as f32;
            self.points.push(cubic_point(from, c1, c2, to, t));
        }
        self
    }

    pub fn build(self) -> Polyline {
        Polyline::new(self.points)
    }
}

/// A flattened path with cumulative arc lengths.
#[derive(Debug, Clone, PartialEq)]
pub struct Polyline {
    points: Vec<Point>,
    /// Cumulative arc length at each point.
    lengths: Vec<f32>,
    min: Point,
    max: Point,
}

impl Polyline {
    pub fn new(points: Vec<Point>) -> Self {
        let mut lengths = Vec::with_capacity(points.len());
        let mut total = 0.0;
        if !points.is_empty() {
            lengths.push(0.0);
        }
        for pair in points.windows(2) {
            total += pair[0].distance(pair[1]);
            lengths.push(total);
        }
        let min = points.iter().fold(Point::splat(f32::MAX), |m, p| m.min(*p));
        let max = points.iter().fold(Point::splat(f32::MIN), |m, p| m.max(*p));
        Self {
            points,
            lengths,
            min,
            max,
        }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Total arc length.
    pub fn length(&self) -> f32 {
        self.lengths.last().copied().unwrap_or(0.0)
    }

    /// Bounding box as `(min, max)`.
    pub fn bounds(&self) -> (Point, Point) {
        (self.min, self.max)
    }

    /// The leading part of the path covering `fraction` of its arc length.
    pub fn prefix(&self, fraction: f32) -> Vec<Point> {
        let target = self.length() * fraction.clamp(0.0, 1.0);
        if target <= 0.0 {
            return Vec::new();
        }
        let mut out = vec![self.points[0]];
        for i in 1..self.points.len() {
            if self.lengths[i] <= target {
                out.push(self.points[i]);
                continue;
            }
            let span = self.lengths[i] - self.lengths[i - 1];
            let t = if span > 0.0 {
                (target - self.lengths[i - 1]) / span
            } else {
                0.0
            };
            out.push(self.points[i - 1].lerp(self.points[i], t));
            break;
        }
        out
    }

    /// Position of `p` along the bounding-box diagonal, `0..=1` inside it.
    pub fn diagonal_offset(&self, p: Point) -> f32 {
        let diagonal = self.max - self.min;
        let len2 = diagonal.length_squared();
        if len2 <= 0.0 {
            return 0.0;
        }
        (p - self.min).dot(diagonal) / len2
    }

    /// Position of `p` across the bounding box from left to right.
    pub fn horizontal_offset(&self, p: Point) -> f32 {
        let width = self.max.x - self.min.x;
        if width <= 0.0 {
            return 0.0;
        }
        (p.x - self.min.x) / width
    }
}
