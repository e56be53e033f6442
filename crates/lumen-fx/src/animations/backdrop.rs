//! Page gradient and animated aurora blobs behind the hero.

use lumen_core::{ColorStop, Point, RadialGradient, Rgba, Surface, Viewport};

use crate::animation::Animation;
use crate::animations::energy::DESIGN_WIDTH;
use crate::easing::{EASE_IN_OUT, mirrored};

/// Seconds for one pass through the aurora keyframes.
pub const AURORA_CYCLE_S: f32 = 12.0;

/// Offset at which each blob has faded out.
const BLOB_FADE: f32 = 0.6;

/// Darkest tone of the page, used as the compositing base.
pub fn page_base_color() -> Rgba {
    Rgba::rgb8(0x04, 0x07, 0x0c, 1.0)
}

/// Static radial page gradient, brightest at the top center.
#[derive(Debug, Clone)]
pub struct PageGradient {
    viewport: Viewport,
}

impl PageGradient {
    pub fn new(viewport: Viewport) -> Self {
        Self { viewport }
    }

    pub fn gradient(&self) -> RadialGradient {
        let vp = self.viewport;
        RadialGradient::ellipse(
            Point::new(vp.width * 0.5, 0.0),
            vp.width * 0.75,
            vp.height,
            vec![
                ColorStop::new(0.0, Rgba::rgb8(0x0b, 0x1b, 0x2a, 1.0)),
                ColorStop::new(0.35, Rgba::rgb8(0x06, 0x0b, 0x12, 1.0)),
                ColorStop::new(1.0, page_base_color()),
            ],
        )
    }
}

impl Animation for PageGradient {
    fn name(&self) -> &'static str {
        "page"
    }

    fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    fn advance(&mut self, _dt: f32) {}

    fn render(&self, surface: &mut dyn Surface, _time_ms: f64) {
        surface.clear();
        if self.viewport.is_empty() {
            return;
        }
        surface.fill_radial_gradient(&self.gradient());
    }
}

/// One soft elliptical color blob.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Blob {
    /// Center as a fraction of the viewport.
    pub center: Point,
    /// Radii in design pixels.
    pub radius: Point,
    pub color: Rgba,
}

impl Blob {
    const fn new(cx: f32, cy: f32, rx: f32, ry: f32, color: Rgba) -> Self {
        Self {
            center: Point::new(cx, cy),
            radius: Point::new(rx, ry),
            color,
        }
    }

    fn lerp(&self, other: &Blob, t: f32) -> Blob {
        let mix = |a: f32, b: f32| a + (b - a) * t;
        Blob {
            center: self.center.lerp(other.center, t),
            radius: self.radius.lerp(other.radius, t),
            color: Rgba::new(
                mix(self.color.r, other.color.r),
                mix(self.color.g, other.color.g),
                mix(self.color.b, other.color.b),
                mix(self.color.a, other.color.a),
            ),
        }
    }
}

const fn rgba8(r: u8, g: u8, b: u8, a: f32) -> Rgba {
    Rgba::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, a)
}

const AURORA_KEYFRAMES: [[Blob; 3]; 3] = [
    [
        Blob::new(0.20, 0.20, 1200.0, 800.0, rgba8(28, 140, 255, 0.18)),
        Blob::new(0.80, 0.60, 900.0, 900.0, rgba8(170, 120, 255, 0.14)),
        Blob::new(0.50, 0.90, 700.0, 500.0, rgba8(255, 160, 120, 0.08)),
    ],
    [
        Blob::new(0.30, 0.25, 1200.0, 800.0, rgba8(28, 190, 255, 0.18)),
        Blob::new(0.70, 0.55, 900.0, 900.0, rgba8(140, 100, 255, 0.16)),
        Blob::new(0.45, 0.85, 700.0, 500.0, rgba8(255, 180, 140, 0.10)),
    ],
    [
        Blob::new(0.25, 0.30, 1200.0, 800.0, rgba8(28, 160, 255, 0.18)),
        Blob::new(0.75, 0.65, 900.0, 900.0, rgba8(160, 120, 255, 0.16)),
        Blob::new(0.55, 0.80, 700.0, 500.0, rgba8(255, 170, 120, 0.10)),
    ],
];

/// Three drifting color blobs, mirrored back and forth through keyframes.
#[derive(Debug, Clone)]
pub struct AuroraBlobs {
    viewport: Viewport,
}

impl AuroraBlobs {
    pub fn new(viewport: Viewport) -> Self {
        Self { viewport }
    }

    /// Interpolated blobs at `time_ms`.
    pub fn blobs_at(time_ms: f64) -> [Blob; 3] {
        let progress = mirrored((time_ms / 1000.0) as f32, AURORA_CYCLE_S);
        let segments = (AURORA_KEYFRAMES.len() - 1) as f32;
        let pos = progress * segments;
        let index = (pos.floor() as usize).min(AURORA_KEYFRAMES.len() - 2);
        let local = EASE_IN_OUT.ease(pos - index as f32);

        let (from, to) = (&AURORA_KEYFRAMES[index], &AURORA_KEYFRAMES[index + 1]);
        [
            from[0].lerp(&to[0], local),
            from[1].lerp(&to[1], local),
            from[2].lerp(&to[2], local),
        ]
    }
}

impl Animation for AuroraBlobs {
    fn name(&self) -> &'static str {
        "aurora"
    }

    fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    fn advance(&mut self, _dt: f32) {}

    fn render(&self, surface: &mut dyn Surface, time_ms: f64) {
        surface.clear();
        let vp = self.viewport;
        if vp.is_empty() {
            return;
        }
        let scale = vp.width / DESIGN_WIDTH;
        for blob in Self::blobs_at(time_ms) {
            surface.fill_radial_gradient(&RadialGradient::ellipse(
                blob.center * Point::new(vp.width, vp.height),
                blob.radius.x * scale,
                blob.radius.y * scale,
                vec![
                    ColorStop::new(0.0, blob.color),
                    ColorStop::new(BLOB_FADE, Rgba::TRANSPARENT),
                ],
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recording::{DrawCommand, RecordingSurface};

    #[test]
    fn test_keyframes_at_cycle_points() {
        assert_eq!(AuroraBlobs::blobs_at(0.0), AURORA_KEYFRAMES[0]);
        let middle = AuroraBlobs::blobs_at(6000.0);
        assert!((middle[0].center.x - 0.30).abs() < 1e-5);
        let end = AuroraBlobs::blobs_at(12_000.0);
        assert!((end[1].center.y - 0.65).abs() < 1e-5);
    }

    #[test]
    fn test_cycle_mirrors_back() {
        let forward = AuroraBlobs::blobs_at(3000.0);
        let backward = AuroraBlobs::blobs_at(21_000.0);
        for (a, b) in forward.iter().zip(backward.iter()) {
            assert!((a.center.x - b.center.x).abs() < 1e-4);
            assert!((a.color.a - b.color.a).abs() < 1e-4);
        }
        assert_eq!(AuroraBlobs::blobs_at(24_000.0), AURORA_KEYFRAMES[0]);
    }

    #[test]
    fn test_render_paints_three_blobs_scaled() {
        let vp = Viewport::new(960.0, 540.0, 1.0);
        let aurora = AuroraBlobs::new(vp);
        let mut surface = RecordingSurface::new(vp);
        aurora.render(&mut surface, 0.0);

        let gradients: Vec<_> = surface
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::RadialGradient(g) => Some(g),
                _ => None,
            })
            .collect();
        assert_eq!(gradients.len(), 3);
        assert_eq!(gradients[0].center, Point::new(192.0, 108.0));
        assert_eq!(gradients[0].radius_x, 600.0);
        assert_eq!(gradients[0].stops[1].color, Rgba::TRANSPARENT);
    }

    #[test]
    fn test_page_gradient_anchored_top_center() {
        let page = PageGradient::new(Viewport::new(1000.0, 500.0, 1.0));
        let g = page.gradient();
        assert_eq!(g.center, Point::new(500.0, 0.0));
        assert_eq!((g.radius_x, g.radius_y), (750.0, 500.0));
        assert_eq!(g.stops.last().unwrap().color, page_base_color());
    }
}
