//! Energy lines (time-driven).
//!
//! Six long cubic curves sweep across the scene. Each one repeatedly draws
//! itself in from the left edge while its opacity pulses.

use lumen_core::{ColorStop, Glow, Point, Rgba, Surface, Viewport, sample_stops};

use crate::animation::Animation;
use crate::easing::{EASE_IN_OUT, keyframes, looped};
use crate::path::{PathBuilder, Polyline};

/// Width of the design space the paths are authored in.
pub const DESIGN_WIDTH: f32 = 1920.0;
/// Height of the design space the paths are authored in.
pub const DESIGN_HEIGHT: f32 = 1080.0;
/// Number of energy paths.
pub const PATH_COUNT: usize = 6;

const STROKE_WIDTH: f32 = 2.0;
const GLOW_BLUR: f32 = 4.0;
const OPACITY_KEYFRAMES: [f32; 3] = [0.3, 0.7, 0.3];

fn energy_stops() -> [ColorStop; 4] {
    let cyan = Rgba::rgb8(0x00, 0xE5, 0xFF, 1.0);
    let violet = Rgba::rgb8(0x9E, 0x7B, 0xFF, 1.0);
    let peach = Rgba::rgb8(0xFF, 0xB0, 0x88, 1.0);
    [
        ColorStop::new(0.0, cyan.with_alpha(0.0)),
        ColorStop::new(0.3, cyan.with_alpha(0.6)),
        ColorStop::new(0.7, violet.with_alpha(0.6)),
        ColorStop::new(1.0, peach.with_alpha(0.0)),
    ]
}

/// One flattened energy path in design space.
#[derive(Debug, Clone)]
pub struct EnergyPath {
    line: Polyline,
    period_s: f32,
}

impl EnergyPath {
    /// Build path `index`: a cubic from the left edge followed by a smooth
    /// cubic that settles back on the starting height at the right edge.
    pub fn new(index: usize) -> Self {
        let y = 150.0 + 140.0 * index as f32;
        let v = if index % 2 == 0 { 120.0 } else { -120.0 };

        let c2 = Point::new(960.0, y - v);
        let mid = Point::new(1440.0, y + v);
        let end = Point::new(DESIGN_WIDTH, y);
        // Smooth segment: first control mirrors c2 about the joint.
        let line = PathBuilder::move_to(Point::new(0.0, y))
            .cubic_to(Point::new(480.0, y + v), c2, mid)
            .cubic_to(2.0 * mid - c2, end, end)
            .build();

        Self {
            line,
            period_s: 8.0 + 2.0 * index as f32,
        }
    }

    pub fn points(&self) -> &[Point] {
        self.line.points()
    }

    /// Total arc length in design units.
    pub fn length(&self) -> f32 {
        self.line.length()
    }

    /// Seconds per draw-in cycle.
    pub fn period_s(&self) -> f32 {
        self.period_s
    }

    /// Drawn fraction of the path and its opacity at `time_s`.
    pub fn progress(&self, time_s: f32) -> (f32, f32) {
        let u = looped(time_s, self.period_s);
        (EASE_IN_OUT.ease(u), keyframes(&OPACITY_KEYFRAMES, u, &EASE_IN_OUT))
    }

    /// The leading part of the path covering `fraction` of its arc length.
    pub fn prefix(&self, fraction: f32) -> Vec<Point> {
        self.line.prefix(fraction)
    }
}

/// Uniform "meet" fit of the design space into a viewport: scale and offset.
pub fn fit(viewport: Viewport) -> (f32, Point) {
    let scale = (viewport.width / DESIGN_WIDTH).min(viewport.height / DESIGN_HEIGHT);
    let offset = Point::new(
        (viewport.width - DESIGN_WIDTH * scale) * 0.5,
        (viewport.height - DESIGN_HEIGHT * scale) * 0.5,
    );
    (scale, offset)
}

/// The six animated energy curves.
#[derive(Debug, Clone)]
pub struct EnergyLines {
    paths: Vec<EnergyPath>,
    viewport: Viewport,
}

impl EnergyLines {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            paths: (0..PATH_COUNT).map(EnergyPath::new).collect(),
            viewport,
        }
    }

    pub fn paths(&self) -> &[EnergyPath] {
        &self.paths
    }
}

impl Animation for EnergyLines {
    fn name(&self) -> &'static str {
        "energy"
    }

    fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    fn advance(&mut self, _dt: f32) {}

    fn render(&self, surface: &mut dyn Surface, time_ms: f64) {
        surface.clear();
        if self.viewport.is_empty() {
            return;
        }
        let (scale, offset) = fit(self.viewport);
        let to_view = |p: Point| p * scale + offset;
        let stops = energy_stops();
        let time_s = (time_ms / 1000.0) as f32;

        for path in &self.paths {
            let (fraction, opacity) = path.progress(time_s);
            let drawn = path.prefix(fraction);
            for pair in drawn.windows(2) {
                let t = path.line.diagonal_offset(pair[0].midpoint(pair[1]));
                let color = sample_stops(&stops, t);
                let color = color.with_alpha(color.a * opacity);
                surface.set_glow(Some(Glow::new(color, GLOW_BLUR * scale)));
                surface.stroke_line(to_view(pair[0]), to_view(pair[1]), color, STROKE_WIDTH * scale);
            }
        }
        surface.set_glow(None);
    }
}
