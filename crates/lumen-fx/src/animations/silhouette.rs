//! Silhouette overlay (time-driven, plays once).
//!
//! Eight outline strokes sketch a row of four figures along the bottom edge
//! of the hero. Every stroke draws itself in once, each a little slower than
//! the one before, while the whole group fades up after a short delay.

use lumen_core::{ColorStop, Glow, Point, Rgba, Surface, Viewport, sample_stops};

use crate::animation::{Animation, FRAME_MS};
use crate::easing::{EASE_IN_OUT, EASE_OUT, keyframes};
use crate::path::{PathBuilder, Polyline};

/// Width of the authoring box.
pub const VIEW_WIDTH: f32 = 1400.0;
/// Height of the authoring box.
pub const VIEW_HEIGHT: f32 = 450.0;
/// Share of the container width the overlay may take.
pub const WIDTH_FRACTION: f32 = 0.9;

const GROUP_DELAY_S: f32 = 0.6;
const GROUP_FADE_S: f32 = 1.2;
const BASE_DURATION_S: f32 = 2.0;
const DURATION_STEP_S: f32 = 0.6;
const STROKE_WIDTH: f32 = 2.0;
const GLOW_BLUR: f32 = 2.0;
const OPACITY_KEYFRAMES: [f32; 3] = [0.2, 0.8, 0.6];

/// Start, then two cubic segments: `(c1, c2, end)` twice.
type Outline = [(f32, f32); 7];

/// Shoulders and head for each of the four figures.
const OUTLINES: [Outline; 8] = [
    [(100.0, 420.0), (130.0, 360.0), (160.0, 330.0), (210.0, 330.0), (260.0, 330.0), (290.0, 360.0), (320.0, 420.0)],
    [(210.0, 330.0), (210.0, 300.0), (230.0, 270.0), (260.0, 270.0), (290.0, 270.0), (310.0, 300.0), (310.0, 330.0)],
    [(380.0, 420.0), (410.0, 360.0), (460.0, 340.0), (520.0, 345.0), (580.0, 350.0), (620.0, 380.0), (650.0, 420.0)],
    [(520.0, 345.0), (520.0, 305.0), (545.0, 270.0), (585.0, 270.0), (625.0, 270.0), (645.0, 305.0), (645.0, 345.0)],
    [(740.0, 420.0), (770.0, 360.0), (820.0, 340.0), (880.0, 345.0), (940.0, 350.0), (980.0, 380.0), (1010.0, 420.0)],
    [(880.0, 345.0), (880.0, 305.0), (905.0, 270.0), (945.0, 270.0), (985.0, 270.0), (1005.0, 305.0), (1005.0, 345.0)],
    [(1080.0, 420.0), (1110.0, 360.0), (1140.0, 330.0), (1190.0, 330.0), (1240.0, 330.0), (1270.0, 360.0), (1300.0, 420.0)],
    [(1190.0, 330.0), (1190.0, 300.0), (1210.0, 270.0), (1240.0, 270.0), (1270.0, 270.0), (1290.0, 300.0), (1290.0, 330.0)],
];

fn silhouette_stops() -> [ColorStop; 3] {
    [
        ColorStop::new(0.0, Rgba::rgb8(0x00, 0xE5, 0xFF, 1.0)),
        ColorStop::new(0.5, Rgba::rgb8(0x9E, 0x7B, 0xFF, 1.0)),
        ColorStop::new(1.0, Rgba::rgb8(0xFF, 0xB0, 0x88, 1.0)),
    ]
}

/// One outline stroke in authoring coordinates.
#[derive(Debug, Clone)]
pub struct SilhouetteStroke {
    line: Polyline,
    duration_s: f32,
}

impl SilhouetteStroke {
    pub fn new(index: usize) -> Self {
        let p = OUTLINES[index % OUTLINES.len()].map(|(x, y)| Point::new(x, y));
        let line = PathBuilder::move_to(p[0])
            .cubic_to(p[1], p[2], p[3])
            .cubic_to(p[4], p[5], p[6])
            .build();
        Self {
            line,
            duration_s: BASE_DURATION_S + DURATION_STEP_S * index as f32,
        }
    }

    pub fn points(&self) -> &[Point] {
        self.line.points()
    }

    /// Seconds until the stroke is fully drawn.
    pub fn duration_s(&self) -> f32 {
        self.duration_s
    }

    /// Drawn fraction and opacity `elapsed_s` after mount. Holds the final
    /// state once the duration has passed.
    pub fn progress(&self, elapsed_s: f32) -> (f32, f32) {
        let u = (elapsed_s / self.duration_s).clamp(0.0, 1.0);
        (EASE_IN_OUT.ease(u), keyframes(&OPACITY_KEYFRAMES, u, &EASE_IN_OUT))
    }
}

/// Opacity of the whole overlay `elapsed_s` after mount.
pub fn group_opacity(elapsed_s: f32) -> f32 {
    EASE_OUT.ease(((elapsed_s - GROUP_DELAY_S) / GROUP_FADE_S).clamp(0.0, 1.0))
}

/// Placement of the authoring box: bottom-centered, `WIDTH_FRACTION` of the
/// container width but never wider than the box itself.
pub fn placement(viewport: Viewport) -> (f32, Point) {
    let width = (viewport.width * WIDTH_FRACTION).min(VIEW_WIDTH);
    let scale = width / VIEW_WIDTH;
    let offset = Point::new(
        (viewport.width - width) * 0.5,
        viewport.height - VIEW_HEIGHT * scale,
    );
    (scale, offset)
}

/// Outlines of a small audience along the bottom of the hero.
#[derive(Debug, Clone)]
pub struct SilhouetteOverlay {
    strokes: Vec<SilhouetteStroke>,
    viewport: Viewport,
    elapsed_s: f32,
}

impl SilhouetteOverlay {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            strokes: (0..OUTLINES.len()).map(SilhouetteStroke::new).collect(),
            viewport,
            elapsed_s: 0.0,
        }
    }

    pub fn strokes(&self) -> &[SilhouetteStroke] {
        &self.strokes
    }

    /// Seconds of animation played since mount.
    pub fn elapsed_s(&self) -> f32 {
        self.elapsed_s
    }

    /// True once every stroke is fully drawn and the group is opaque.
    pub fn is_settled(&self) -> bool {
        let longest = self.strokes.iter().map(|s| s.duration_s).fold(0.0, f32::max);
        self.elapsed_s >= longest.max(GROUP_DELAY_S + GROUP_FADE_S)
    }
}

impl Animation for SilhouetteOverlay {
    fn name(&self) -> &'static str {
        "silhouette"
    }

    /// Placement follows the container; playback is not restarted.
    fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    fn advance(&mut self, dt: f32) {
        self.elapsed_s += dt * (FRAME_MS / 1000.0) as f32;
    }

    fn render(&self, surface: &mut dyn Surface, _time_ms: f64) {
        surface.clear();
        let group = group_opacity(self.elapsed_s);
        if self.viewport.is_empty() || group <= 0.0 {
            return;
        }
        let (scale, offset) = placement(self.viewport);
        let to_view = |p: Point| p * scale + offset;
        let stops = silhouette_stops();

        for stroke in &self.strokes {
            let (fraction, opacity) = stroke.progress(self.elapsed_s);
            let drawn = stroke.line.prefix(fraction);
            for pair in drawn.windows(2) {
                let t = stroke.line.horizontal_offset(pair[0].midpoint(pair[1]));
                let color = sample_stops(&stops, t);
                let color = color.with_alpha(color.a * opacity * group);
                surface.set_glow(Some(Glow::new(color, GLOW_BLUR * scale)));
                surface.stroke_line(to_view(pair[0]), to_view(pair[1]), color, STROKE_WIDTH * scale);
            }
        }
        surface.set_glow(None);
    }
}
