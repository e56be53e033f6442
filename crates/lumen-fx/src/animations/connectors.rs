//! Card connectors (time-driven, repeating).
//!
//! Three faint arched curves join the spots where the floating info cards
//! sit. Coordinates are percentages of the container and stretch with it on
//! both axes.

use lumen_core::{ColorStop, Glow, Point, Rgba, Surface, Viewport, sample_stops};

use crate::animation::{Animation, FRAME_MS};
use crate::easing::{EASE_IN_OUT, keyframes, looped};
use crate::path::{PathBuilder, Polyline};

/// Number of card connectors.
pub const CONNECTOR_COUNT: usize = 3;
/// Seconds per draw-in cycle.
pub const CYCLE_S: f32 = 3.2;

/// How far the control point rises above the chord, in percent.
const ARCH: f32 = 8.0;
/// Stroke width in percent units.
const STROKE_WIDTH: f32 = 0.5;
/// Glow blur in percent units.
const GLOW_BLUR: f32 = 0.6;
const OPACITY_KEYFRAMES: [f32; 3] = [0.4, 0.8, 0.4];

/// `(from, to, delay_s)` with endpoints in percent of the container.
const ANCHORS: [((f32, f32), (f32, f32), f32); CONNECTOR_COUNT] = [
    ((6.0, 18.0), (10.0, 82.0), 0.6),
    ((82.0, 28.0), (10.0, 82.0), 0.9),
    ((82.0, 28.0), (6.0, 18.0), 1.1),
];

fn connector_stops() -> [ColorStop; 3] {
    let cyan = Rgba::rgb8(0x00, 0xE5, 0xFF, 1.0);
    let violet = Rgba::rgb8(0x9E, 0x7B, 0xFF, 1.0);
    [
        ColorStop::new(0.0, cyan.with_alpha(0.0)),
        ColorStop::new(0.5, cyan.with_alpha(0.8)),
        ColorStop::new(1.0, violet.with_alpha(0.0)),
    ]
}

/// One arched connector in percent space.
#[derive(Debug, Clone)]
pub struct Connector {
    line: Polyline,
    delay_s: f32,
}

impl Connector {
    pub fn new(from: Point, to: Point, delay_s: f32) -> Self {
        let control = from.midpoint(to) - Point::new(0.0, ARCH);
        Self {
            line: PathBuilder::move_to(from).quad_to(control, to).build(),
            delay_s,
        }
    }

    pub fn points(&self) -> &[Point] {
        self.line.points()
    }

    pub fn delay_s(&self) -> f32 {
        self.delay_s
    }

    /// Drawn fraction and opacity `elapsed_s` after mount, `None` while the
    /// connector is still waiting for its delay.
    pub fn progress(&self, elapsed_s: f32) -> Option<(f32, f32)> {
        if elapsed_s < self.delay_s {
            return None;
        }
        let u = looped(elapsed_s - self.delay_s, CYCLE_S);
        Some((EASE_IN_OUT.ease(u), keyframes(&OPACITY_KEYFRAMES, u, &EASE_IN_OUT)))
    }
}

/// Connectors between the floating cards.
#[derive(Debug, Clone)]
pub struct CardConnectors {
    connectors: Vec<Connector>,
    viewport: Viewport,
    elapsed_s: f32,
}

impl CardConnectors {
    pub fn new(viewport: Viewport) -> Self {
        let connectors = ANCHORS
            .iter()
            .map(|&((x1, y1), (x2, y2), delay)| {
                Connector::new(Point::new(x1, y1), Point::new(x2, y2), delay)
            })
            .collect();
        Self {
            connectors,
            viewport,
            elapsed_s: 0.0,
        }
    }

    pub fn connectors(&self) -> &[Connector] {
        &self.connectors
    }
}

impl Animation for CardConnectors {
    fn name(&self) -> &'static str {
        "connectors"
    }

    fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    fn advance(&mut self, dt: f32) {
        self.elapsed_s += dt * (FRAME_MS / 1000.0) as f32;
    }

    fn render(&self, surface: &mut dyn Surface, _time_ms: f64) {
        surface.clear();
        if self.viewport.is_empty() {
            return;
        }
        // Percent space is stretched, not fitted.
        let scale = Point::new(self.viewport.width, self.viewport.height) / 100.0;
        let stroke_scale = (scale.x + scale.y) * 0.5;
        let stops = connector_stops();

        for connector in &self.connectors {
            let Some((fraction, opacity)) = connector.progress(self.elapsed_s) else {
                continue;
            };
            let drawn = connector.line.prefix(fraction);
            for pair in drawn.windows(2) {
                let t = connector.line.horizontal_offset(pair[0].midpoint(pair[1]));
                let color = sample_stops(&stops, t);
                let color = color.with_alpha(color.a * opacity);
                surface.set_glow(Some(Glow::new(color, GLOW_BLUR * stroke_scale)));
                surface.stroke_line(pair[0] * scale, pair[1] * scale, color, STROKE_WIDTH * stroke_scale);
            }
        }
        surface.set_glow(None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recording::{DrawCommand, RecordingSurface};

    fn advance_seconds(connectors: &mut CardConnectors, seconds: f32) {
        for _ in 0..(seconds * 60.0).round() as usize {
            connectors.advance(1.0);
        }
    }

    #[test]
    fn test_curves_arch_above_the_chord() {
        let c = Connector::new(Point::new(6.0, 18.0), Point::new(10.0, 82.0), 0.6);
        let points = c.points();
        assert_eq!(points[0], Point::new(6.0, 18.0));
        assert_eq!(*points.last().unwrap(), Point::new(10.0, 82.0));
        // Halfway along t the curve sits half the arch above the chord.
        let mid = points[points.len() / 2];
        assert!((mid.x - 8.0).abs() < 1e-4);
        assert!((mid.y - (50.0 - ARCH * 0.5)).abs() < 1e-4);
    }

    #[test]
    fn test_waits_for_delay_then_repeats() {
        let c = Connector::new(Point::new(82.0, 28.0), Point::new(6.0, 18.0), 1.1);
        assert_eq!(c.progress(0.0), None);
        assert_eq!(c.progress(1.0), None);

        let (fraction, opacity) = c.progress(1.1).unwrap();
        assert_eq!(fraction, 0.0);
        assert!((opacity - 0.4).abs() < 1e-6);

        let (fraction, opacity) = c.progress(1.1 + CYCLE_S * 0.5).unwrap();
        assert!((fraction - 0.5).abs() < 1e-3);
        assert!((opacity - 0.8).abs() < 1e-5);

        // Second cycle restarts the draw-in.
        let (fraction, _) = c.progress(1.1 + CYCLE_S + 0.01).unwrap();
        assert!(fraction < 0.01);
    }

    #[test]
    fn test_nothing_drawn_before_first_delay() {
        let vp = Viewport::new(1000.0, 500.0, 1.0);
        let mut connectors = CardConnectors::new(vp);
        assert_eq!(connectors.connectors().len(), CONNECTOR_COUNT);
        let mut surface = RecordingSurface::new(vp);
        connectors.step(&mut surface, 0.0, 1.0);
        assert_eq!(surface.commands(), &[DrawCommand::Clear]);

        advance_seconds(&mut connectors, 1.0);
        surface.reset();
        connectors.render(&mut surface, 0.0);
        let lines = surface.lines();
        assert!(!lines.is_empty(), "first connector has started");
        assert!(lines.iter().all(|l| l.color.a <= 0.8 * 0.8 + 1e-6));
    }

    #[test]
    fn test_percent_space_stretches_with_container() {
        let vp = Viewport::new(1000.0, 500.0, 1.0);
        let mut connectors = CardConnectors::new(vp);
        // All three are mid-cycle.
        advance_seconds(&mut connectors, 2.5);
        let mut surface = RecordingSurface::new(vp);
        connectors.render(&mut surface, 0.0);

        let first = surface.lines()[0];
        assert_eq!(first.from, Point::new(60.0, 90.0));
        assert!((first.width - 0.5 * 7.5).abs() < 1e-5);
        assert_eq!(first.glow.as_ref().map(|g| g.blur), Some(0.6 * 7.5));
    }

    #[test]
    fn test_gradient_fades_at_both_ends() {
        let vp = Viewport::new(800.0, 800.0, 1.0);
        let mut connectors = CardConnectors::new(vp);
        connectors.connectors.truncate(1);
        // Fully drawn: the end of the first cycle minus a frame.
        advance_seconds(&mut connectors, 0.6 + CYCLE_S - 0.05);
        let mut surface = RecordingSurface::new(vp);
        connectors.render(&mut surface, 0.0);

        let lines = surface.lines();
        let brightest = lines.iter().map(|l| l.color.a).fold(0.0, f32::max);
        assert!(lines[0].color.a < brightest);
        assert!(lines[lines.len() - 1].color.a < brightest);
    }
}
