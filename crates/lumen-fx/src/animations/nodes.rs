//! Pseudo-neural node graph (stateful).
//!
//! Nodes sit on a jittered grid and drift around their origin along a
//! Lissajous curve. Nearby nodes are joined by gently wiggling quadratic
//! curves.

use lumen_core::{ColorStop, Glow, Hsla, LinearGradient, Point, Rgba, Surface, Viewport};
use rand::{Rng, SeedableRng, rngs::StdRng};
use tracing::debug;

use crate::animation::Animation;
use crate::proximity::links_within;

/// Grid columns.
pub const GRID_COLS: usize = 24;
/// Grid rows.
pub const GRID_ROWS: usize = 12;
/// Connection distance in logical pixels.
pub const LINK_DISTANCE: f32 = 180.0;
/// Maximum drift from the origin along each axis.
pub const DRIFT_AMPLITUDE: f32 = 12.0;
/// Phase advance per frame.
pub const PHASE_STEP: f64 = 0.005;
/// Radius of every node dot.
pub const NODE_RADIUS: f32 = 2.2;

const JITTER: f32 = 20.0;
const PHASE_SEED_RANGE: f64 = 1000.0;
const HUE_BASE: f32 = 190.0;
const HUE_SPAN_X: f32 = 60.0;
const HUE_SPAN_Y: f32 = 20.0;
const CURVE_WIGGLE: f32 = 10.0;
const LINK_WIDTH: f32 = 1.25;
const GLOW_BLUR: f32 = 8.0;

/// State for a single node.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Fixed anchor the node drifts around.
    pub origin: Point,
    /// Displayed position, derived from `origin` and `phase`.
    pub position: Point,
    /// Monotonically increasing drift phase. Kept in f64 so that small
    /// steps still register after hours of animation.
    pub phase: f64,
    /// Hue in degrees.
    pub hue: f32,
}

impl Node {
    /// Offset from the origin for a given phase.
    pub fn drift(phase: f64) -> Point {
        Point::new(
            (phase * 1.3).sin() as f32 * DRIFT_AMPLITUDE,
            (phase * 1.1).cos() as f32 * DRIFT_AMPLITUDE,
        )
    }

    fn advance(&mut self, dt: f32) {
        self.phase += PHASE_STEP * f64::from(dt);
        self.position = self.origin + Node::drift(self.phase);
    }
}

/// Lay out the jittered grid for `viewport`.
fn layout(rng: &mut impl Rng, viewport: Viewport) -> Vec<Node> {
    let spacing_x = viewport.width / (GRID_COLS + 1) as f32;
    let spacing_y = viewport.height / (GRID_ROWS + 1) as f32;
    let mut nodes = Vec::with_capacity(GRID_COLS * GRID_ROWS);

    for row in 1..=GRID_ROWS {
        for col in 1..=GRID_COLS {
            let jitter_x = (rng.gen_range(0.0f32..1.0) - 0.5) * JITTER;
            let jitter_y = (rng.gen_range(0.0f32..1.0) - 0.5) * JITTER;
            let origin = Point::new(
                spacing_x * col as f32 + jitter_x,
                spacing_y * row as f32 + jitter_y,
            );
            nodes.push(Node {
                origin,
                position: origin,
                phase: rng.gen_range(0.0f64..1.0) * PHASE_SEED_RANGE,
                hue: HUE_BASE
                    + (col as f32 / GRID_COLS as f32) * HUE_SPAN_X
                    + (row as f32 / GRID_ROWS as f32) * HUE_SPAN_Y,
            });
        }
    }
    nodes
}

/// Grid-seeded nodes joined by curved proximity connectors.
#[derive(Debug)]
pub struct NodeGraph<R: Rng = StdRng> {
    nodes: Vec<Node>,
    viewport: Viewport,
    rng: R,
}

impl NodeGraph<StdRng> {
    /// Create a graph whose layouts are reproducible from `seed`.
    pub fn with_seed(viewport: Viewport, seed: u64) -> Self {
        Self::new(viewport, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> NodeGraph<R> {
    pub fn new(viewport: Viewport, rng: R) -> Self {
        let mut graph = Self {
            nodes: Vec::new(),
            viewport,
            rng,
        };
        graph.reinitialize();
        graph
    }

    /// Re-run the grid layout. Previous jitter and phases are discarded.
    pub fn reinitialize(&mut self) {
        self.nodes = layout(&mut self.rng, self.viewport);
        debug!(
            width = self.viewport.width,
            height = self.viewport.height,
            count = self.nodes.len(),
            "node graph laid out"
        );
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn paint_wash(&self, surface: &mut dyn Surface) {
        surface.fill_linear_gradient(&LinearGradient {
            from: Point::new(0.0, 0.0),
            to: Point::new(self.viewport.width, self.viewport.height),
            stops: vec![
                ColorStop::new(0.0, Rgba::rgb8(0, 229, 255, 0.05)),
                ColorStop::new(1.0, Rgba::rgb8(158, 123, 255, 0.05)),
            ],
        });
    }

    fn paint_links(&self, surface: &mut dyn Surface, time_ms: f64) {
        let positions: Vec<Point> = self.nodes.iter().map(|n| n.position).collect();
        surface.set_glow(None);
        for link in links_within(&positions, LINK_DISTANCE) {
            let (a, b) = (&self.nodes[link.a], &self.nodes[link.b]);
            let hue = (a.hue + b.hue) * 0.5;
            let color = Hsla::new(hue, 0.8, 0.6, link.alpha(LINK_DISTANCE));
            let control = a.position.midpoint(b.position) + wiggle(time_ms, link.a, link.b);
            surface.stroke_quadratic(a.position, control, b.position, color.into(), LINK_WIDTH);
        }
    }

    fn paint_nodes(&self, surface: &mut dyn Surface) {
        for n in &self.nodes {
            surface.set_glow(Some(Glow::new(Hsla::new(n.hue, 0.9, 0.65, 0.8).into(), GLOW_BLUR)));
            surface.fill_circle(n.position, NODE_RADIUS, Hsla::new(n.hue, 0.9, 0.65, 0.9).into());
        }
        surface.set_glow(None);
    }
}

/// Control point offset for the connector between nodes `i` and `j`.
fn wiggle(time_ms: f64, i: usize, j: usize) -> Point {
    Point::new(
        (time_ms * 0.0006 + i as f64).sin() as f32 * CURVE_WIGGLE,
        (time_ms * 0.0007 + j as f64).cos() as f32 * CURVE_WIGGLE,
    )
}

impl<R: Rng> Animation for NodeGraph<R> {
    fn name(&self) -> &'static str {
        "nodes"
    }

    fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.reinitialize();
    }

    fn advance(&mut self, dt: f32) {
        for n in &mut self.nodes {
            n.advance(dt);
        }
    }

    fn render(&self, surface: &mut dyn Surface, time_ms: f64) {
        surface.clear();
        if self.viewport.is_empty() {
            return;
        }
        self.paint_wash(surface);
        self.paint_links(surface, time_ms);
        self.paint_nodes(surface);
    }

    /// Nodes move before they are drawn.
    fn step(&mut self, surface: &mut dyn Surface, time_ms: f64, dt: f32) {
        self.advance(dt);
        self.render(surface, time_ms);
    }
}
