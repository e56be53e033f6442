//! Ambient particle field (stateful).
//!
//! A fixed batch of particles drifts across the viewport with toroidal
//! wrapping. Every frame paints a soft vignette, faint lines between nearby
//! particles and a glowing dot per particle.

use lumen_core::{ColorStop, Glow, Hsla, Point, RadialGradient, Rgba, Surface, Viewport};
use rand::{Rng, SeedableRng, rngs::StdRng};
use tracing::debug;

use crate::animation::Animation;
use crate::proximity::links_within;

/// Number of particles allocated per layout.
pub const PARTICLE_COUNT: usize = 220;
/// Connection distance in logical pixels.
pub const LINK_DISTANCE: f32 = 130.0;
/// Distance past each edge a particle travels before wrapping.
pub const WRAP_MARGIN: f32 = 10.0;

const MAX_SPEED: f32 = 0.2;
const MIN_RADIUS: f32 = 0.3;
const RADIUS_SPREAD: f32 = 1.5;
const HUE_MIN: f32 = 190.0;
const HUE_SPREAD: f32 = 80.0;
const GLOW_BLUR: f32 = 6.0;
const VIGNETTE_INNER: f32 = 100.0;

/// State for a single particle.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    /// Current position.
    pub position: Point,
    /// Displacement per frame.
    pub velocity: Point,
    /// Dot radius.
    pub radius: f32,
    /// Hue in degrees, within `190..270`.
    pub hue: f32,
}

impl Particle {
    fn random(rng: &mut impl Rng, viewport: Viewport) -> Self {
        let mut unit = || rng.gen_range(0.0f32..1.0);
        let position = Point::new(unit() * viewport.width, unit() * viewport.height);
        let velocity = Point::new((unit() - 0.5) * 2.0 * MAX_SPEED, (unit() - 0.5) * 2.0 * MAX_SPEED);
        let radius = unit() * RADIUS_SPREAD + MIN_RADIUS;
        let hue = HUE_MIN + unit() * HUE_SPREAD;
        Self {
            position,
            velocity,
            radius,
            hue,
        }
    }

    /// Move by `dt` frames of velocity, then wrap past the extended bounds.
    fn advance(&mut self, dt: f32, viewport: Viewport) {
        self.position += self.velocity * dt;
        self.position.x = wrap(self.position.x, viewport.width);
        self.position.y = wrap(self.position.y, viewport.height);
    }
}

/// Toroidal wrap on `[-WRAP_MARGIN, extent + WRAP_MARGIN]`.
fn wrap(v: f32, extent: f32) -> f32 {
    if v < -WRAP_MARGIN {
        extent + WRAP_MARGIN
    } else if v > extent + WRAP_MARGIN {
        -WRAP_MARGIN
    } else {
        v
    }
}

/// Drifting particles joined by proximity lines.
#[derive(Debug)]
pub struct ParticleField<R: Rng = StdRng> {
    particles: Vec<Particle>,
    viewport: Viewport,
    rng: R,
}

impl ParticleField<StdRng> {
    /// Create a field whose layouts are reproducible from `seed`.
    pub fn with_seed(viewport: Viewport, seed: u64) -> Self {
        Self::new(viewport, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> ParticleField<R> {
    /// Create a field laid out for `viewport`, drawing randomness from `rng`.
    pub fn new(viewport: Viewport, rng: R) -> Self {
        let mut field = Self {
            particles: Vec::with_capacity(PARTICLE_COUNT),
            viewport,
            rng,
        };
        field.reinitialize();
        field
    }

    /// Replace every particle with a fresh random batch.
    pub fn reinitialize(&mut self) {
        let viewport = self.viewport;
        let rng = &mut self.rng;
        self.particles = (0..PARTICLE_COUNT)
            .map(|_| Particle::random(&mut *rng, viewport))
            .collect();
        debug!(
            width = viewport.width,
            height = viewport.height,
            count = self.particles.len(),
            "particle field initialized"
        );
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn paint_vignette(&self, surface: &mut dyn Surface) {
        let vp = self.viewport;
        let outer = vp.width.max(vp.height) * 0.7;
        surface.fill_radial_gradient(&RadialGradient::circle(
            vp.center(),
            VIGNETTE_INNER,
            outer,
            vec![
                ColorStop::new(0.0, Rgba::TRANSPARENT),
                ColorStop::new(1.0, Rgba::new(0.0, 0.0, 0.0, 0.25)),
            ],
        ));
    }

    fn paint_links(&self, surface: &mut dyn Surface) {
        let positions: Vec<Point> = self.particles.iter().map(|p| p.position).collect();
        surface.set_glow(None);
        for link in links_within(&positions, LINK_DISTANCE) {
            let (p, q) = (&self.particles[link.a], &self.particles[link.b]);
            let hue = (p.hue + q.hue) * 0.5;
            let color = Hsla::new(hue, 0.9, 0.6, link.alpha(LINK_DISTANCE));
            surface.stroke_line(p.position, q.position, color.into(), 1.0);
        }
    }

    fn paint_particles(&self, surface: &mut dyn Surface) {
        for p in &self.particles {
            surface.set_glow(Some(Glow::new(Hsla::new(p.hue, 0.9, 0.7, 0.6).into(), GLOW_BLUR)));
            surface.fill_circle(p.position, p.radius, Hsla::new(p.hue, 0.9, 0.7, 0.9).into());
        }
        surface.set_glow(None);
    }
}

impl<R: Rng> Animation for ParticleField<R> {
    fn name(&self) -> &'static str {
        "particles"
    }

    fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.reinitialize();
    }

    fn advance(&mut self, dt: f32) {
        let viewport = self.viewport;
        for p in &mut self.particles {
            p.advance(dt, viewport);
        }
    }

    fn render(&self, surface: &mut dyn Surface, _time_ms: f64) {
        surface.clear();
        if self.viewport.is_empty() {
            return;
        }
        self.paint_vignette(surface);
        self.paint_links(surface);
        self.paint_particles(surface);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proximity::CONNECTOR_PEAK_ALPHA;
    use crate::recording::{DrawCommand, RecordingSurface};

    fn field(width: f32, height: f32) -> ParticleField {
        ParticleField::with_seed(Viewport::new(width, height, 1.0), 7)
    }

    fn place(field: &mut ParticleField, positions: &[(f32, f32)]) {
        field.particles = positions
            .iter()
            .map(|&(x, y)| Particle {
                position: Point::new(x, y),
                velocity: Point::default(),
                radius: 1.0,
                hue: 200.0,
            })
            .collect();
    }

    #[test]
    fn test_initial_batch_is_within_bounds() {
        let field = field(1920.0, 1080.0);
        assert_eq!(field.particles().len(), PARTICLE_COUNT);
        for p in field.particles() {
            assert!(field.viewport().contains(p.position));
            assert!(p.velocity.x.abs() <= MAX_SPEED && p.velocity.y.abs() <= MAX_SPEED);
            assert!((0.3..1.8).contains(&p.radius));
            assert!((190.0..270.0).contains(&p.hue));
        }
    }

    #[test]
    fn test_same_seed_same_layout() {
        let a = field(1280.0, 720.0);
        let b = field(1280.0, 720.0);
        assert_eq!(a.particles(), b.particles());

        let c = ParticleField::with_seed(Viewport::new(1280.0, 720.0, 1.0), 8);
        assert_ne!(a.particles(), c.particles());
    }

    #[test]
    fn test_resize_keeps_count_and_bounds() {
        let mut field = field(1920.0, 1080.0);
        field.resize(Viewport::new(800.0, 450.0, 2.0));
        assert_eq!(field.particles().len(), PARTICLE_COUNT);
        for p in field.particles() {
            assert!(p.position.x >= 0.0 && p.position.x <= 800.0);
            assert!(p.position.y >= 0.0 && p.position.y <= 450.0);
        }
        for _ in 0..5 {
            field.resize(Viewport::new(300.0, 200.0, 1.0));
            assert_eq!(field.particles().len(), PARTICLE_COUNT);
        }
    }

    #[test]
    fn test_wraps_to_opposite_edge() {
        let mut field = field(800.0, 450.0);
        place(&mut field, &[(-10.5, 100.0), (810.5, 100.0), (100.0, -10.5), (100.0, 460.5)]);
        field.advance(1.0);
        let p = field.particles();
        assert_eq!(p[0].position.x, 810.0);
        assert_eq!(p[1].position.x, -10.0);
        assert_eq!(p[2].position.y, 460.0);
        assert_eq!(p[3].position.y, -10.0);
    }

    #[test]
    fn test_wrap_happens_after_moving() {
        let mut field = field(800.0, 450.0);
        place(&mut field, &[(-9.95, 10.0)]);
        field.particles[0].velocity = Point::new(-0.1, 0.0);
        field.advance(1.0);
        assert_eq!(field.particles()[0].position.x, 810.0);

        place(&mut field, &[(-9.95, 10.0)]);
        field.advance(1.0);
        assert_eq!(field.particles()[0].position.x, -9.95);
    }

    #[test]
    fn test_links_drawn_only_below_threshold() {
        let mut field = field(800.0, 450.0);
        place(&mut field, &[(100.0, 100.0), (230.0, 100.0), (100.0, 229.0)]);
        let mut surface = RecordingSurface::new(field.viewport());
        field.render(&mut surface, 0.0);

        let lines = surface.lines();
        assert_eq!(lines.len(), 1, "only the 129px pair connects");
        let expected = CONNECTOR_PEAK_ALPHA * (1.0 - 129.0 / LINK_DISTANCE);
        assert!((lines[0].color.a - expected).abs() < 1e-6);
        assert_eq!(surface.circles().len(), 3);
    }

    #[test]
    fn test_link_hue_is_pair_average() {
        let mut field = field(800.0, 450.0);
        place(&mut field, &[(10.0, 10.0), (20.0, 10.0)]);
        field.particles[0].hue = 200.0;
        field.particles[1].hue = 260.0;
        let mut surface = RecordingSurface::new(field.viewport());
        field.render(&mut surface, 0.0);

        let alpha = CONNECTOR_PEAK_ALPHA * (1.0 - 10.0 / LINK_DISTANCE);
        let expected: Rgba = Hsla::new(230.0, 0.9, 0.6, alpha).into();
        assert_eq!(surface.lines()[0].color, expected);
    }

    #[test]
    fn test_frame_order_clear_vignette_links_dots() {
        let mut field = field(400.0, 300.0);
        place(&mut field, &[(10.0, 10.0), (20.0, 10.0)]);
        let mut surface = RecordingSurface::new(field.viewport());
        field.step(&mut surface, 0.0, 1.0);

        let kinds: Vec<&str> = surface.commands().iter().map(DrawCommand::kind).collect();
        let first_circle = kinds.iter().position(|k| *k == "circle").unwrap();
        let last_line = kinds.iter().rposition(|k| *k == "line").unwrap();
        assert_eq!(kinds[0], "clear");
        assert_eq!(kinds[1], "radial-gradient");
        assert!(last_line < first_circle);
    }

    #[test]
    fn test_vignette_darkens_toward_the_edges() {
        let field = field(1000.0, 400.0);
        let mut surface = RecordingSurface::new(field.viewport());
        field.render(&mut surface, 0.0);

        let DrawCommand::RadialGradient(vignette) = &surface.commands()[1] else {
            panic!("expected the vignette right after clear");
        };
        assert_eq!(vignette.center, Point::new(500.0, 200.0));
        assert_eq!(vignette.inner_radius, 100.0);
        assert!((vignette.radius_x - 700.0).abs() < 1e-3);
        assert_eq!(vignette.radius_y, vignette.radius_x);
        assert_eq!(
            vignette.stops,
            vec![
                ColorStop::new(0.0, Rgba::TRANSPARENT),
                ColorStop::new(1.0, Rgba::new(0.0, 0.0, 0.0, 0.25)),
            ]
        );
    }

    #[test]
    fn test_dots_glow_and_links_do_not() {
        let mut field = field(400.0, 300.0);
        place(&mut field, &[(10.0, 10.0), (20.0, 10.0)]);
        let mut surface = RecordingSurface::new(field.viewport());
        field.render(&mut surface, 0.0);

        assert!(surface.lines().iter().all(|l| l.glow.is_none()));
        assert_eq!(surface.lines()[0].width, 1.0);
        for dot in surface.circles() {
            assert_eq!(dot.radius, 1.0);
            assert_eq!(dot.color, Hsla::new(200.0, 0.9, 0.7, 0.9).to_rgba());
            assert_eq!(
                dot.glow,
                Some(Glow::new(Hsla::new(200.0, 0.9, 0.7, 0.6).to_rgba(), 6.0))
            );
        }
    }

    #[test]
    fn test_zero_area_skips_drawing() {
        let field = field(0.0, 0.0);
        assert_eq!(field.particles().len(), PARTICLE_COUNT);
        let mut surface = RecordingSurface::new(field.viewport());
        field.render(&mut surface, 0.0);
        assert_eq!(surface.commands(), &[DrawCommand::Clear]);
    }

    #[test]
    fn test_positions_stay_finite() {
        let mut field = field(640.0, 480.0);
        for _ in 0..2000 {
            field.advance(1.0);
        }
        assert!(field.particles().iter().all(|p| p.position.is_finite()));
        assert!(field.particles().iter().all(|p| {
            p.position.x >= -WRAP_MARGIN - MAX_SPEED
                && p.position.x <= 640.0 + WRAP_MARGIN + MAX_SPEED
        }));
    }
}
