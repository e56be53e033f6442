//! The per-frame animation contract.

use lumen_core::{Surface, Viewport};

/// Nominal duration of one simulation step, in milliseconds (60 Hz).
pub const FRAME_MS: f64 = 1000.0 / 60.0;

/// A procedural animation split into simulation and drawing.
///
/// `advance` moves the simulation forward by `dt` nominal frames; `render`
/// paints the current state and never mutates it. Hosts normally call
/// [`Animation::step`], which orders the two the way the animation expects.
pub trait Animation {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// The container changed size; rebuild whatever depends on it.
    fn resize(&mut self, viewport: Viewport);

    /// Advance by `dt` frames of 1/60 s.
    fn advance(&mut self, dt: f32);

    /// Draw the current state. `time_ms` is the host's frame timestamp.
    fn render(&self, surface: &mut dyn Surface, time_ms: f64);

    /// Run one frame: draw, then advance.
    fn step(&mut self, surface: &mut dyn Surface, time_ms: f64, dt: f32) {
        self.render(surface, time_ms);
        self.advance(dt);
    }
}

impl<A: Animation + ?Sized> Animation for Box<A> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn resize(&mut self, viewport: Viewport) {
        (**self).resize(viewport)
    }

    fn advance(&mut self, dt: f32) {
        (**self).advance(dt)
    }

    fn render(&self, surface: &mut dyn Surface, time_ms: f64) {
        (**self).render(surface, time_ms)
    }

    fn step(&mut self, surface: &mut dyn Surface, time_ms: f64, dt: f32) {
        (**self).step(surface, time_ms, dt)
    }
}
