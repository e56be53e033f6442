//! A surface that records draw calls instead of rasterizing them.
//!
//! Used as the headless target in tests: assertions inspect exactly which
//! lines, curves and circles an animation asked for.

use lumen_core::{Glow, LinearGradient, Point, RadialGradient, Rgba, Surface, Viewport};

/// A recorded line or quadratic curve.
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    pub from: Point,
    /// Control point for quadratic curves, `None` for straight lines.
    pub control: Option<Point>,
    pub to: Point,
    pub color: Rgba,
    pub width: f32,
    pub glow: Option<Glow>,
}

/// A recorded filled circle.
#[derive(Debug, Clone, PartialEq)]
pub struct Circle {
    pub center: Point,
    pub radius: f32,
    pub color: Rgba,
    pub glow: Option<Glow>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear,
    LinearGradient(LinearGradient),
    RadialGradient(RadialGradient),
    Line(Stroke),
    Quadratic(Stroke),
    Circle(Circle),
}

impl DrawCommand {
    pub fn kind(&self) -> &'static str {
        match self {
            DrawCommand::Clear => "clear",
            DrawCommand::LinearGradient(_) => "linear-gradient",
            DrawCommand::RadialGradient(_) => "radial-gradient",
            DrawCommand::Line(_) => "line",
            DrawCommand::Quadratic(_) => "quadratic",
            DrawCommand::Circle(_) => "circle",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    viewport: Viewport,
    glow: Option<Glow>,
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            glow: None,
            commands: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Straight lines in draw order.
    pub fn lines(&self) -> Vec<&Stroke> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Line(s) => Some(s),
                _ => None,
            })
            .collect()
    }

    /// Quadratic curves in draw order.
    pub fn curves(&self) -> Vec<&Stroke> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Quadratic(s) => Some(s),
                _ => None,
            })
            .collect()
    }

    pub fn circles(&self) -> Vec<&Circle> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Circle(c) => Some(c),
                _ => None,
            })
            .collect()
    }

    /// Forget everything recorded so far.
    pub fn reset(&mut self) {
        self.commands.clear();
        self.glow = None;
    }
}

impl Surface for RecordingSurface {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn clear(&mut self) {
        self.commands.push(DrawCommand::Clear);
    }

    fn fill_linear_gradient(&mut self, gradient: &LinearGradient) {
        self.commands
            .push(DrawCommand::LinearGradient(gradient.clone()));
    }

    fn fill_radial_gradient(&mut self, gradient: &RadialGradient) {
        self.commands
            .push(DrawCommand::RadialGradient(gradient.clone()));
    }

    fn set_glow(&mut self, glow: Option<Glow>) {
        self.glow = glow;
    }

    fn stroke_line(&mut self, from: Point, to: Point, color: Rgba, width: f32) {
        self.commands.push(DrawCommand::Line(Stroke {
            from,
            control: None,
            to,
            color,
            width,
            glow: self.glow,
        }));
    }

    fn stroke_quadratic(&mut self, from: Point, control: Point, to: Point, color: Rgba, width: f32) {
        self.commands.push(DrawCommand::Quadratic(Stroke {
            from,
            control: Some(control),
            to,
            color,
            width,
            glow: self.glow,
        }));
    }

    fn fill_circle(&mut self, center: Point, radius: f32, color: Rgba) {
        self.commands.push(DrawCommand::Circle(Circle {
            center,
            radius,
            color,
            glow: self.glow,
        }));
    }
}
