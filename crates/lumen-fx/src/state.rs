//! Hero background state management.

use lumen_core::{AnimationSpeed, Point, Scene, Viewport};
use ratatui::{Frame, layout::Rect};
use tracing::{debug, info};

use crate::animations::{
    AuroraBlobs, CardConnectors, EnergyLines, NodeGraph, PageGradient, ParticleField,
    SilhouetteOverlay,
};
use crate::compose::{HeroView, Layer};
use crate::parallax::Tilt;

/// Opacity of the node graph over the tilted group.
pub const NODE_LAYER_OPACITY: f32 = 0.7;

/// How the terminal grid maps to logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellMetrics {
    /// Logical width of one cell.
    pub width: f32,
    /// Logical height of one cell.
    pub height: f32,
    /// Physical pixels per logical pixel for the layer rasters.
    pub pixel_ratio: f32,
}

impl Default for CellMetrics {
    fn default() -> Self {
        // One raster pixel per half block.
        Self {
            width: 8.0,
            height: 16.0,
            pixel_ratio: 1.0 / 8.0,
        }
    }
}

impl CellMetrics {
    /// Logical viewport covering `columns x rows` cells.
    pub fn viewport(&self, columns: u16, rows: u16) -> Viewport {
        Viewport::new(
            columns as f32 * self.width,
            rows as f32 * self.height,
            self.pixel_ratio,
        )
    }

    /// Logical position of the center of a cell.
    pub fn cell_center(&self, column: u16, row: u16) -> Point {
        Point::new(
            (column as f32 + 0.5) * self.width,
            (row as f32 + 0.5) * self.height,
        )
    }
}

/// Settings the host picks at startup.
#[derive(Debug, Clone, Copy)]
pub struct HeroOptions {
    pub scene: Scene,
    pub speed: AnimationSpeed,
    pub fps: u32,
    pub seed: u64,
    pub cells: CellMetrics,
    pub parallax: bool,
}

impl Default for HeroOptions {
    fn default() -> Self {
        Self {
            scene: Scene::default(),
            speed: AnimationSpeed::default(),
            fps: 30,
            seed: 0,
            cells: CellMetrics::default(),
            parallax: true,
        }
    }
}

/// The mounted layer stack for the current scene.
pub struct HeroState {
    options: HeroOptions,
    layers: Vec<Layer>,
    viewport: Viewport,
    /// Last known terminal width.
    last_width: u16,
    /// Last known terminal height.
    last_height: u16,
    tilt: Tilt,
}

impl HeroState {
    pub fn new(options: HeroOptions) -> Self {
        let mut state = Self {
            options,
            layers: Vec::new(),
            viewport: Viewport::default(),
            last_width: 0,
            last_height: 0,
            tilt: Tilt::default(),
        };
        state.rebuild();
        state
    }

    /// Unmount the current layers and mount a fresh stack for the scene.
    fn rebuild(&mut self) {
        for layer in &mut self.layers {
            layer.driver.unmount();
        }
        let opts = self.options;
        let vp = self.viewport;
        let scene = opts.scene;

        let mut layers = vec![Layer::new(Box::new(PageGradient::new(vp)), opts.fps)];
        if scene.shows_aurora() {
            layers.push(Layer::new(Box::new(AuroraBlobs::new(vp)), opts.fps).tilted());
        }
        if scene.shows_particles() {
            let field = ParticleField::with_seed(vp, opts.seed);
            layers.push(Layer::new(Box::new(field), opts.fps).tilted());
        }
        if scene.shows_energy() {
            layers.push(Layer::new(Box::new(EnergyLines::new(vp)), opts.fps).tilted());
        }
        if scene.shows_nodes() {
            let graph = NodeGraph::with_seed(vp, opts.seed.wrapping_add(1));
            layers.push(
                Layer::new(Box::new(graph), opts.fps).with_opacity(NODE_LAYER_OPACITY),
            );
        }
        if scene.shows_silhouette() {
            layers.push(Layer::new(Box::new(SilhouetteOverlay::new(vp)), opts.fps));
        }
        if scene.shows_connectors() {
            layers.push(Layer::new(Box::new(CardConnectors::new(vp)), opts.fps));
        }

        for layer in &mut layers {
            layer.driver.set_speed(opts.speed.multiplier());
            layer.driver.mount(vp);
        }
        debug!(
            scene = scene.label(),
            layers = layers.len(),
            seed = opts.seed,
            "layer stack mounted"
        );
        self.layers = layers;
    }

    pub fn scene(&self) -> Scene {
        self.options.scene
    }

    pub fn set_scene(&mut self, scene: Scene) {
        if scene != self.options.scene {
            self.options.scene = scene;
            info!(scene = scene.label(), "scene changed");
            self.rebuild();
        }
    }

    /// Cycle to the next scene.
    pub fn next_scene(&mut self) {
        self.set_scene(self.options.scene.next());
    }

    pub fn seed(&self) -> u64 {
        self.options.seed
    }

    /// Rebuild the stack with randomness drawn from `seed`.
    pub fn reseed(&mut self, seed: u64) {
        self.options.seed = seed;
        self.rebuild();
    }

    pub fn speed(&self) -> AnimationSpeed {
        self.options.speed
    }

    pub fn set_speed(&mut self, speed: AnimationSpeed) {
        self.options.speed = speed;
        for layer in &mut self.layers {
            layer.driver.set_speed(speed.multiplier());
        }
    }

    pub fn parallax(&self) -> bool {
        self.options.parallax
    }

    pub fn set_parallax(&mut self, enabled: bool) {
        self.options.parallax = enabled;
    }

    pub fn tilt(&self) -> Tilt {
        if self.options.parallax {
            self.tilt
        } else {
            Tilt::default()
        }
    }

    /// Pointer moved over cell `(column, row)`. The tilt is kept when the
    /// pointer cannot be mapped.
    pub fn track_pointer(&mut self, column: u16, row: u16) {
        let pointer = self.options.cells.cell_center(column, row);
        if let Some(tilt) = Tilt::from_pointer(pointer, self.viewport) {
            self.tilt = tilt;
        }
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Deliver the terminal size. Layers rebuild their rasters and state
    /// when the dimensions changed.
    pub fn resize(&mut self, width: u16, height: u16) {
        if width == self.last_width && height == self.last_height {
            return;
        }
        self.last_width = width;
        self.last_height = height;
        self.viewport = self.options.cells.viewport(width, height);
        for layer in &mut self.layers {
            layer.driver.on_resize(self.viewport);
        }
        debug!(width, height, "hero resized");
    }

    /// Run every layer whose frame is due at `elapsed_ms`.
    pub fn tick(&mut self, elapsed_ms: u64) {
        let now = elapsed_ms as f64;
        for layer in &mut self.layers {
            layer.driver.pump(now);
        }
    }

    /// Render the background to the frame.
    pub fn render(&mut self, frame: &mut Frame, elapsed_ms: u64) {
        let area = frame.area();
        self.render_area(frame, area, elapsed_ms);
    }

    fn render_area(&mut self, frame: &mut Frame, area: Rect, elapsed_ms: u64) {
        self.resize(area.width, area.height);
        self.tick(elapsed_ms);
        let view = HeroView {
            layers: &self.layers,
            tilt: self.tilt(),
            viewport: self.viewport,
        };
        frame.render_widget(view, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{Terminal, backend::TestBackend};

    fn names(state: &HeroState) -> Vec<&'static str> {
        state.layers().iter().map(Layer::name).collect()
    }

    #[test]
    fn test_hero_stack_order() {
        let state = HeroState::new(HeroOptions::default());
        assert_eq!(
            names(&state),
            ["page", "aurora", "particles", "energy", "nodes", "silhouette", "connectors"]
        );
        let tilted: Vec<bool> = state.layers().iter().map(|l| l.tilted).collect();
        assert_eq!(tilted, [false, true, true, true, false, false, false]);
        assert_eq!(state.layers()[4].opacity, NODE_LAYER_OPACITY);
        assert_eq!(state.layers()[5].opacity, 1.0);
        assert_eq!(state.layers()[6].opacity, 1.0);
    }

    #[test]
    fn test_scene_switch_remounts() {
        let mut state = HeroState::new(HeroOptions::default());
        state.set_scene(Scene::Neural);
        assert_eq!(names(&state), ["page", "nodes", "silhouette"]);
        state.next_scene();
        assert_eq!(state.scene(), Scene::Energy);
        assert_eq!(names(&state), ["page", "aurora", "energy"]);
        assert!(state.layers().iter().all(|l| l.driver.is_mounted()));
    }

    #[test]
    fn test_resize_maps_cells_to_pixels() {
        let mut state = HeroState::new(HeroOptions::default());
        state.resize(80, 24);
        let vp = state.viewport();
        assert_eq!((vp.width, vp.height), (640.0, 384.0));
        let raster = state.layers()[0].driver.surface().unwrap();
        assert_eq!((raster.width(), raster.height()), (80, 48));
    }

    #[test]
    fn test_pointer_tilt_and_toggle() {
        let mut state = HeroState::new(HeroOptions::default());
        state.resize(80, 24);
        state.track_pointer(79, 0);
        let tilt = state.tilt();
        assert!(tilt.rotate_y > 7.0);
        assert!(tilt.rotate_x > 7.0);

        state.set_parallax(false);
        assert!(state.tilt().is_flat());
        state.set_parallax(true);
        assert_eq!(state.tilt(), tilt);
    }

    #[test]
    fn test_pointer_before_first_resize_is_ignored() {
        let mut state = HeroState::new(HeroOptions::default());
        state.track_pointer(10, 10);
        assert!(state.tilt().is_flat());
    }

    #[test]
    fn test_reseed_changes_layout() {
        let mut state = HeroState::new(HeroOptions {
            scene: Scene::Particles,
            ..HeroOptions::default()
        });
        state.resize(40, 20);
        state.tick(0);
        state.reseed(99);
        assert_eq!(state.seed(), 99);
        assert_eq!(state.layers()[1].driver.frames(), 0);
    }

    #[test]
    fn test_render_draws_half_blocks() {
        let mut terminal = Terminal::new(TestBackend::new(30, 10)).unwrap();
        let mut state = HeroState::new(HeroOptions::default());
        terminal
            .draw(|frame| state.render(frame, 0))
            .unwrap();
        terminal
            .draw(|frame| state.render(frame, 40))
            .unwrap();

        let buffer = terminal.backend().buffer();
        assert_eq!(buffer[(0, 0)].symbol(), "▀");
        assert_eq!(buffer[(29, 9)].symbol(), "▀");
        assert!(state.layers().iter().all(|l| l.driver.frames() >= 1));
    }
}
