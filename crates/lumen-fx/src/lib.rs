//! Procedural hero-background animations for the lumen terminal host.
//!
//! This crate provides the animation loops themselves (the particle field,
//! the neural node graph, energy lines, the backdrop and the silhouette and
//! card-connector overlays), a software raster they draw into, the frame
//! driver that schedules them and the compositor that presents the layer
//! stack as terminal half blocks.

mod animation;
pub mod animations;
mod compose;
mod driver;
pub mod easing;
mod parallax;
pub mod path;
mod proximity;
mod raster;
mod recording;
mod state;

pub use animation::{Animation, FRAME_MS};
pub use animations::{
    AuroraBlobs, CardConnectors, EnergyLines, NodeGraph, PageGradient, ParticleField,
    SilhouetteOverlay,
};
pub use compose::{HeroView, Layer, composite_pixel};
pub use driver::{
    AnimationLoop, FrameHandle, FrameScheduler, IntervalScheduler, ManualScheduler,
    ResizeObserver,
};
pub use parallax::{MAX_TILT_DEG, PERSPECTIVE, Tilt};
pub use proximity::{CONNECTOR_PEAK_ALPHA, Link, connector_alpha, links_within};
pub use raster::{Raster, SurfaceError};
pub use recording::{Circle, DrawCommand, RecordingSurface, Stroke};
pub use state::{CellMetrics, HeroOptions, HeroState, NODE_LAYER_OPACITY};
