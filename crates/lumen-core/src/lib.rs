//! Core types shared by the lumen crates.
//!
//! Everything here is plain data: logical geometry, colors, the drawing
//! surface contract the animations paint through, and the user-facing
//! scene/speed choices.

mod color;
mod geometry;
mod scene;
mod surface;

pub use color::{ColorStop, Hsla, Rgba, hsl_to_rgb, sample_stops};
pub use geometry::{MAX_PIXEL_RATIO, Point, Viewport};
pub use scene::{AnimationSpeed, Scene};
pub use surface::{Glow, LinearGradient, RadialGradient, Surface};
