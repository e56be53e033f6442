//! Compositing layer rasters into terminal cells.
//!
//! Each cell shows two vertically stacked pixels with an upper half block:
//! the foreground paints the top pixel, the background the bottom one.

use lumen_core::{Point, Rgba, Viewport};
use ratatui::{buffer::Buffer, layout::Rect, style::Color, widgets::Widget};

use crate::animation::Animation;
use crate::animations::backdrop::page_base_color;
use crate::driver::{AnimationLoop, IntervalScheduler};
use crate::parallax::Tilt;
use crate::raster::Raster;

const UPPER_HALF: char = '▀';

/// One animation in the stack, with how it is blended.
pub struct Layer {
    pub driver: AnimationLoop<Box<dyn Animation>, IntervalScheduler>,
    /// Multiplier on the layer's alpha.
    pub opacity: f32,
    /// Whether the layer belongs to the pointer-tilted group.
    pub tilted: bool,
}

impl Layer {
    pub fn new(animation: Box<dyn Animation>, fps: u32) -> Self {
        Self {
            driver: AnimationLoop::new(animation, IntervalScheduler::new(fps)),
            opacity: 1.0,
            tilted: false,
        }
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }

    pub fn tilted(mut self) -> Self {
        self.tilted = true;
        self
    }

    pub fn name(&self) -> &'static str {
        self.driver.animation().name()
    }
}

/// Premultiplied color of `raster` over the logical rectangle `[min, max)`.
fn sample(raster: &Raster, min: Point, max: Point) -> [f32; 4] {
    let ratio = raster.viewport().pixel_ratio;
    raster.average(min.x * ratio, min.y * ratio, max.x * ratio, max.y * ratio)
}

/// Composite every layer at one output pixel covering `[min, max)`.
pub fn composite_pixel(
    layers: &[Layer],
    tilt: Tilt,
    viewport: Viewport,
    min: Point,
    max: Point,
) -> Rgba {
    let mut out = page_base_color().premultiplied();
    let half = (max - min) * 0.5;

    for layer in layers {
        let Some(raster) = layer.driver.surface() else {
            continue;
        };
        let (lo, hi) = if layer.tilted && !tilt.is_flat() {
            let center = min.midpoint(max);
            match tilt.unproject(center, viewport) {
                Some(p) => (p - half, p + half),
                None => continue,
            }
        } else {
            (min, max)
        };
        let src = sample(raster, lo, hi);
        let keep = 1.0 - src[3] * layer.opacity;
        for i in 0..4 {
            out[i] = src[i] * layer.opacity + out[i] * keep;
        }
    }
    Rgba::from_premultiplied(out)
}

fn to_color(c: Rgba) -> Color {
    let (r, g, b) = c.to_rgb8();
    Color::Rgb(r, g, b)
}

/// Widget presenting a layer stack.
pub struct HeroView<'a> {
    pub layers: &'a [Layer],
    pub tilt: Tilt,
    pub viewport: Viewport,
}

impl Widget for HeroView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 || self.viewport.is_empty() {
            return;
        }
        let cell_w = self.viewport.width / area.width as f32;
        let pixel_h = self.viewport.height / (area.height as f32 * 2.0);

        for row in 0..area.height {
            for col in 0..area.width {
                let x0 = col as f32 * cell_w;
                let pixel = |half: u16| {
                    let y0 = (row * 2 + half) as f32 * pixel_h;
                    composite_pixel(
                        self.layers,
                        self.tilt,
                        self.viewport,
                        Point::new(x0, y0),
                        Point::new(x0 + cell_w, y0 + pixel_h),
                    )
                };
                let (top, bottom) = (pixel(0), pixel(1));
                if let Some(cell) = buf.cell_mut((area.x + col, area.y + row)) {
                    cell.set_char(UPPER_HALF)
                        .set_fg(to_color(top))
                        .set_bg(to_color(bottom));
                }
            }
        }
    }
}
