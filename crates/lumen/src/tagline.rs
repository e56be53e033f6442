//! Headline overlay that fades in over the hero background.

use lumen_fx::easing::EASE_OUT;
use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    style::{Color, Modifier, Style},
    widgets::Widget,
};

pub const LABEL: &str = "Cortex LXP • AI-Powered Learning Experience";
pub const HEADLINE: &str = "Transforming Talent Through Continuous Learning.";
pub const SUBLINE: &str = "Personalized learning journeys for every role, at every level.";
pub const PRIMARY_CTA: &str = "  Explore the Platform  ";
pub const SECONDARY_CTA: &str = "  Watch Overview  ";

type Rgb = (u8, u8, u8);

const PAGE: Rgb = (0x04, 0x07, 0x0c);
const WHITE: Rgb = (0xff, 0xff, 0xff);
const BLACK: Rgb = (0x00, 0x00, 0x00);
const CYAN_200: Rgb = (0xa5, 0xf3, 0xfc);
const CYAN_300: Rgb = (0x67, 0xe8, 0xf9);
const VIOLET_200: Rgb = (0xdd, 0xd6, 0xfe);
const VIOLET_300: Rgb = (0xc4, 0xb5, 0xfd);
const ROSE_200: Rgb = (0xfe, 0xcd, 0xd3);

/// Rows from the label to the call-to-action line.
const BLOCK_ROWS: u16 = 7;
const CTA_GAP: u16 = 2;

/// A delayed fade-and-rise entrance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fade {
    pub delay_s: f32,
    pub duration_s: f32,
    /// Starting offset below the resting position, in logical pixels.
    pub rise_px: f32,
}

pub const BLOCK_FADE: Fade = Fade::new(0.4, 0.8, 20.0);
pub const SUBLINE_FADE: Fade = Fade::new(0.8, 0.8, 10.0);
pub const PRIMARY_FADE: Fade = Fade::new(1.0, 0.6, 8.0);
pub const SECONDARY_FADE: Fade = Fade::new(1.1, 0.6, 8.0);

impl Fade {
    pub const fn new(delay_s: f32, duration_s: f32, rise_px: f32) -> Self {
        Self {
            delay_s,
            duration_s,
            rise_px,
        }
    }

    /// Eased progress in `[0, 1]`.
    pub fn progress(&self, elapsed_s: f32) -> f32 {
        if self.duration_s <= 0.0 {
            return if elapsed_s >= self.delay_s { 1.0 } else { 0.0 };
        }
        EASE_OUT.ease((elapsed_s - self.delay_s) / self.duration_s)
    }

    /// Remaining rise in whole rows of `cell_height` logical pixels.
    pub fn rise_rows(&self, elapsed_s: f32, cell_height: f32) -> u16 {
        if cell_height <= 0.0 {
            return 0;
        }
        let px = self.rise_px * (1.0 - self.progress(elapsed_s));
        (px / cell_height).round() as u16
    }
}

fn mix(under: Rgb, over: Rgb, alpha: f32) -> Rgb {
    let a = alpha.clamp(0.0, 1.0);
    let ch = |u: u8, o: u8| (u as f32 + (o as f32 - u as f32) * a).round() as u8;
    (ch(under.0, over.0), ch(under.1, over.1), ch(under.2, over.2))
}

/// Evenly spaced multi-stop gradient.
fn gradient(stops: &[Rgb], t: f32) -> Rgb {
    match stops {
        [] => WHITE,
        [only] => *only,
        _ => {
            let scaled = t.clamp(0.0, 1.0) * (stops.len() - 1) as f32;
            let i = (scaled.floor() as usize).min(stops.len() - 2);
            mix(stops[i], stops[i + 1], scaled - i as f32)
        }
    }
}

fn rgb_of(color: Color) -> Rgb {
    match color {
        Color::Rgb(r, g, b) => (r, g, b),
        _ => PAGE,
    }
}

/// One line of text with per-character colors.
struct Run<'a> {
    text: &'a str,
    fg: &'a dyn Fn(f32) -> Rgb,
    fill: Option<&'a dyn Fn(f32) -> Rgb>,
    /// Alpha of the text color itself, before the fade.
    alpha: f32,
    bold: bool,
}

impl Run<'_> {
    fn width(&self) -> u16 {
        self.text.chars().count() as u16
    }

    /// Paint at `(x, y)` blended into the existing cell backgrounds.
    fn paint(&self, buf: &mut Buffer, area: Rect, x: u16, y: u16, opacity: f32) {
        if opacity <= 0.0 {
            return;
        }
        let last = self.text.chars().count().saturating_sub(1).max(1) as f32;
        for (i, ch) in self.text.chars().enumerate() {
            let pos = Position::new(x.saturating_add(i as u16), y);
            if !area.contains(pos) {
                continue;
            }
            let Some(cell) = buf.cell_mut(pos) else {
                continue;
            };
            let t = i as f32 / last;
            let under = rgb_of(cell.bg);
            let bg = match self.fill {
                Some(fill) => mix(under, fill(t), opacity),
                None => under,
            };
            let (r, g, b) = mix(bg, (self.fg)(t), opacity * self.alpha);
            cell.set_char(ch)
                .set_fg(Color::Rgb(r, g, b))
                .set_bg(Color::Rgb(bg.0, bg.1, bg.2));
            if self.bold {
                cell.set_style(Style::new().add_modifier(Modifier::BOLD));
            }
        }
    }
}

/// The tagline block, left aligned and vertically centered.
#[derive(Debug, Clone, Copy)]
pub struct TaglineView {
    pub elapsed_s: f32,
    /// Logical pixels per row, used to convert the rise.
    pub cell_height: f32,
}

impl Widget for TaglineView {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        let left = area.x + (area.width / 12).max(2);
        let top = area.y + area.height.saturating_sub(BLOCK_ROWS) / 2;
        let at = |fade: &Fade, row: u16| top + row + fade.rise_rows(self.elapsed_s, self.cell_height);

        let block = BLOCK_FADE.progress(self.elapsed_s);
        let label = Run {
            text: LABEL,
            fg: &|_| CYAN_200,
            fill: None,
            alpha: 0.8,
            bold: false,
        };
        label.paint(buf, area, left, at(&BLOCK_FADE, 0), block);

        let headline = Run {
            text: HEADLINE,
            fg: &|t| gradient(&[CYAN_200, VIOLET_200, ROSE_200], t),
            fill: None,
            alpha: 1.0,
            bold: true,
        };
        headline.paint(buf, area, left, at(&BLOCK_FADE, 2), block);

        let subline = Run {
            text: SUBLINE,
            fg: &|_| WHITE,
            fill: None,
            alpha: 0.8,
            bold: false,
        };
        subline.paint(
            buf,
            area,
            left,
            at(&SUBLINE_FADE, 4),
            SUBLINE_FADE.progress(self.elapsed_s),
        );

        let cta_fill = |t: f32| gradient(&[CYAN_300, VIOLET_300], t);
        let muted_fill = |_: f32| mix(PAGE, WHITE, 0.08);
        let primary = Run {
            text: PRIMARY_CTA,
            fg: &|_| BLACK,
            fill: Some(&cta_fill),
            alpha: 1.0,
            bold: true,
        };
        primary.paint(
            buf,
            area,
            left,
            at(&PRIMARY_FADE, 6),
            PRIMARY_FADE.progress(self.elapsed_s),
        );

        let secondary = Run {
            text: SECONDARY_CTA,
            fg: &|_| CYAN_200,
            fill: Some(&muted_fill),
            alpha: 1.0,
            bold: false,
        };
        secondary.paint(
            buf,
            area,
            left + primary.width() + CTA_GAP,
            at(&SECONDARY_FADE, 6),
            SECONDARY_FADE.progress(self.elapsed_s),
        );
    }
}
