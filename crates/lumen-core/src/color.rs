//! Color types and conversions.

/// Straight-alpha RGBA color with channels in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Build from 8-bit channels, as written in `rgba(28, 140, 255, 0.18)`.
    pub fn rgb8(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self::new(
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            a.clamp(0.0, 1.0),
        )
    }

    /// Parse `#rrggbb`.
    pub fn hex(hex: &str, a: f32) -> Option<Self> {
        let hex = hex.strip_prefix('#')?;
        if hex.len() != 6 {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
        Some(Self::rgb8(channel(0)?, channel(2)?, channel(4)?, a))
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self { a: a.clamp(0.0, 1.0), ..self }
    }

    /// Premultiplied channels `[r*a, g*a, b*a, a]`.
    pub fn premultiplied(self) -> [f32; 4] {
        [self.r * self.a, self.g * self.a, self.b * self.a, self.a]
    }

    pub fn from_premultiplied(p: [f32; 4]) -> Self {
        if p[3] <= f32::EPSILON {
            return Self::TRANSPARENT;
        }
        Self::new(p[0] / p[3], p[1] / p[3], p[2] / p[3], p[3])
    }

    /// Channels as 8-bit values, alpha ignored.
    pub fn to_rgb8(self) -> (u8, u8, u8) {
        let q = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        (q(self.r), q(self.g), q(self.b))
    }
}

/// HSL color with alpha. Hue in degrees, saturation and lightness in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsla {
    pub h: f32,
    pub s: f32,
    pub l: f32,
    pub a: f32,
}

impl Hsla {
    pub const fn new(h: f32, s: f32, l: f32, a: f32) -> Self {
        Self { h, s, l, a }
    }

    pub fn to_rgba(self) -> Rgba {
        let (r, g, b) = hsl_to_rgb(self.h, self.s, self.l);
        Rgba::new(r, g, b, self.a.clamp(0.0, 1.0))
    }
}

impl From<Hsla> for Rgba {
    fn from(hsla: Hsla) -> Self {
        hsla.to_rgba()
    }
}

/// Convert HSL to RGB channels in `0.0..=1.0`.
pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> (f32, f32, f32) {
    let l = l.clamp(0.0, 1.0);
    if s <= 0.0 {
        return (l, l, l);
    }
    let s = s.min(1.0);

    let q = if l < 0.5 {
        l * (1.0 + s)
    } else {
        l + s - l * s
    };
    let p = 2.0 * l - q;

    let h = h.rem_euclid(360.0) / 360.0;

    let r = hue_to_rgb(p, q, h + 1.0 / 3.0);
    let g = hue_to_rgb(p, q, h);
    let b = hue_to_rgb(p, q, h - 1.0 / 3.0);

    (r, g, b)
}

fn hue_to_rgb(p: f32, q: f32, mut t: f32) -> f32 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }

    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 1.0 / 2.0 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

/// A color at a position along a gradient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
    /// Position in `0.0..=1.0`.
    pub offset: f32,
    pub color: Rgba,
}

impl ColorStop {
    pub const fn new(offset: f32, color: Rgba) -> Self {
        Self { offset, color }
    }
}

/// Sample a gradient at `t`. Stops must be sorted by offset. Positions before
/// the first stop or after the last take that stop's color; interpolation
/// happens in premultiplied space so fades to transparent don't darken.
pub fn sample_stops(stops: &[ColorStop], t: f32) -> Rgba {
    let (Some(first), Some(last)) = (stops.first(), stops.last()) else {
        return Rgba::TRANSPARENT;
    };
    if t <= first.offset {
        return first.color;
    }
    if t >= last.offset {
        return last.color;
    }

    for pair in stops.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if t >= a.offset && t <= b.offset {
            let span = b.offset - a.offset;
            let local = if span > 0.0 { (t - a.offset) / span } else { 1.0 };
            let pa = a.color.premultiplied();
            let pb = b.color.premultiplied();
            let mut out = [0.0; 4];
            for i in 0..4 {
                out[i] = pa[i] + (pb[i] - pa[i]) * local;
            }
            return Rgba::from_premultiplied(out);
        }
    }
    last.color
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn test_hsl_primaries() {
        let (r, g, b) = hsl_to_rgb(0.0, 1.0, 0.5);
        assert!(close(r, 1.0) && close(g, 0.0) && close(b, 0.0));
        let (r, g, b) = hsl_to_rgb(240.0, 1.0, 0.5);
        assert!(close(r, 0.0) && close(g, 0.0) && close(b, 1.0));
        let (r, g, b) = hsl_to_rgb(600.0, 1.0, 0.5);
        assert!(close(r, 0.0) && close(g, 0.0) && close(b, 1.0));
    }

    #[test]
    fn test_grayscale_when_unsaturated() {
        assert_eq!(hsl_to_rgb(200.0, 0.0, 0.25), (0.25, 0.25, 0.25));
    }

    #[test]
    fn test_hex_parsing() {
        let c = Rgba::hex("#00E5FF", 0.6).unwrap();
        assert_eq!(c.to_rgb8(), (0, 229, 255));
        assert_eq!(c.a, 0.6);
        assert!(Rgba::hex("00E5FF", 1.0).is_none());
        assert!(Rgba::hex("#00E5F", 1.0).is_none());
    }

    #[test]
    fn test_sample_stops_clamps_and_interpolates() {
        let stops = [
            ColorStop::new(0.0, Rgba::new(1.0, 0.0, 0.0, 1.0)),
            ColorStop::new(1.0, Rgba::new(0.0, 0.0, 1.0, 1.0)),
        ];
        assert_eq!(sample_stops(&stops, -1.0), stops[0].color);
        assert_eq!(sample_stops(&stops, 2.0), stops[1].color);
        let mid = sample_stops(&stops, 0.5);
        assert!(close(mid.r, 0.5) && close(mid.b, 0.5) && close(mid.a, 1.0));
    }

    #[test]
    fn test_fade_to_transparent_keeps_hue() {
        let stops = [
            ColorStop::new(0.0, Rgba::new(0.2, 0.6, 1.0, 0.5)),
            ColorStop::new(1.0, Rgba::TRANSPARENT),
        ];
        let mid = sample_stops(&stops, 0.5);
        assert!(close(mid.a, 0.25));
        assert!(close(mid.g, 0.6));
    }

    #[test]
    fn test_empty_stops_are_transparent() {
        assert_eq!(sample_stops(&[], 0.3), Rgba::TRANSPARENT);
    }
}
