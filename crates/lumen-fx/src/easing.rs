//! CSS-style timing functions.

/// A `cubic-bezier(x1, y1, x2, y2)` timing curve with endpoints at (0,0) and (1,1).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    x1: f32,
    y1: f32,
    x2: f32,
    y2: f32,
}

/// `ease-in-out`.
pub const EASE_IN_OUT: CubicBezier = CubicBezier::new(0.42, 0.0, 0.58, 1.0);

/// `ease-out`.
pub const EASE_OUT: CubicBezier = CubicBezier::new(0.0, 0.0, 0.58, 1.0);

impl CubicBezier {
    pub const fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    fn bezier(t: f32, a: f32, b: f32) -> f32 {
        let mt = 1.0 - t;
        3.0 * mt * mt * t * a + 3.0 * mt * t * t * b + t * t * t
    }

    fn bezier_slope(t: f32, a: f32, b: f32) -> f32 {
        let mt = 1.0 - t;
        3.0 * mt * mt * a + 6.0 * mt * t * (b - a) + 3.0 * t * t * (1.0 - b)
    }

    /// Eased progress for linear progress `x`, clamped to `[0, 1]`.
    pub fn ease(&self, x: f32) -> f32 {
        if x <= 0.0 {
            return 0.0;
        }
        if x >= 1.0 {
            return 1.0;
        }

        // Newton-Raphson on x(t), falling back to bisection on flat slopes.
        let mut t = x;
        for _ in 0..8 {
            let err = Self::bezier(t, self.x1, self.x2) - x;
            if err.abs() < 1e-6 {
                return Self::bezier(t, self.y1, self.y2);
            }
            let slope = Self::bezier_slope(t, self.x1, self.x2);
            if slope.abs() < 1e-6 {
                break;
            }
            t -= err / slope;
        }

        let (mut lo, mut hi) = (0.0f32, 1.0f32);
        t = x;
        for _ in 0..32 {
            let v = Self::bezier(t, self.x1, self.x2);
            if (v - x).abs() < 1e-6 {
                break;
            }
            if v < x {
                lo = t;
            } else {
                hi = t;
            }
            t = (lo + hi) * 0.5;
        }
        Self::bezier(t, self.y1, self.y2)
    }
}

/// Interpolate evenly spaced keyframe values at progress `x`, easing each segment.
pub fn keyframes(values: &[f32], x: f32, curve: &CubicBezier) -> f32 {
    match values {
        [] => 0.0,
        [only] => *only,
        _ => {
            let segments = (values.len() - 1) as f32;
            let pos = x.clamp(0.0, 1.0) * segments;
            let index = (pos.floor() as usize).min(values.len() - 2);
            let local = curve.ease(pos - index as f32);
            values[index] + (values[index + 1] - values[index]) * local
        }
    }
}

/// Mirror-repeat a cycle: progress runs 0 -> 1 over `duration`, then back.
pub fn mirrored(elapsed: f32, duration: f32) -> f32 {
    if duration <= 0.0 {
        return 0.0;
    }
    let phase = (elapsed / duration).rem_euclid(2.0);
    if phase <= 1.0 { phase } else { 2.0 - phase }
}

/// Restart-repeat a cycle: progress runs 0 -> 1 over `duration`, then jumps back.
pub fn looped(elapsed: f32, duration: f32) -> f32 {
    if duration <= 0.0 {
        return 0.0;
    }
    (elapsed / duration).rem_euclid(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ease_endpoints() {
        assert_eq!(EASE_IN_OUT.ease(0.0), 0.0);
        assert_eq!(EASE_IN_OUT.ease(1.0), 1.0);
        assert_eq!(EASE_OUT.ease(-3.0), 0.0);
        assert_eq!(EASE_OUT.ease(7.0), 1.0);
    }

    #[test]
    fn test_ease_in_out_is_symmetric() {
        assert!((EASE_IN_OUT.ease(0.5) - 0.5).abs() < 1e-3);
        let a = EASE_IN_OUT.ease(0.2);
        let b = EASE_IN_OUT.ease(0.8);
        assert!((a + b - 1.0).abs() < 1e-3);
        assert!(a < 0.2, "ease-in-out starts slow");
    }

    #[test]
    fn test_ease_is_monotonic() {
        let mut prev = 0.0;
        for i in 1..=100 {
            let v = EASE_OUT.ease(i as f32 / 100.0);
            assert!(v >= prev);
            prev = v;
        }
    }

    #[test]
    fn test_keyframes() {
        let values = [0.3, 0.7, 0.3];
        assert!((keyframes(&values, 0.0, &EASE_IN_OUT) - 0.3).abs() < 1e-6);
        assert!((keyframes(&values, 0.5, &EASE_IN_OUT) - 0.7).abs() < 1e-6);
        assert!((keyframes(&values, 1.0, &EASE_IN_OUT) - 0.3).abs() < 1e-6);
        assert_eq!(keyframes(&[0.4], 0.9, &EASE_IN_OUT), 0.4);
    }

    #[test]
    fn test_mirrored_and_looped() {
        assert_eq!(mirrored(6.0, 12.0), 0.5);
        assert_eq!(mirrored(18.0, 12.0), 0.5);
        assert_eq!(mirrored(24.0, 12.0), 0.0);
        assert_eq!(looped(15.0, 10.0), 0.5);
        assert_eq!(looped(5.0, 0.0), 0.0);
    }
}
