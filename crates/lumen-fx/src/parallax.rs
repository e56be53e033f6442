//! Pointer-driven tilt of the background layer group.

use glam::{Mat3, Vec3};
use lumen_core::{Point, Viewport};

/// Largest rotation about either axis, in degrees.
pub const MAX_TILT_DEG: f32 = 8.0;
/// Distance from the viewer to the plane, in logical pixels.
pub const PERSPECTIVE: f32 = 800.0;

/// Rotation of the layer plane about its center.
///
/// The plane is rotated about Y first, then X, then viewed through a
/// perspective of [`PERSPECTIVE`] pixels, the same as
/// `perspective(800px) rotateX(..) rotateY(..)`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Tilt {
    /// Degrees about the horizontal axis.
    pub rotate_x: f32,
    /// Degrees about the vertical axis.
    pub rotate_y: f32,
}

impl Tilt {
    /// Tilt for a pointer at `pointer` over `container`. The pointer is
    /// normalized to `[-1, 1]` per axis; positions outside are clamped.
    pub fn from_pointer(pointer: Point, container: Viewport) -> Option<Tilt> {
        if container.is_empty() {
            return None;
        }
        let mx = ((pointer.x / container.width) * 2.0 - 1.0).clamp(-1.0, 1.0);
        let my = ((pointer.y / container.height) * 2.0 - 1.0).clamp(-1.0, 1.0);
        Some(Tilt {
            rotate_x: -MAX_TILT_DEG * my,
            rotate_y: MAX_TILT_DEG * mx,
        })
    }

    pub fn is_flat(&self) -> bool {
        self.rotate_x == 0.0 && self.rotate_y == 0.0
    }

    /// Rotation of the plane: `rotateX` applied after `rotateY`.
    fn rotation(&self) -> Mat3 {
        Mat3::from_rotation_x(self.rotate_x.to_radians())
            * Mat3::from_rotation_y(self.rotate_y.to_radians())
    }

    /// Where a point on the plane appears on screen.
    pub fn project(&self, plane: Point, viewport: Viewport) -> Option<Point> {
        let c = viewport.center();
        let rotated = self.rotation() * (plane - c).extend(0.0);
        let w = 1.0 - rotated.z / PERSPECTIVE;
        if w <= 0.0 {
            return None;
        }
        Some(rotated.truncate() / w + c)
    }

    /// The plane point seen at `screen`, or `None` when the ray misses the
    /// visible side of the plane.
    pub fn unproject(&self, screen: Point, viewport: Viewport) -> Option<Point> {
        if self.is_flat() {
            return Some(screen);
        }
        let c = viewport.center();
        let s = screen - c;
        let rotation = self.rotation();

        // Solve u*e1 + v*e2 = (sx*k, sy*k, d*(1 - k)) for (u, v, k).
        let m = Mat3::from_cols(
            rotation.x_axis,
            rotation.y_axis,
            Vec3::new(-s.x, -s.y, PERSPECTIVE),
        );
        if m.determinant().abs() < f32::EPSILON {
            return None;
        }
        let solved = m.inverse() * Vec3::new(0.0, 0.0, PERSPECTIVE);
        if solved.z <= 0.0 {
            return None;
        }
        Some(solved.truncate() + c)
    }
}
