// src/utils/geometry.rs
use std::fmt;
use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

/// Coordinate indexes, usable with `Point3D[axis]`.
pub const X: usize = 0;
pub const Y: usize = 1;
pub const Z: usize = 2;

/// Axes in draw order.
pub const AXES: [usize; 3] = [X, Y, Z];

/// A point (or vector) in 3D space. Arithmetic always returns a new value.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point3D {
    #[serde(rename = "X")]
    pub x: f64,
    #[serde(rename = "Y")]
    pub y: f64,
    #[serde(rename = "Z")]
    pub z: f64,
}

impl Point3D {
    pub const ORIGIN: Point3D = Point3D { x: 0.0, y: 0.0, z: 0.0 };

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Same value on every axis.
    pub const fn splat(v: f64) -> Self {
        Self { x: v, y: v, z: v }
    }

    /// Component-wise `self + v`.
    pub fn shift(&self, v: &Point3D) -> Point3D {
        Point3D::new(self.x + v.x, self.y + v.y, self.z + v.z)
    }

    /// Component-wise `self * v`.
    pub fn scale(&self, v: &Point3D) -> Point3D {
        Point3D::new(self.x * v.x, self.y * v.y, self.z * v.z)
    }

    /// Component-wise `self - v`.
    pub fn sub(&self, v: &Point3D) -> Point3D {
        Point3D::new(self.x - v.x, self.y - v.y, self.z - v.z)
    }

    pub fn cross(&self, other: &Point3D) -> Point3D {
        Point3D::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    pub fn length(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Unit vector in the same direction. A zero vector is returned unchanged.
    pub fn normalize(&self) -> Point3D {
        let length = self.length();
        if length == 0.0 {
            return *self;
        }
        Point3D::new(self.x / length, self.y / length, self.z / length)
    }

    /// Product of the three components.
    pub fn volume(&self) -> f64 {
        self.x * self.y * self.z
    }

    /// Smallest of the three components.
    pub fn min_component(&self) -> f64 {
        self.x.min(self.y).min(self.z)
    }
}

impl Index<usize> for Point3D {
    type Output = f64;

    fn index(&self, axis: usize) -> &f64 {
        match axis {
            X => &self.x,
            Y => &self.y,
            Z => &self.z,
            _ => panic!("axis index out of range: {}", axis),
        }
    }
}

impl IndexMut<usize> for Point3D {
    fn index_mut(&mut self, axis: usize) -> &mut f64 {
        match axis {
            X => &mut self.x,
            Y => &mut self.y,
            Z => &mut self.z,
            _ => panic!("axis index out of range: {}", axis),
        }
    }
}

impl fmt::Display for Point3D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} {:.2} {:.2}", self.x, self.y, self.z)
    }
}

/// Returns `true` if the box at `origin` with extents `size` overlaps the query
/// box at `query` with extents `qx, qy, qz`, once both are inflated by `margin`.
///
/// Intervals are closed, so touching boxes interfere. A zero-extent query
/// reduces to a point-in-inflated-box test.
pub fn interferes(
    origin: &Point3D,
    size: &Point3D,
    query: &Point3D,
    qx: f64,
    qy: f64,
    qz: f64,
    margin: f64,
) -> bool {
    let extents = [qx, qy, qz];
    AXES.iter().all(|&axis| {
        let separated = query[axis] + extents[axis] + margin < origin[axis]
            || query[axis] > origin[axis] + size[axis] + margin;
        !separated
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn test_shift_and_scale() {
        let p = Point3D::new(1.0, 2.0, 3.0);
        let v = Point3D::new(0.5, -1.0, 2.0);
        assert_eq!(p.shift(&v), Point3D::new(1.5, 1.0, 5.0));
        assert_eq!(p.scale(&v), Point3D::new(0.5, -2.0, 6.0));
        // Operands are untouched.
        assert_eq!(p, Point3D::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_cross_and_normalize() {
        let n = Point3D::new(0.0, 1.0, 0.0).cross(&Point3D::new(1.0, 0.0, 0.0));
        assert_eq!(n, Point3D::new(0.0, 0.0, -1.0));

        let u = Point3D::new(3.0, 0.0, 4.0).normalize();
        assert_approx_eq!(u.length(), 1.0);
        assert_approx_eq!(u.x, 0.6);

        assert_eq!(Point3D::ORIGIN.normalize(), Point3D::ORIGIN);
    }

    #[test]
    fn test_index_by_axis() {
        let mut p = Point3D::new(1.0, 2.0, 3.0);
        p[Y] = 7.0;
        assert_eq!(p[X], 1.0);
        assert_eq!(p[Y], 7.0);
        assert_eq!(p[Z], 3.0);
        assert_approx_eq!(p.volume(), 21.0);
        assert_approx_eq!(p.min_component(), 1.0);
    }

    #[test]
    fn test_display_two_decimals() {
        assert_eq!(Point3D::new(1.0, 2.346, 10.0).to_string(), "1.00 2.35 10.00");
    }

    #[test]
    fn test_interferes_overlapping_and_separated() {
        let origin = Point3D::new(1.0, 1.0, 1.0);
        let size = Point3D::splat(2.0);

        assert!(interferes(&origin, &size, &Point3D::splat(2.0), 0.5, 0.5, 0.5, 0.0));
        assert!(!interferes(&origin, &size, &Point3D::splat(4.0), 1.0, 1.0, 1.0, 0.5));
        // Separated along one axis only is enough.
        assert!(!interferes(&origin, &size, &Point3D::new(2.0, 2.0, 5.0), 1.0, 1.0, 1.0, 0.5));
    }

    #[test]
    fn test_interferes_touching_counts() {
        let origin = Point3D::ORIGIN;
        let size = Point3D::splat(1.0);
        // Faces touch at x = 1.
        assert!(interferes(&origin, &size, &Point3D::new(1.0, 0.0, 0.0), 1.0, 1.0, 1.0, 0.0));
        // The margin closes a gap exactly.
        assert!(interferes(&origin, &size, &Point3D::new(1.5, 0.0, 0.0), 1.0, 1.0, 1.0, 0.5));
        assert!(!interferes(&origin, &size, &Point3D::new(1.51, 0.0, 0.0), 1.0, 1.0, 1.0, 0.5));
    }

    #[test]
    fn test_interferes_point_query() {
        let origin = Point3D::new(2.0, 2.0, 2.0);
        let size = Point3D::splat(1.0);
        assert!(!interferes(&origin, &size, &Point3D::ORIGIN, 0.0, 0.0, 0.0, 1.0));
        assert!(interferes(&origin, &size, &Point3D::ORIGIN, 0.0, 0.0, 0.0, 2.0));
        assert!(interferes(&origin, &size, &Point3D::new(4.0, 4.0, 4.0), 0.0, 0.0, 0.0, 1.0));
    }
}
