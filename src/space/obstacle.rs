// src/space/obstacle.rs

use crate::utils::{interferes, Point3D};

/// Number of box corners.
pub const CORNER_COUNT: usize = 8;

/// Fractional corner positions in canonical winding order, shared by the outer
/// boundary and every obstacle's base box.
pub const CANONICAL_CORNERS: [Point3D; CORNER_COUNT] = [
    Point3D::new(0.0, 0.0, 0.0),
    Point3D::new(1.0, 0.0, 0.0),
    Point3D::new(1.0, 1.0, 0.0),
    Point3D::new(0.0, 1.0, 0.0),
    Point3D::new(0.0, 1.0, 1.0),
    Point3D::new(0.0, 0.0, 1.0),
    Point3D::new(1.0, 0.0, 1.0),
    Point3D::new(1.0, 1.0, 1.0),
];

/// One of the six faces of a box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaceId {
    /// z = 0
    Bottom,
    /// y = 0
    Front,
    /// x = 1
    Right,
    /// y = 1
    Back,
    /// x = 0
    Left,
    /// z = 1
    Top,
}

impl FaceId {
    /// All faces in ascending id order.
    pub const ALL: [FaceId; 6] = [
        FaceId::Bottom,
        FaceId::Front,
        FaceId::Right,
        FaceId::Back,
        FaceId::Left,
        FaceId::Top,
    ];

    /// Position of the face in `ALL` (0..6).
    pub fn index(self) -> usize {
        self as usize
    }

    /// Fractional midpoint of the face on the unit box.
    pub fn canonical_center(self) -> Point3D {
        match self {
            FaceId::Bottom => Point3D::new(0.5, 0.5, 0.0),
            FaceId::Front => Point3D::new(0.5, 0.0, 0.5),
            FaceId::Right => Point3D::new(1.0, 0.5, 0.5),
            FaceId::Back => Point3D::new(0.5, 1.0, 0.5),
            FaceId::Left => Point3D::new(0.0, 0.5, 0.5),
            FaceId::Top => Point3D::new(0.5, 0.5, 1.0),
        }
    }
}

/// An axis-aligned box obstacle with perturbed corners and optional face bulges.
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    pub origin: Point3D,
    pub size: Point3D,
    pub corner_offset: [Point3D; CORNER_COUNT],
    pub face_center: [Option<Point3D>; 6],
}

impl Obstacle {
    /// An unperturbed box with minimum corner `origin` and extents `size`.
    pub fn new(origin: Point3D, size: Point3D) -> Self {
        Obstacle {
            origin,
            size,
            corner_offset: CANONICAL_CORNERS,
            face_center: [None; 6],
        }
    }

    /// Absolute position of a fractional point on this box.
    fn place(&self, fraction: &Point3D) -> Point3D {
        self.origin.shift(&self.size.scale(fraction))
    }

    /// Absolute position of corner `i` (0..8).
    pub fn corner(&self, i: usize) -> Point3D {
        self.place(&self.corner_offset[i])
    }

    /// Absolute position of the face's center point, if the face is perturbed.
    pub fn face_point(&self, face: FaceId) -> Option<Point3D> {
        self.face_center[face.index()].map(|c| self.place(&c))
    }

    /// Point lookup over the shared index space: 0..8 are corners, 8..14 are
    /// face centers. Returns `None` for a flat face or an out-of-range index.
    pub fn point_at(&self, i: usize) -> Option<Point3D> {
        if i < CORNER_COUNT {
            return Some(self.corner(i));
        }
        FaceId::ALL
            .get(i - CORNER_COUNT)
            .and_then(|&face| self.face_point(face))
    }

    /// The 8 corners followed by the present face centers in ascending face order.
    pub fn all_points(&self) -> Vec<Point3D> {
        let mut points: Vec<Point3D> = (0..CORNER_COUNT).map(|i| self.corner(i)).collect();
        points.extend(FaceId::ALL.iter().filter_map(|&face| self.face_point(face)));
        points
    }

    /// Index of the face's center point within `all_points()`, if present.
    pub fn vertex_index(&self, face: FaceId) -> Option<usize> {
        self.face_center[face.index()]?;
        let preceding = self.face_center[..face.index()]
            .iter()
            .filter(|c| c.is_some())
            .count();
        Some(CORNER_COUNT + preceding)
    }

    /// Number of perturbed faces.
    pub fn bulge_count(&self) -> usize {
        self.face_center.iter().filter(|c| c.is_some()).count()
    }

    pub fn volume(&self) -> f64 {
        self.size.volume()
    }

    /// True if the query box overlaps this obstacle's base box within `margin`.
    pub fn interferes_with(&self, query: &Point3D, qx: f64, qy: f64, qz: f64, margin: f64) -> bool {
        interferes(&self.origin, &self.size, query, qx, qy, qz, margin)
    }

    /// True if the point lies within `margin` of this obstacle's base box.
    pub fn interferes_with_point(&self, p: &Point3D, margin: f64) -> bool {
        self.interferes_with(p, 0.0, 0.0, 0.0, margin)
    }

    /// True if `other`'s base box lies within `margin` of this one.
    pub fn interferes_with_obstacle(&self, other: &Obstacle, margin: f64) -> bool {
        self.interferes_with(&other.origin, other.size.x, other.size.y, other.size.z, margin)
    }
}
