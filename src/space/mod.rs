// src/space/mod.rs
pub mod error;
pub mod generator;
pub mod obstacle;

pub use error::{SpaceError, SpaceResult};
pub use generator::{generate, GenerationStats, GeneratorConfig, SpaceGenerator};
pub use obstacle::{FaceId, Obstacle, CANONICAL_CORNERS, CORNER_COUNT};

use crate::utils::Point3D;

// Generation constants.
pub const DEFAULT_SIZE: f64 = 10.0;
pub const MAX_FULLNESS: i32 = 9;
pub const INSIDE_OFFSET: f64 = 0.33; // max inward pull of a perturbed point, as a size fraction
pub const SCALE_RATIO: f64 = 0.1; // per-step growth bound in refinement
pub const STAGNATION_WINDOW: u64 = 5000;

/// A generated configuration space: bounding box, obstacles and start/finish points.
///
/// Built once by the generator and read-only afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct CSpace {
    description: String,
    dimension: Point3D,
    start: Point3D,
    finish: Point3D,
    obstacles: Vec<Obstacle>,
}

impl CSpace {
    pub(crate) fn new(
        description: String,
        dimension: Point3D,
        start: Point3D,
        finish: Point3D,
        obstacles: Vec<Obstacle>,
    ) -> Self {
        CSpace {
            description,
            dimension,
            start,
            finish,
            obstacles,
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn dimension(&self) -> Point3D {
        self.dimension
    }

    pub fn start(&self) -> Point3D {
        self.start
    }

    pub fn finish(&self) -> Point3D {
        self.finish
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    /// The 8 corners of the bounding box in canonical winding order.
    pub fn border(&self) -> [Point3D; CORNER_COUNT] {
        CANONICAL_CORNERS.map(|c| self.dimension.scale(&c))
    }

    /// Bounding volume minus the base volume of every obstacle.
    pub fn free_volume(&self) -> f64 {
        self.dimension.volume() - self.obstacles.iter().map(Obstacle::volume).sum::<f64>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn test_border_and_free_volume() {
        let space = CSpace::new(
            "test".to_string(),
            Point3D::new(2.0, 3.0, 4.0),
            Point3D::ORIGIN,
            Point3D::new(2.0, 3.0, 4.0),
            vec![Obstacle::new(Point3D::splat(0.5), Point3D::splat(1.0))],
        );

        let border = space.border();
        assert_eq!(border[0], Point3D::ORIGIN);
        assert_eq!(border[2], Point3D::new(2.0, 3.0, 0.0));
        assert_eq!(border[4], Point3D::new(0.0, 3.0, 4.0));
        assert_eq!(border[7], Point3D::new(2.0, 3.0, 4.0));
        assert_approx_eq!(space.free_volume(), 23.0);
    }
}
