// src/space/generator.rs

use std::time::Instant;

use log::{debug, info};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::space::{
    CSpace, FaceId, Obstacle, SpaceError, SpaceResult, CORNER_COUNT, INSIDE_OFFSET, MAX_FULLNESS,
    SCALE_RATIO, STAGNATION_WINDOW,
};
use crate::utils::{Point3D, AXES};

/// Tunables of the generation algorithm.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Upper bound of one growth step, as a fraction of the current size.
    pub scale_ratio: f64,
    /// Max inward pull of a perturbed corner or face center, as a size fraction.
    pub inside_offset: f64,
    /// Consecutive rejected mutations that make up one stagnation window.
    pub stagnation_window: u64,
    /// Candidates drawn for a single seeded obstacle before giving up.
    pub max_placement_attempts: u64,
    /// Refinement iterations before giving up.
    pub max_refinement_iterations: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            scale_ratio: SCALE_RATIO,
            inside_offset: INSIDE_OFFSET,
            stagnation_window: STAGNATION_WINDOW,
            max_placement_attempts: 1_000_000,
            max_refinement_iterations: 10_000_000,
        }
    }
}

#[derive(Default, Debug, Clone)]
pub struct GenerationStats {
    pub generation_time: f64,
    pub rate: f64,
    pub min_size: f64,
    pub min_distance: f64,
    pub seeded: usize,
    pub placement_attempts: u64,
    pub refinement_iterations: u64,
    pub accepted_mutations: u64,
    pub rejected_mutations: u64,
    pub stagnation_windows: u64,
    pub free_volume: f64,
}

/// Generates c-spaces from (dimension, fullness, seed).
///
/// Every random draw comes from one ChaCha8 stream seeded with `seed`, consumed
/// in a fixed order, so equal inputs always give an identical space.
pub struct SpaceGenerator {
    config: GeneratorConfig,
    stats: Option<GenerationStats>,
}

/// Parameters derived from the inputs before any obstacle is placed.
struct Derived {
    fullness: i32,
    label: String,
    quantity: usize,
    rate: f64,
    min_size: f64,
    min_distance: f64,
}

/// Mutable state of a single generation call. Obstacles are addressed by position.
struct Run<'a> {
    config: &'a GeneratorConfig,
    rng: ChaCha8Rng,
    dimension: Point3D,
    derived: Derived,
    obstacles: Vec<Obstacle>,
    stats: GenerationStats,
}

impl SpaceGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        SpaceGenerator {
            config,
            stats: None,
        }
    }

    /// Statistics of the last successful generation, if any.
    pub fn stats(&self) -> Option<&GenerationStats> {
        self.stats.as_ref()
    }

    pub fn generate(&mut self, x: f64, y: f64, z: f64, fullness: i32, seed: i64) -> SpaceResult<CSpace> {
        // `!(v > 0.0)` also rejects NaN.
        if !(x > 0.0) || !(y > 0.0) || !(z > 0.0) {
            return Err(SpaceError::InvalidDimension { x, y, z });
        }
        if !(0..=MAX_FULLNESS).contains(&fullness) {
            return Err(SpaceError::InvalidFullness {
                fullness,
                max: MAX_FULLNESS,
            });
        }

        let timer = Instant::now();
        let dimension = Point3D::new(x, y, z);
        let mut rng = ChaCha8Rng::seed_from_u64(seed as u64);
        let derived = derive(dimension, fullness, &mut rng);
        debug!(
            "Derived parameters: rate {:.3}, quantity {}, min size {:.4}, min distance {:.4}",
            derived.rate, derived.quantity, derived.min_size, derived.min_distance
        );

        let mut run = Run {
            config: &self.config,
            rng,
            dimension,
            stats: GenerationStats {
                rate: derived.rate,
                min_size: derived.min_size,
                min_distance: derived.min_distance,
                ..GenerationStats::default()
            },
            derived,
            obstacles: Vec::new(),
        };

        let (start, finish) = run.place_endpoints();
        if run.needs_growth() {
            run.seed_obstacles()?;
            run.refine()?;
        }
        run.perturb_all();

        let description = format!(
            "c-space {:.2} x {:.2} x {:.2}, {}, seed {}",
            x, y, z, run.derived.label, seed
        );
        let mut stats = run.stats;
        stats.free_volume = dimension.volume() - run.obstacles.iter().map(Obstacle::volume).sum::<f64>();
        stats.generation_time = timer.elapsed().as_secs_f64();
        info!(
            "Generated {} obstacles in {:.3}s ({} refinement iterations, free volume {:.3})",
            run.obstacles.len(),
            stats.generation_time,
            stats.refinement_iterations,
            stats.free_volume
        );
        self.stats = Some(stats);

        Ok(CSpace::new(description, dimension, start, finish, run.obstacles))
    }
}

impl Default for SpaceGenerator {
    fn default() -> Self {
        Self::new(GeneratorConfig::default())
    }
}

/// Generates a c-space with the default configuration.
pub fn generate(x: f64, y: f64, z: f64, fullness: i32, seed: i64) -> SpaceResult<CSpace> {
    SpaceGenerator::default().generate(x, y, z, fullness, seed)
}

/// Rate, seed quantity and size limits. Consumes one draw unless the space is empty.
fn derive(dimension: Point3D, fullness: i32, rng: &mut ChaCha8Rng) -> Derived {
    let f = fullness as usize;
    let band = MAX_FULLNESS / 3;
    let (quantity, rate, label) = match fullness {
        0 => (0, 1.0, "empty".to_string()),
        _ => {
            let quantity = if fullness <= band {
                rng.random_range(0..2 + f)
            } else if fullness <= 2 * band {
                1 + rng.random_range(0..1 + f)
            } else {
                2 + rng.random_range(0..f)
            };
            let rate = 1.0 - f64::from(fullness) / (f64::from(MAX_FULLNESS) / 0.9);
            (quantity, rate, format!("fullness value {}", fullness))
        }
    };

    let min_size = 0.1 * dimension.min_component();
    Derived {
        fullness,
        label,
        quantity,
        rate,
        min_size,
        min_distance: rate * min_size,
    }
}

/// Uniform draw in `[0.5, 1)`.
fn half_draw(rng: &mut ChaCha8Rng) -> f64 {
    0.5 + 0.5 * rng.random::<f64>()
}

impl Run<'_> {
    fn far_corner(&self) -> Point3D {
        self.dimension
    }

    fn needs_growth(&self) -> bool {
        self.free_volume() > self.derived.rate * self.dimension.volume()
    }

    fn free_volume(&self) -> f64 {
        self.dimension.volume() - self.obstacles.iter().map(Obstacle::volume).sum::<f64>()
    }

    /// Start near the origin corner and finish near the far corner, pulled
    /// inward by at most `min_size - min_distance` per axis.
    fn place_endpoints(&mut self) -> (Point3D, Point3D) {
        let inset = self.derived.min_size - self.derived.min_distance;
        let mut start = Point3D::ORIGIN;
        for axis in AXES {
            start[axis] = inset * self.rng.random::<f64>();
        }
        let mut finish = self.dimension;
        for axis in AXES {
            finish[axis] -= inset * self.rng.random::<f64>();
        }
        (start, finish)
    }

    fn touches_space_corner(&self, candidate: &Obstacle) -> bool {
        let margin = self.derived.min_size;
        candidate.interferes_with_point(&Point3D::ORIGIN, margin)
            || candidate.interferes_with_point(&self.far_corner(), margin)
    }

    /// Phase 1: place `quantity` cubes of edge `min_size`, redrawing rejected candidates.
    fn seed_obstacles(&mut self) -> SpaceResult<()> {
        let min_size = self.derived.min_size;
        let range = self.dimension.sub(&Point3D::splat(min_size));
        self.obstacles.reserve(self.derived.quantity);

        while self.obstacles.len() < self.derived.quantity {
            let mut attempts = 0;
            loop {
                if attempts >= self.config.max_placement_attempts {
                    return Err(SpaceError::GenerationTimedOut {
                        phase: "seeding",
                        attempts,
                    });
                }
                attempts += 1;

                let mut origin = Point3D::ORIGIN;
                for axis in AXES {
                    origin[axis] = range[axis] * self.rng.random::<f64>();
                }
                let candidate = Obstacle::new(origin, Point3D::splat(min_size));
                if self.touches_space_corner(&candidate) {
                    continue;
                }
                let crowded = self
                    .obstacles
                    .iter()
                    .any(|o| o.interferes_with(&origin, min_size, min_size, min_size, min_size));
                if !crowded {
                    self.obstacles.push(candidate);
                    break;
                }
            }
            self.stats.placement_attempts += attempts;
        }

        self.stats.seeded = self.obstacles.len();
        debug!(
            "Seeded {} obstacles in {} attempts",
            self.stats.seeded, self.stats.placement_attempts
        );
        if self.derived.rate > 0.0 && self.obstacles.is_empty() {
            return Err(SpaceError::InitiationFailed {
                fullness: self.derived.fullness,
            });
        }
        Ok(())
    }

    /// Phase 2: grow or shift one random obstacle face at a time until the
    /// free volume drops to `rate` of the total.
    fn refine(&mut self) -> SpaceResult<()> {
        let ratio = self.config.scale_ratio;
        let far = self.far_corner();
        let target = self.derived.rate * self.dimension.volume();
        let mut free_volume = self.free_volume();
        let mut rejected_in_row = 0;

        while free_volume > target {
            if self.stats.refinement_iterations >= self.config.max_refinement_iterations {
                return Err(SpaceError::GenerationTimedOut {
                    phase: "refinement",
                    attempts: self.stats.refinement_iterations,
                });
            }
            self.stats.refinement_iterations += 1;

            let number = self.rng.random_range(0..self.obstacles.len());
            let axis: usize = self.rng.random_range(0..3);
            let grow = self.rng.random_range(0..2) == 0;
            let factor = self.rng.random::<f64>();

            let mut candidate = self.obstacles[number].clone();
            if grow {
                candidate.size[axis] *= 1.0 + ratio * factor;
                if candidate.origin[axis] + candidate.size[axis] > far[axis] {
                    candidate.size[axis] = far[axis] - candidate.origin[axis];
                }
            } else {
                let shifted = candidate.origin[axis] * ((1.0 - ratio) + ratio * factor);
                candidate.size[axis] += candidate.origin[axis] - shifted;
                candidate.origin[axis] = shifted;
            }

            if self.is_valid_mutation(number, &candidate) {
                self.obstacles[number] = candidate;
                free_volume = self.free_volume();
                self.stats.accepted_mutations += 1;
                rejected_in_row = 0;
            } else {
                self.stats.rejected_mutations += 1;
                rejected_in_row += 1;
                if rejected_in_row == self.config.stagnation_window {
                    self.stats.stagnation_windows += 1;
                    debug!(
                        "Refinement stalled for {} mutations (free volume {:.3}, target {:.3})",
                        rejected_in_row, free_volume, target
                    );
                    rejected_in_row = 0;
                }
            }
        }
        Ok(())
    }

    fn is_valid_mutation(&self, number: usize, candidate: &Obstacle) -> bool {
        if self.touches_space_corner(candidate) {
            return false;
        }
        let margin = self.derived.min_distance;
        !self
            .obstacles
            .iter()
            .enumerate()
            .any(|(n, o)| n != number && o.interferes_with_obstacle(candidate, margin))
    }

    /// Phase 3: jitter corners and add face bulges to every obstacle.
    fn perturb_all(&mut self) {
        for index in 0..self.obstacles.len() {
            let mut perturber = Perturber {
                rng: &mut self.rng,
                inside_offset: self.config.inside_offset,
                min_distance: self.derived.min_distance,
                far: self.dimension,
                origin: self.obstacles[index].origin,
                size: self.obstacles[index].size,
            };
            let obstacle = &mut self.obstacles[index];

            for i in 0..CORNER_COUNT {
                for axis in AXES {
                    // probability 4/5
                    if perturber.rng.random_range(0..5) < 4 {
                        let canonical = obstacle.corner_offset[i][axis];
                        obstacle.corner_offset[i][axis] = perturber.corner(axis, canonical);
                    }
                }
            }

            for face in FaceId::ALL {
                // probability 3/5
                if perturber.rng.random_range(0..5) < 3 {
                    let mut center = face.canonical_center();
                    for axis in AXES {
                        // probability 2/3
                        if perturber.rng.random_range(0..3) < 2 {
                            center[axis] = perturber.face_center(axis, center[axis]);
                        }
                    }
                    obstacle.face_center[face.index()] = Some(center);
                }
            }
        }
    }
}

/// Offset draws for one obstacle's fractional points.
struct Perturber<'r> {
    rng: &'r mut ChaCha8Rng,
    inside_offset: f64,
    min_distance: f64,
    far: Point3D,
    origin: Point3D,
    size: Point3D,
}

impl Perturber<'_> {
    fn corner(&mut self, axis: usize, canonical: f64) -> f64 {
        let inward = self.rng.random_range(0..2) == 0;
        match (canonical < 0.5, inward) {
            (true, true) => self.inward_from_low(),
            (true, false) => self.outward_below(axis),
            (false, true) => self.inward_from_high(),
            (false, false) => self.outward_above(axis),
        }
    }

    fn face_center(&mut self, axis: usize, canonical: f64) -> f64 {
        if canonical == 0.0 {
            if self.rng.random_range(0..2) == 0 {
                self.inward_from_low()
            } else {
                self.outward_below(axis)
            }
        } else if canonical == 1.0 {
            if self.rng.random_range(0..2) == 0 {
                self.outward_above(axis)
            } else {
                self.inward_from_high()
            }
        } else {
            (1.0 - self.inside_offset) / 2.0 + half_draw(self.rng) * self.inside_offset
        }
    }

    fn inward_from_low(&mut self) -> f64 {
        half_draw(self.rng) * self.inside_offset
    }

    fn inward_from_high(&mut self) -> f64 {
        1.0 - half_draw(self.rng) * self.inside_offset
    }

    /// Below 0, never past the space origin.
    fn outward_below(&mut self, axis: usize) -> f64 {
        let offset = -half_draw(self.rng) * self.min_distance / (2.0 * self.size[axis]);
        if self.origin[axis] + self.size[axis] * offset < 0.0 {
            -self.origin[axis] / self.size[axis]
        } else {
            offset
        }
    }

    /// Above 1, never past the far corner.
    fn outward_above(&mut self, axis: usize) -> f64 {
        let offset = 1.0 + half_draw(self.rng) * self.min_distance / (2.0 * self.size[axis]);
        if self.origin[axis] + self.size[axis] * offset > self.far[axis] {
            (self.far[axis] - self.origin[axis]) / self.size[axis]
        } else {
            offset
        }
    }
}
