// src/utils/mod.rs
pub mod geometry;

pub use geometry::{interferes, Point3D, AXES, X, Y, Z};
