// src/lib.rs
//! Procedural generator of 3D configuration spaces for path-planning tests.
//!
//! [`generate`] builds a [`CSpace`] from its dimensions, a fullness level and a
//! seed; [`to_structured_record`] and [`to_solid_mesh`] export it as JSON and as
//! an ASCII STL solid.

pub mod export;
pub mod space;
pub mod utils;

pub use export::{to_solid_mesh, to_structured_record};
pub use space::{generate, CSpace, SpaceError, SpaceResult};
