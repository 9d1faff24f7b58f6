//! # Space Errors
//!
//! Error types for c-space generation and export.

use thiserror::Error;

/// Errors that can occur while generating or serializing a c-space.
#[derive(Debug, Error)]
pub enum SpaceError {
    /// One of the three extents is not strictly positive
    #[error("incorrect c-space dimensions: {x} x {y} x {z}")]
    InvalidDimension { x: f64, y: f64, z: f64 },

    /// Fullness outside `0..=MAX_FULLNESS`
    #[error("incorrect c-space fullness: {fullness} (max: {max})")]
    InvalidFullness { fullness: i32, max: i32 },

    /// A non-empty fullness was requested but no obstacle was seeded
    #[error("initiation failed: no obstacles to grow for fullness {fullness}")]
    InitiationFailed { fullness: i32 },

    /// An iteration budget ran out before the phase converged
    #[error("generation timed out in {phase} after {attempts} attempts")]
    GenerationTimedOut { phase: &'static str, attempts: u64 },

    /// The structured record encoder failed
    #[error("serialization failure: {0}")]
    SerializationFailure(#[from] serde_json::Error),
}

/// Result alias for c-space operations.
pub type SpaceResult<T> = Result<T, SpaceError>;
