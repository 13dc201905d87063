//! Error types for the simulation core
//!
//! `TaskError` describes a single per-body computation that went wrong,
//! `SimError` covers construction problems and run-level failures.

use thiserror::Error;

use crate::simulation::executor::Phase;

/// Failure of a single phase task
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TaskError {
    #[error("body {id} produced a non-finite position or velocity")]
    NonFinite { id: usize },
    #[error("task for body {id} panicked: {message}")]
    Panicked { id: usize, message: String },
}

impl TaskError {
    pub fn body_id(&self) -> usize {
        match self {
            TaskError::NonFinite { id } | TaskError::Panicked { id, .. } => *id,
        }
    }
}

#[derive(Debug, Error)]
pub enum SimError {
    #[error("body {id} has invalid mass {mass}; mass must be positive and finite")]
    InvalidMass { id: usize, mass: f64 },
    #[error("invalid boundary ({x0}, {y0}, {x1}, {y1}); need x0 < x1 and y0 < y1")]
    InvalidBoundary { x0: f64, y0: f64, x1: f64, y1: f64 },
    #[error("timestep {0} must be positive and finite")]
    InvalidTimestep(f64),
    #[error("worker count must be at least 1")]
    InvalidWorkers,
    #[error("body {index} needs 2 components in `{field}`, got {len}")]
    InvalidVector { index: usize, field: &'static str, len: usize },
    #[error("failed to build worker pool: {0}")]
    PoolBuild(#[from] rayon::ThreadPoolBuildError),
    #[error("{phase} phase returned {actual} bodies, expected {expected}")]
    PopulationMismatch {
        phase: Phase,
        expected: usize,
        actual: usize,
    },
    #[error("{phase} phase failed at iteration {iteration}: {source}")]
    PhaseFailed {
        phase: Phase,
        iteration: u64,
        #[source]
        source: TaskError,
    },
    #[error("simulation already terminated")]
    AlreadyTerminated,
    #[error("input closed before the simulation was started")]
    InputClosed,
}
