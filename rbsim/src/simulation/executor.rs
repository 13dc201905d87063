//! Fixed-size worker pool that runs one phase at a time
//!
//! `run_phase` is the barrier: it only returns once every task of the phase
//! has finished, and it returns one outcome per task in task order.
//! `resolve_outcomes` then turns those outcomes into the next snapshot
//! according to the configured `FailurePolicy`, never dropping a body.

use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use log::{debug, error, warn};
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::configuration::config::FailurePolicy;
use crate::simulation::error::{SimError, TaskError};
use crate::simulation::states::Body;
use crate::simulation::tasks::{PhaseTask, TaskOutcome};

/// The three stages of an iteration, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    ForceAndVelocity,
    Position,
    Boundary,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::ForceAndVelocity => "force/velocity",
            Phase::Position => "position",
            Phase::Boundary => "boundary",
        };
        f.write_str(name)
    }
}

/// A task that failed and was replaced by its prior-phase body
#[derive(Debug, Clone, PartialEq)]
pub struct FailureRecord {
    pub phase: Phase,
    pub iteration: u64,
    pub body_id: usize,
    pub error: TaskError,
}

pub struct PhaseExecutor {
    pool: ThreadPool,
    workers: usize,
}

impl PhaseExecutor {
    /// Build a pool with exactly `workers` threads
    pub fn new(workers: usize) -> Result<Self, SimError> {
        if workers == 0 {
            return Err(SimError::InvalidWorkers);
        }
        let pool = ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("rbsim-worker-{i}"))
            .build()?;
        debug!("phase executor started with {workers} workers");
        Ok(Self { pool, workers })
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Run every task on the pool and block until all of them are done
    ///
    /// Outcomes are indexed like `tasks`. A panicking task is caught and
    /// reported as `TaskError::Panicked` so the rest of the phase completes.
    pub fn run_phase<T: PhaseTask>(&self, tasks: &[T]) -> Vec<TaskOutcome> {
        self.pool.install(|| {
            tasks
                .par_iter()
                .map(|task| {
                    panic::catch_unwind(AssertUnwindSafe(|| task.call())).unwrap_or_else(|payload| {
                        Err(TaskError::Panicked {
                            id: task.subject().id,
                            message: panic_message(payload.as_ref()),
                        })
                    })
                })
                .collect()
        })
    }

    /// Release the worker threads; pending work (there is none between phases) drains first
    pub fn shutdown(self) {
        debug!("phase executor shutting down {} workers", self.workers);
        drop(self.pool);
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

/// Turn a phase's outcomes into the next body collection
///
/// - the result always has exactly `prior.len()` bodies
/// - `RetainPrevious` keeps the prior-phase body for a failed task and records it
/// - `Abort` turns the first failure into `SimError::PhaseFailed`
pub fn resolve_outcomes(
    phase: Phase,
    iteration: u64,
    prior: &[Body],
    outcomes: Vec<TaskOutcome>,
    policy: FailurePolicy,
    failures: &mut Vec<FailureRecord>,
) -> Result<Arc<[Body]>, SimError> {
    if outcomes.len() != prior.len() {
        return Err(SimError::PopulationMismatch {
            phase,
            expected: prior.len(),
            actual: outcomes.len(),
        });
    }

    let mut next = Vec::with_capacity(prior.len());
    for (before, outcome) in prior.iter().zip(outcomes) {
        match outcome {
            Ok(body) => next.push(body),
            Err(err) => match policy {
                FailurePolicy::Abort => {
                    error!("{phase} phase failed at iteration {iteration}: {err}");
                    return Err(SimError::PhaseFailed {
                        phase,
                        iteration,
                        source: err,
                    });
                }
                FailurePolicy::RetainPrevious => {
                    warn!("{phase} phase, iteration {iteration}: {err}; keeping previous state of body {}", before.id);
                    failures.push(FailureRecord {
                        phase,
                        iteration,
                        body_id: before.id,
                        error: err,
                    });
                    next.push(before.clone());
                }
            },
        }
    }
    Ok(next.into())
}
