//! Per-body units of work for the three phases of an iteration
//!
//! Every task reads its inputs and returns an updated copy of its subject.
//! Nothing here writes to the shared snapshot, which is what lets the
//! executor hand the same `&[Body]` to every worker without locking.

use crate::simulation::error::TaskError;
use crate::simulation::forces::ForceSet;
use crate::simulation::states::{Body, Boundary};

pub type TaskOutcome = Result<Body, TaskError>;

/// One body's work for one phase
pub trait PhaseTask: Sync {
    /// The body this task updates
    fn subject(&self) -> &Body;

    /// Produce the updated body
    fn compute(&self) -> Body;

    /// Run the task, rejecting output that left the reals
    fn call(&self) -> TaskOutcome {
        let body = self.compute();
        if body.is_finite() {
            Ok(body)
        } else {
            Err(TaskError::NonFinite { id: body.id })
        }
    }
}

/// Sum forces over the frozen snapshot, derive acceleration, update velocity
pub struct ForceAndVelocityTask<'a> {
    bodies: &'a [Body],
    subject: &'a Body,
    forces: &'a ForceSet,
    dt: f64,
}

impl<'a> ForceAndVelocityTask<'a> {
    pub fn new(bodies: &'a [Body], subject: &'a Body, forces: &'a ForceSet, dt: f64) -> Self {
        Self {
            bodies,
            subject,
            forces,
            dt,
        }
    }
}

impl PhaseTask for ForceAndVelocityTask<'_> {
    fn subject(&self) -> &Body {
        self.subject
    }

    fn compute(&self) -> Body {
        let total = self.forces.total_force(self.subject, self.bodies);
        let acc = total / self.subject.mass();

        let mut body = self.subject.clone();
        body.update_velocity(acc, self.dt);
        body
    }
}

/// Integrate position from the (already updated) velocity
pub struct PositionTask<'a> {
    subject: &'a Body,
    dt: f64,
}

impl<'a> PositionTask<'a> {
    pub fn new(subject: &'a Body, dt: f64) -> Self {
        Self { subject, dt }
    }
}

impl PhaseTask for PositionTask<'_> {
    fn subject(&self) -> &Body {
        self.subject
    }

    fn compute(&self) -> Body {
        let mut body = self.subject.clone();
        body.update_position(self.dt);
        body
    }
}

/// Clamp and reflect against the walls
pub struct BoundaryTask<'a> {
    subject: &'a Body,
    boundary: &'a Boundary,
}

impl<'a> BoundaryTask<'a> {
    pub fn new(subject: &'a Body, boundary: &'a Boundary) -> Self {
        Self { subject, boundary }
    }
}

impl PhaseTask for BoundaryTask<'_> {
    fn subject(&self) -> &Body {
        self.subject
    }

    fn compute(&self) -> Body {
        let mut body = self.subject.clone();
        body.resolve_boundary_collision(self.boundary);
        body
    }
}
