//! Core state types for the body simulation.
//!
//! - `NVec2` is the 2D vector used for positions, velocities and forces
//!   (sum, scalar multiply, difference and magnitude come from nalgebra)
//! - `Body` is one point mass, `Boundary` the rectangle that contains them
//! - `Snapshot` holds the current population plus virtual time and iteration
//!
//! Bodies inside a snapshot are never mutated in place: each phase produces
//! a fresh collection that replaces the previous one wholesale.

use std::sync::Arc;

use nalgebra::Vector2;

use crate::simulation::error::SimError;

pub type NVec2 = Vector2<f64>;

#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub id: usize, // unique within a run
    pub x: NVec2,  // position
    pub v: NVec2,  // velocity
    m: f64,        // mass, fixed at creation
}

impl Body {
    /// Create a body, rejecting non-positive or non-finite mass
    pub fn new(id: usize, x: NVec2, v: NVec2, m: f64) -> Result<Self, SimError> {
        if !(m.is_finite() && m > 0.0) {
            return Err(SimError::InvalidMass { id, mass: m });
        }
        Ok(Self { id, x, v, m })
    }

    pub fn mass(&self) -> f64 {
        self.m
    }

    /// Repulsive force exerted on `self` by `other`
    ///
    /// Magnitude is `k * m_self * m_other / d^2` pointing away from `other`.
    /// `d` is clamped to `min_distance` so close encounters stay bounded;
    /// coincident bodies have no defined direction and contribute nothing.
    pub fn repulsive_force_from(&self, other: &Body, k: f64, min_distance: f64) -> NVec2 {
        let r = self.x - other.x;
        let dist = r.norm();
        if dist <= f64::EPSILON {
            return NVec2::zeros();
        }
        let d = dist.max(min_distance);
        r * (k * self.m * other.m / (d * d * dist))
    }

    /// Ambient drag, opposing the current velocity
    pub fn friction_force(&self, k: f64) -> NVec2 {
        self.v * -k
    }

    pub fn is_finite(&self) -> bool {
        self.x.iter().chain(self.v.iter()).all(|c| c.is_finite())
    }
}

/// Axis-aligned rectangle `[x0, x1] x [y0, y1]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Boundary {
    x0: f64,
    y0: f64,
    x1: f64,
    y1: f64,
}

impl Boundary {
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Result<Self, SimError> {
        if !(x0 < x1 && y0 < y1) {
            return Err(SimError::InvalidBoundary { x0, y0, x1, y1 });
        }
        Ok(Self { x0, y0, x1, y1 })
    }

    pub fn x0(&self) -> f64 {
        self.x0
    }

    pub fn y0(&self) -> f64 {
        self.y0
    }

    pub fn x1(&self) -> f64 {
        self.x1
    }

    pub fn y1(&self) -> f64 {
        self.y1
    }

    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }

    pub fn contains(&self, p: &NVec2) -> bool {
        (self.x0..=self.x1).contains(&p.x) && (self.y0..=self.y1).contains(&p.y)
    }

    pub fn crossed_left(&self, p: &NVec2) -> bool {
        p.x < self.x0
    }

    pub fn crossed_right(&self, p: &NVec2) -> bool {
        p.x > self.x1
    }

    pub fn crossed_bottom(&self, p: &NVec2) -> bool {
        p.y < self.y0
    }

    pub fn crossed_top(&self, p: &NVec2) -> bool {
        p.y > self.y1
    }
}

/// Everything the driver owns between phases
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub bodies: Arc<[Body]>, // frozen for the duration of a phase
    pub t: f64,              // virtual time
    pub iteration: u64,      // completed iterations
    pub boundary: Boundary,
}

impl Snapshot {
    pub fn new(bodies: Vec<Body>, boundary: Boundary) -> Self {
        Self {
            bodies: bodies.into(),
            t: 0.0,
            iteration: 0,
            boundary,
        }
    }
}
