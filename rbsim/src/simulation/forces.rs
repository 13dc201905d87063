//! Force contributors for the body engine
//!
//! A `ForceSet` sums every registered `ForceTerm` acting on one subject body,
//! reading the rest of the population from a frozen snapshot

use crate::simulation::states::{Body, NVec2};

/// Trait for force sources acting on a single body
/// Implementations must only read `bodies`; the snapshot is shared by all workers
pub trait ForceTerm {
    fn force(&self, subject: &Body, bodies: &[Body]) -> NVec2;
}

/// Collection of force terms (repulsion, friction, etc.)
/// Their contributions are summed into a single force vector per body
pub struct ForceSet {
    terms: Vec<Box<dyn ForceTerm + Send + Sync>>,
}

impl ForceSet {
    /// Create an empty force set
    pub fn new() -> Self {
        Self { terms: Vec::new() }
    }

    /// Add a force term
    pub fn with<T>(mut self, term: T) -> Self
    where
        T: ForceTerm + Send + Sync + 'static,
    {
        self.terms.push(Box::new(term));
        self
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Total force on `subject` given the population in `bodies`
    pub fn total_force(&self, subject: &Body, bodies: &[Body]) -> NVec2 {
        self.terms
            .iter()
            .fold(NVec2::zeros(), |acc, term| acc + term.force(subject, bodies))
    }
}

impl Default for ForceSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Pairwise inverse-square repulsion from every other body
pub struct Repulsion {
    pub k: f64,            // repulsive constant
    pub min_distance: f64, // separation floor used in the denominator
}

impl ForceTerm for Repulsion {
    fn force(&self, subject: &Body, bodies: &[Body]) -> NVec2 {
        bodies
            .iter()
            .filter(|other| other.id != subject.id)
            .fold(NVec2::zeros(), |acc, other| {
                acc + subject.repulsive_force_from(other, self.k, self.min_distance)
            })
    }
}

/// Linear drag proportional to speed
pub struct Friction {
    pub k: f64,
}

impl ForceTerm for Friction {
    fn force(&self, subject: &Body, _bodies: &[Body]) -> NVec2 {
        subject.friction_force(self.k)
    }
}
