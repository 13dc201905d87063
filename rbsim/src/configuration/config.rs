//! Configuration types for loading simulation scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! simulation scenario. A scenario consists of:
//!
//! - [`EngineConfig`]     – pool size, iteration count, step size, failure policy
//! - [`ParametersConfig`] – physical constants and the placement seed
//! - [`BoundaryConfig`]   – the rectangle bodies bounce inside
//! - [`PopulationConfig`] – how many bodies to place randomly, and their mass
//! - [`BodyConfig`]       – optional explicit bodies, appended after the population
//! - [`ScenarioConfig`]   – top-level wrapper used to load a scenario from YAML
//!
//! # YAML format
//!
//! ```yaml
//! engine:
//!   workers: 4              # threads in the phase pool
//!   steps: 1000             # iterations before the run terminates
//!   dt: 0.001               # virtual time per iteration
//!   failure_policy: "retain" # or "abort"
//!
//! parameters:
//!   repulsive_const: 0.01
//!   friction_const: 1.0     # 0 disables drag
//!   min_distance: 0.01      # separation floor for the repulsion law
//!   seed: 42                # omit for a fresh placement every run
//!
//! boundary: { x0: -4.0, y0: -4.0, x1: 4.0, y1: 4.0 }
//!
//! population:
//!   count: 100
//!   mass: 10.0
//!
//! bodies:
//!   - x: [ 0.5, 0.5 ]
//!     v: [ 0.0, 0.0 ]
//!     m: 10.0
//! ```
//!
//! Missing sections fall back to the defaults shown above.

use serde::Deserialize;

/// What to do when a per-body task fails
/// failure_policy: "retain"` or `failure_policy: "abort"
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    #[default]
    #[serde(rename = "retain")] // Keep the body's prior-phase state, record the failure, continue
    RetainPrevious,

    #[serde(rename = "abort")] // End the run with an error on the first failure
    Abort,
}

/// Engine-level configuration
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct EngineConfig {
    pub workers: usize,                // threads in the phase pool
    pub steps: u64,                    // number of iterations
    pub dt: f64,                       // time step size
    pub failure_policy: FailurePolicy, // task failure handling
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            workers: 4,
            steps: 1000,
            dt: 0.001,
            failure_policy: FailurePolicy::RetainPrevious,
        }
    }
}

/// Physical constants and the random seed
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ParametersConfig {
    pub repulsive_const: f64, // repulsion strength
    pub friction_const: f64,  // drag coefficient
    pub min_distance: f64,    // separation floor
    pub seed: Option<u64>,    // deterministic placement when set
}

impl Default for ParametersConfig {
    fn default() -> Self {
        Self {
            repulsive_const: 0.01,
            friction_const: 1.0,
            min_distance: 0.01,
            seed: None,
        }
    }
}

/// Axis-aligned simulation limits
#[derive(Deserialize, Debug, Clone)]
pub struct BoundaryConfig {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl Default for BoundaryConfig {
    fn default() -> Self {
        Self {
            x0: -4.0,
            y0: -4.0,
            x1: 4.0,
            y1: 4.0,
        }
    }
}

/// Randomly placed bodies
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct PopulationConfig {
    pub count: usize, // number of generated bodies
    pub mass: f64,    // mass of each generated body
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self { count: 100, mass: 10.0 }
    }
}

/// Configuration for a single explicitly placed body
#[derive(Deserialize, Debug, Clone)]
pub struct BodyConfig {
    pub x: Vec<f64>, // initial position
    #[serde(default = "zero_velocity")]
    pub v: Vec<f64>, // initial velocity
    pub m: f64,      // mass
}

fn zero_velocity() -> Vec<f64> {
    vec![0.0, 0.0]
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct ScenarioConfig {
    pub engine: EngineConfig,
    pub parameters: ParametersConfig,
    pub boundary: BoundaryConfig,
    pub population: PopulationConfig,
    pub bodies: Vec<BodyConfig>,
}
