//! Build fully-initialized simulation scenarios from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces the runtime bundle
//! handed to the driver at `Init`:
//! - engine settings (`Engine`)
//! - numerical parameters (`Parameters`)
//! - initial snapshot (bodies at t = 0 inside the boundary)
//! - active force set (`ForceSet`)

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;

use crate::configuration::config::{BodyConfig, ScenarioConfig};
use crate::simulation::engine::Engine;
use crate::simulation::error::SimError;
use crate::simulation::forces::{ForceSet, Friction, Repulsion};
use crate::simulation::params::Parameters;
use crate::simulation::states::{Body, Boundary, NVec2, Snapshot};

pub struct Scenario {
    pub engine: Engine,
    pub parameters: Parameters,
    pub system: Snapshot,
    pub forces: ForceSet,
}

impl Scenario {
    pub fn build_scenario(cfg: ScenarioConfig) -> Result<Self, SimError> {
        let e_cfg = cfg.engine;
        if !(e_cfg.dt.is_finite() && e_cfg.dt > 0.0) {
            return Err(SimError::InvalidTimestep(e_cfg.dt));
        }
        if e_cfg.workers == 0 {
            return Err(SimError::InvalidWorkers);
        }
        let engine = Engine {
            workers: e_cfg.workers,
            steps: e_cfg.steps,
            failure_policy: e_cfg.failure_policy,
        };

        let p_cfg = cfg.parameters;
        let parameters = Parameters {
            dt: e_cfg.dt,
            repulsive_const: p_cfg.repulsive_const,
            friction_const: p_cfg.friction_const,
            min_distance: p_cfg.min_distance,
        };

        let b = cfg.boundary;
        let boundary = Boundary::new(b.x0, b.y0, b.x1, b.y1)?;

        let mut rng = match p_cfg.seed {
            Some(seed) => Pcg64::seed_from_u64(seed),
            None => Pcg64::from_rng(&mut rand::rng()),
        };

        // Generated population first, explicit bodies get the following ids
        let mut bodies = place_bodies(cfg.population.count, cfg.population.mass, &boundary, &mut rng)?;
        for (index, bc) in cfg.bodies.iter().enumerate() {
            bodies.push(body_from_config(bodies.len(), index, bc)?);
        }

        let forces = default_forces(&parameters);

        Ok(Self {
            engine,
            parameters,
            system: Snapshot::new(bodies, boundary),
            forces,
        })
    }

    /// Assemble a scenario from already-built parts
    pub fn from_parts(engine: Engine, parameters: Parameters, bodies: Vec<Body>, boundary: Boundary) -> Self {
        let forces = default_forces(&parameters);
        Self {
            engine,
            parameters,
            system: Snapshot::new(bodies, boundary),
            forces,
        }
    }
}

/// Repulsion plus friction, as configured by `parameters`
pub fn default_forces(parameters: &Parameters) -> ForceSet {
    ForceSet::new()
        .with(Repulsion {
            k: parameters.repulsive_const,
            min_distance: parameters.min_distance,
        })
        .with(Friction {
            k: parameters.friction_const,
        })
}

/// Place `n` resting bodies in the quarter-extent region next to the
/// lower-left quadrant of `boundary`
pub fn place_bodies<R: Rng>(n: usize, mass: f64, boundary: &Boundary, rng: &mut R) -> Result<Vec<Body>, SimError> {
    (0..n)
        .map(|id| {
            let x = boundary.x0() * 0.25 + rng.random::<f64>() * boundary.width() * 0.25;
            let y = boundary.y0() * 0.25 + rng.random::<f64>() * boundary.height() * 0.25;
            Body::new(id, NVec2::new(x, y), NVec2::zeros(), mass)
        })
        .collect()
}

fn body_from_config(id: usize, index: usize, bc: &BodyConfig) -> Result<Body, SimError> {
    let x = vec2(index, "x", &bc.x)?;
    let v = vec2(index, "v", &bc.v)?;
    Body::new(id, x, v, bc.m)
}

fn vec2(index: usize, field: &'static str, c: &[f64]) -> Result<NVec2, SimError> {
    match c {
        [x, y] => Ok(NVec2::new(*x, *y)),
        _ => Err(SimError::InvalidVector {
            index,
            field,
            len: c.len(),
        }),
    }
}
