use std::time::Instant;

use rand::SeedableRng;
use rand_pcg::Pcg64;

use crate::control::ControlPlane;
use crate::simulation::driver::Simulator;
use crate::simulation::engine::Engine;
use crate::simulation::error::SimError;
use crate::simulation::params::Parameters;
use crate::simulation::scenario::{place_bodies, Scenario};
use crate::simulation::states::Boundary;
use crate::visualization::NullView;

/// Helper to build a seeded scenario of size `n`
fn make_scenario(n: usize, workers: usize) -> Result<Scenario, SimError> {
    let boundary = Boundary::new(-4.0, -4.0, 4.0, 4.0)?;
    let mut rng = Pcg64::seed_from_u64(42);
    let bodies = place_bodies(n, 10.0, &boundary, &mut rng)?;
    let engine = Engine {
        workers,
        ..Engine::default()
    };
    Ok(Scenario::from_parts(engine, Parameters::default(), bodies, boundary))
}

/// Time `steps` iterations of an `n_bodies` population for each pool size
/// Prints CSV so it can be pasted into a spreadsheet
pub fn bench_workers(n_bodies: usize, steps: u64, workers: &[usize]) -> Result<(), SimError> {
    println!("workers,ms_per_step");

    let control = ControlPlane::new();
    for &w in workers {
        let mut sim = Simulator::new(make_scenario(n_bodies, w)?, &control, NullView)?;

        // Warm-up one step
        sim.step()?;

        let t0 = Instant::now();
        for _ in 0..steps {
            sim.step()?;
        }
        let ms = t0.elapsed().as_secs_f64() * 1000.0 / steps.max(1) as f64;

        println!("{},{:.6}", w, ms);
    }
    Ok(())
}
