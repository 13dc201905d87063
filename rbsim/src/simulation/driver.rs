//! Simulation driver
//!
//! Owns the snapshot and runs the timestep loop:
//!
//! ```text
//! Init -> WaitingForStart -> Running(0..steps) -> Terminated
//! ```
//!
//! Every iteration runs three phases through the executor. Each phase reads
//! the frozen snapshot left by the previous one and its complete result set
//! replaces the snapshot before the next phase starts.

use std::sync::Arc;

use log::{debug, info, warn};

use crate::configuration::config::FailurePolicy;
use crate::control::{ControlPlane, PauseFlag, StartGate};
use crate::simulation::engine::Engine;
use crate::simulation::error::SimError;
use crate::simulation::executor::{resolve_outcomes, FailureRecord, Phase, PhaseExecutor};
use crate::simulation::forces::ForceSet;
use crate::simulation::params::Parameters;
use crate::simulation::scenario::Scenario;
use crate::simulation::states::{Body, Snapshot};
use crate::simulation::tasks::{BoundaryTask, ForceAndVelocityTask, PhaseTask, PositionTask};
use crate::visualization::{Frame, View};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    Init,
    WaitingForStart,
    Running { iteration: u64 },
    Terminated,
}

/// Summary of a finished run
#[derive(Debug, Clone)]
pub struct RunReport {
    pub iterations: u64,
    pub virtual_time: f64,
    pub bodies: Arc<[Body]>,
    pub failures: Vec<FailureRecord>,
    pub frames_forwarded: u64,
}

pub struct Simulator<V: View> {
    engine: Engine,
    parameters: Parameters,
    system: Snapshot,
    forces: ForceSet,
    executor: Option<PhaseExecutor>,
    gate: Arc<StartGate>,
    pause: Arc<PauseFlag>,
    view: V,
    state: DriverState,
    failures: Vec<FailureRecord>,
    frames_forwarded: u64,
}

impl<V: View> Simulator<V> {
    /// `Init`: take ownership of the scenario and start the worker pool
    pub fn new(scenario: Scenario, control: &ControlPlane, view: V) -> Result<Self, SimError> {
        let Scenario {
            engine,
            parameters,
            system,
            forces,
        } = scenario;
        if !(parameters.dt.is_finite() && parameters.dt > 0.0) {
            return Err(SimError::InvalidTimestep(parameters.dt));
        }
        let executor = PhaseExecutor::new(engine.workers)?;
        info!(
            "simulator ready: {} bodies, {} steps, {} workers, dt = {}",
            system.bodies.len(),
            engine.steps,
            engine.workers,
            parameters.dt
        );

        Ok(Self {
            engine,
            parameters,
            system,
            forces,
            executor: Some(executor),
            gate: Arc::clone(&control.gate),
            pause: Arc::clone(&control.pause),
            view,
            state: DriverState::Init,
            failures: Vec::new(),
            frames_forwarded: 0,
        })
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.system
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn failures(&self) -> &[FailureRecord] {
        &self.failures
    }

    /// Wait for the start signal, run every iteration, then shut the pool down
    ///
    /// The pool is released even when a phase aborts the run.
    pub fn run(&mut self) -> Result<RunReport, SimError> {
        if self.state == DriverState::Terminated {
            return Err(SimError::AlreadyTerminated);
        }

        self.transition(DriverState::WaitingForStart);
        if !self.gate.wait() {
            warn!("input closed while waiting for the start signal");
            self.terminate();
            return Err(SimError::InputClosed);
        }
        info!("start signal received");

        let outcome = self.run_steps();
        self.terminate();
        outcome?;

        let report = self.report();
        info!(
            "run finished: {} iterations, vt = {:.3}, {} task failures retained",
            report.iterations,
            report.virtual_time,
            report.failures.len()
        );
        Ok(report)
    }

    fn run_steps(&mut self) -> Result<(), SimError> {
        for _ in 0..self.engine.steps {
            self.step()?;
        }
        Ok(())
    }

    /// Advance one iteration: force/velocity, position, boundary, then time
    ///
    /// Also usable without the start gate, e.g. for benchmarks. Stepping
    /// directly puts the driver in `Running` from whatever live state it
    /// was in; a terminated driver refuses.
    pub fn step(&mut self) -> Result<(), SimError> {
        let Self {
            engine,
            parameters,
            system,
            forces,
            executor,
            failures,
            state,
            ..
        } = self;
        let executor = executor.as_ref().ok_or(SimError::AlreadyTerminated)?;
        *state = DriverState::Running {
            iteration: system.iteration,
        };
        let forces: &ForceSet = forces;
        let dt = parameters.dt;
        let iteration = system.iteration;
        let policy = engine.failure_policy;

        let prior = Arc::clone(&system.bodies);
        let tasks: Vec<_> = prior
            .iter()
            .map(|b| ForceAndVelocityTask::new(&prior, b, forces, dt))
            .collect();
        system.bodies = run_barrier(executor, Phase::ForceAndVelocity, iteration, &prior, &tasks, policy, failures)?;

        let prior = Arc::clone(&system.bodies);
        let tasks: Vec<_> = prior.iter().map(|b| PositionTask::new(b, dt)).collect();
        system.bodies = run_barrier(executor, Phase::Position, iteration, &prior, &tasks, policy, failures)?;

        let prior = Arc::clone(&system.bodies);
        let boundary = system.boundary;
        let tasks: Vec<_> = prior.iter().map(|b| BoundaryTask::new(b, &boundary)).collect();
        system.bodies = run_barrier(executor, Phase::Boundary, iteration, &prior, &tasks, policy, failures)?;

        system.t += dt;
        system.iteration += 1;

        // Pausing only suppresses rendering
        if !self.pause.is_set() {
            self.view.display(Frame {
                bodies: Arc::clone(&self.system.bodies),
                virtual_time: self.system.t,
                iteration: self.system.iteration,
                boundary: self.system.boundary,
            });
            self.frames_forwarded += 1;
        }
        Ok(())
    }

    fn terminate(&mut self) {
        if let Some(executor) = self.executor.take() {
            executor.shutdown();
        }
        self.transition(DriverState::Terminated);
    }

    fn transition(&mut self, next: DriverState) {
        debug!("driver {:?} -> {:?}", self.state, next);
        self.state = next;
    }

    fn report(&self) -> RunReport {
        RunReport {
            iterations: self.system.iteration,
            virtual_time: self.system.t,
            bodies: Arc::clone(&self.system.bodies),
            failures: self.failures.clone(),
            frames_forwarded: self.frames_forwarded,
        }
    }
}

/// Run one phase to completion and resolve its outcomes
fn run_barrier<T: PhaseTask>(
    executor: &PhaseExecutor,
    phase: Phase,
    iteration: u64,
    prior: &[Body],
    tasks: &[T],
    policy: FailurePolicy,
    failures: &mut Vec<FailureRecord>,
) -> Result<Arc<[Body]>, SimError> {
    let outcomes = executor.run_phase(tasks);
    let next = resolve_outcomes(phase, iteration, prior, outcomes, policy, failures)?;
    debug!("iteration {iteration}: {phase} phase complete ({} bodies)", next.len());
    Ok(next)
}
