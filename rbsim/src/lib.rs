pub mod simulation;
pub mod control;
pub mod configuration;
pub mod visualization;
pub mod benchmark;

pub use simulation::states::{Body, Boundary, Snapshot, NVec2};
pub use simulation::error::{SimError, TaskError};
pub use simulation::forces::{ForceTerm, ForceSet, Repulsion, Friction};
pub use simulation::tasks::{PhaseTask, TaskOutcome, ForceAndVelocityTask, PositionTask, BoundaryTask};
pub use simulation::executor::{PhaseExecutor, Phase, FailureRecord, resolve_outcomes};
pub use simulation::scenario::Scenario;
pub use simulation::driver::{Simulator, DriverState, RunReport};

pub use control::{ControlPlane, Controller, InputEvent, PauseFlag, StartGate};

pub use configuration::config::{EngineConfig, ParametersConfig, BoundaryConfig, PopulationConfig, BodyConfig, ScenarioConfig, FailurePolicy};

pub use visualization::{Frame, View, NullView, console::ConsoleView};

pub use benchmark::benchmark::bench_workers;
