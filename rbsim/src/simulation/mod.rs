pub mod states;
pub mod params;
pub mod engine;
pub mod error;
pub mod forces;
pub mod integrator;
pub mod tasks;
pub mod executor;
pub mod scenario;
pub mod driver;
