//! Start/stop control plane
//!
//! - [`StartGate`]  – blocking single-token gate the driver waits on before running
//! - [`PauseFlag`]  – non-blocking flag that suppresses forwarding frames to the view
//! - [`Controller`] – the only writer of both, driven by `started`/`stopped` events

pub mod controller;
pub mod pause_flag;
pub mod start_gate;

use std::sync::Arc;

pub use controller::{Controller, InputEvent};
pub use pause_flag::PauseFlag;
pub use start_gate::StartGate;

/// Shared handles to the gate and flag
///
/// The driver reads through these handles; writes go through a [`Controller`].
#[derive(Debug, Clone, Default)]
pub struct ControlPlane {
    pub gate: Arc<StartGate>,
    pub pause: Arc<PauseFlag>,
}

impl ControlPlane {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn controller(&self) -> Controller {
        Controller::new(Arc::clone(&self.gate), Arc::clone(&self.pause))
    }
}
