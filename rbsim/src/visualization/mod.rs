//! View boundary
//!
//! The driver hands every unpaused iteration to a [`View`] as a [`Frame`].
//! Views must return promptly: copy what they need and render elsewhere.

pub mod console;

use std::sync::Arc;

use crate::simulation::states::{Body, Boundary};

/// One rendered iteration; cloning shares the body slice
#[derive(Debug, Clone)]
pub struct Frame {
    pub bodies: Arc<[Body]>,
    pub virtual_time: f64,
    pub iteration: u64,
    pub boundary: Boundary,
}

pub trait View {
    fn display(&self, frame: Frame);
}

/// Discards every frame
#[derive(Debug, Default, Clone, Copy)]
pub struct NullView;

impl View for NullView {
    fn display(&self, _frame: Frame) {}
}
