//! High-level runtime engine settings
//!
//! Selects pool size, iteration count and how per-body task failures
//! are resolved when running a `Scenario`

use crate::configuration::config::FailurePolicy;

#[derive(Debug, Clone)]
pub struct Engine {
    pub workers: usize,                // worker threads in the phase pool
    pub steps: u64,                    // iterations before termination
    pub failure_policy: FailurePolicy, // retain prior value or abort the run
}

impl Default for Engine {
    fn default() -> Self {
        Self {
            workers: 4,
            steps: 1000,
            failure_policy: FailurePolicy::RetainPrevious,
        }
    }
}
