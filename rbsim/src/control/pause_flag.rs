use std::sync::atomic::{AtomicBool, Ordering};

/// Boolean "stopped" flag; every operation is a single atomic access
#[derive(Debug, Default)]
pub struct PauseFlag {
    flag: AtomicBool,
}

impl PauseFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn reset(&self) {
        self.flag.store(false, Ordering::SeqCst);
    }

    pub fn is_set(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}
