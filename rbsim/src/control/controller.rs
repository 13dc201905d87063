//! Controller turning input events into control-plane updates
//!
//! Input components never touch the gate or flag directly; they send
//! [`InputEvent`]s which the controller applies one at a time.

use std::io;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crossbeam_channel::Receiver;
use log::{debug, info};
use parking_lot::Mutex;

use super::{PauseFlag, StartGate};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Started,
    Stopped,
}

#[derive(Debug)]
pub struct Controller {
    gate: Arc<StartGate>,
    pause: Arc<PauseFlag>,
    handlers: Mutex<()>, // serialises started/stopped
}

impl Controller {
    pub fn new(gate: Arc<StartGate>, pause: Arc<PauseFlag>) -> Self {
        Self {
            gate,
            pause,
            handlers: Mutex::new(()),
        }
    }

    /// Resume rendering and release the driver if it is waiting to start
    pub fn started(&self) {
        let _guard = self.handlers.lock();
        self.pause.reset();
        self.gate.signal();
    }

    /// Stop forwarding frames; physics keeps running
    pub fn stopped(&self) {
        let _guard = self.handlers.lock();
        self.pause.set();
    }

    pub fn handle(&self, event: InputEvent) {
        debug!("controller received {event:?}");
        match event {
            InputEvent::Started => self.started(),
            InputEvent::Stopped => self.stopped(),
        }
    }

    /// No more input will arrive; a driver still waiting to start is released
    pub fn closed(&self) {
        let _guard = self.handlers.lock();
        self.gate.close();
    }

    /// Apply events from `events` on a dedicated thread until every sender is dropped,
    /// then close the start gate
    pub fn listen(self: Arc<Self>, events: Receiver<InputEvent>) -> io::Result<JoinHandle<()>> {
        thread::Builder::new()
            .name("rbsim-controller".into())
            .spawn(move || {
                for event in events.iter() {
                    self.handle(event);
                }
                self.closed();
                info!("input closed, controller exiting");
            })
    }
}
