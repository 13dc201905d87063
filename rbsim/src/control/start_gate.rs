//! Single-waiter start gate
//!
//! Holds at most one pending start token. `signal` makes it pending,
//! `wait` blocks until it is pending and consumes it under the same lock,
//! so a signal sent before the wait is not lost and two signals with no
//! wait in between still leave a single token.
//!
//! `close` marks the input side as gone: waiters without a token are
//! released empty-handed instead of blocking forever. A token signalled
//! before the close is still delivered.

use std::time::{Duration, Instant};

use log::trace;
use parking_lot::{Condvar, Mutex};

#[derive(Debug, Default)]
struct GateState {
    pending: bool,
    closed: bool,
}

#[derive(Debug, Default)]
pub struct StartGate {
    state: Mutex<GateState>,
    cond: Condvar,
}

impl StartGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the start token pending and wake the waiter
    pub fn signal(&self) {
        let mut state = self.state.lock();
        state.pending = true;
        self.cond.notify_all();
        trace!("start gate signalled");
    }

    /// No further signals will arrive; release any waiter
    pub fn close(&self) {
        let mut state = self.state.lock();
        state.closed = true;
        self.cond.notify_all();
        trace!("start gate closed");
    }

    /// Block until a token is pending, then consume it
    /// Returns `false` if the gate was closed with no token left
    pub fn wait(&self) -> bool {
        let mut state = self.state.lock();
        // spurious wakeups re-check the token
        while !state.pending && !state.closed {
            self.cond.wait(&mut state);
        }
        std::mem::take(&mut state.pending)
    }

    /// Like [`wait`](Self::wait) but gives up after `timeout`
    /// Returns `true` if a token was consumed
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        let mut state = self.state.lock();
        while !state.pending && !state.closed {
            if self.cond.wait_until(&mut state, deadline).timed_out() {
                break;
            }
        }
        std::mem::take(&mut state.pending)
    }

    pub fn is_pending(&self) -> bool {
        self.state.lock().pending
    }

    pub fn is_closed(&self) -> bool {
        self.state.lock().closed
    }
}
