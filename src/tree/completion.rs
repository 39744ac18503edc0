use parking_lot::{Condvar, Mutex};
use std::time::{Duration, Instant};

/// A one-shot signal any amount of threads can wait for.
#[derive(Debug, Default)]
pub(crate) struct Completion {
    fired: Mutex<bool>,
    cond: Condvar,
}

impl Completion {
    /// Wake up all waiters, and return true if this was the first call.
    pub fn fire(&self) -> bool {
        let mut fired = self.fired.lock();
        if *fired {
            return false;
        }
        *fired = true;
        self.cond.notify_all();
        true
    }

    pub fn wait(&self) {
        let mut fired = self.fired.lock();
        while !*fired {
            self.cond.wait(&mut fired);
        }
    }

    /// Returns true if the signal fired before `timeout` passed.
    pub fn wait_for(&self, timeout: Duration) -> bool {
        let deadline = match Instant::now().checked_add(timeout) {
            Some(deadline) => deadline,
            None => {
                self.wait();
                return true;
            }
        };
        let mut fired = self.fired.lock();
        while !*fired {
            if self.cond.wait_until(&mut fired, deadline).timed_out() {
                break;
            }
        }
        *fired
    }
}
