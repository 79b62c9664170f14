// Run-state machine and cross-thread control handle
//
// The step loop reads this state at the top of every iteration. Pausing
// parks the loop on a condvar until resume or stop flips the state; there
// is no polling while paused.

use crate::error::{SimError, SimResult};
use std::sync::{Arc, Condvar, Mutex};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimState {
    Idle,
    Running,
    Paused,
    /// Terminal: a stopped simulation never steps again
    Stopped,
}

/// What `begin_run` decided about a `run()` call.
#[derive(Debug)]
pub(crate) enum RunAdmission {
    Proceed,
    /// The simulation was already stopped; return the finalized output
    AlreadyFinalized,
}

#[derive(Debug)]
struct ControlInner {
    state: Mutex<SimState>,
    wakeup: Condvar,
}

/// Cloneable handle onto one simulation's run state.
///
/// Clones share state through an `Arc`, so a handle moved to another thread
/// can pause, resume, or stop an in-flight `run()`.
#[derive(Debug, Clone)]
pub struct SimControl {
    inner: Arc<ControlInner>,
}

impl SimControl {
    pub(crate) fn new() -> Self {
        SimControl {
            inner: Arc::new(ControlInner {
                state: Mutex::new(SimState::Idle),
                wakeup: Condvar::new(),
            }),
        }
    }

    pub fn state(&self) -> SimState {
        *self.inner.state.lock().unwrap()
    }

    /// Admit a `run()` call: idle and paused simulations start running,
    /// stopped ones are already finalized, a running one is rejected.
    pub(crate) fn begin_run(&self) -> SimResult<RunAdmission> {
        let mut state = self.inner.state.lock().unwrap();
        match *state {
            SimState::Running => Err(SimError::AlreadyRunning),
            SimState::Stopped => Ok(RunAdmission::AlreadyFinalized),
            SimState::Idle | SimState::Paused => {
                *state = SimState::Running;
                Ok(RunAdmission::Proceed)
            }
        }
    }

    /// Cooperative checkpoint at the top of every step. Blocks while
    /// paused; returns `false` when the loop must exit.
    pub(crate) fn checkpoint(&self) -> bool {
        let mut state = self.inner.state.lock().unwrap();
        loop {
            match *state {
                SimState::Running => return true,
                SimState::Stopped | SimState::Idle => return false,
                SimState::Paused => state = self.inner.wakeup.wait(state).unwrap(),
            }
        }
    }

    /// Mark the run finalized, waking any parked checkpoint.
    pub(crate) fn finish(&self) {
        let mut state = self.inner.state.lock().unwrap();
        *state = SimState::Stopped;
        self.inner.wakeup.notify_all();
    }

    /// Park the loop at its next checkpoint. The in-flight step completes
    /// first. No effect unless running.
    pub fn pause(&self) {
        let mut state = self.inner.state.lock().unwrap();
        if *state == SimState::Running {
            *state = SimState::Paused;
        }
    }

    /// Wake a paused loop; it continues with the step after the last
    /// committed one. No effect unless paused.
    pub fn resume(&self) {
        let mut state = self.inner.state.lock().unwrap();
        if *state == SimState::Paused {
            *state = SimState::Running;
            self.inner.wakeup.notify_all();
        }
    }

    /// Terminal stop. An in-flight step completes; the next checkpoint
    /// exits the loop and `run()` returns the accumulated output.
    pub fn stop(&self) {
        self.finish();
    }
}
