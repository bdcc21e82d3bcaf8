//! Timers
//!
//! Cancellable one-shot timer abstraction and the debouncer built on it.

use std::rc::Rc;
use std::time::Duration;

/// One pending callback at a time
pub trait Timer {
    /// Run `action` after `delay`, replacing any pending callback
    fn schedule(&mut self, delay: Duration, action: Box<dyn FnOnce()>);

    fn cancel(&mut self);
}

/// Coalesces bursts of triggers into one call after a quiet period
pub struct Debouncer {
    timer: Box<dyn Timer>,
    delay: Duration,
    action: Option<Rc<dyn Fn()>>,
}

impl Debouncer {
    pub fn new(timer: Box<dyn Timer>, delay: Duration) -> Self {
        Self { timer, delay, action: None }
    }

    pub fn set_action(&mut self, action: Rc<dyn Fn()>) {
        self.action = Some(action);
    }

    /// Restart the quiet period. Without an action this only cancels.
    pub fn trigger(&mut self) {
        self.timer.cancel();
        if let Some(action) = self.action.clone() {
            self.timer.schedule(self.delay, Box::new(move || action()));
        }
    }

    pub fn cancel(&mut self) {
        self.timer.cancel();
    }
}
