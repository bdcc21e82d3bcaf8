use std::rc::{Rc, Weak};
use std::time::Duration;

use gloo_timers::callback::{Interval, Timeout};
use leptos::task::spawn_local;

use crate::sync::SyncSession;
use crate::timer::Timer;

/// One-shot `setTimeout`, dropped (and so cleared) on cancel
#[derive(Default)]
pub struct TimeoutTimer {
    pending: Option<Timeout>,
}

impl Timer for TimeoutTimer {
    fn schedule(&mut self, delay: Duration, action: Box<dyn FnOnce()>) {
        self.cancel();
        let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
        self.pending = Some(Timeout::new(millis, action));
    }

    fn cancel(&mut self) {
        self.pending = None;
    }
}

/// Save every `interval` for the rest of the page's life. Stops once the
/// session is gone.
pub fn start_autosave(interval: Duration, session: Weak<SyncSession>) {
    let millis = u32::try_from(interval.as_millis()).unwrap_or(u32::MAX);
    Interval::new(millis, move || {
        let Some(session) = session.upgrade() else {
            return;
        };
        spawn_local(async move {
            session.save_logged().await;
        });
    })
    .forget();
}
