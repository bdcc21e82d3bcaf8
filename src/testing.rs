//! In-memory hosts for the core, used by unit and scenario tests.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;
use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::models::{ListKind, RowView};
use crate::ports::{Clock, FieldPort, ListView, Notifier};
use crate::timer::Timer;

#[derive(Default)]
pub struct MemoryFields {
    values: RefCell<BTreeMap<String, String>>,
}

impl MemoryFields {
    pub fn with(values: &[(&str, &str)]) -> Self {
        let fields = Self::default();
        for (id, value) in values {
            fields.set_value(id, value);
        }
        fields
    }
}

impl FieldPort for MemoryFields {
    fn get_value(&self, id: &str) -> String {
        self.values.borrow().get(id).cloned().unwrap_or_default()
    }

    fn set_value(&self, id: &str, value: &str) {
        self.values.borrow_mut().insert(id.to_string(), value.to_string());
    }
}

/// Counts renders and keeps the last rows per list
#[derive(Default)]
pub struct RecordingView {
    renders: RefCell<HashMap<ListKind, usize>>,
    rows: RefCell<HashMap<ListKind, Vec<RowView>>>,
}

impl RecordingView {
    pub fn render_count(&self, kind: ListKind) -> usize {
        self.renders.borrow().get(&kind).copied().unwrap_or(0)
    }

    pub fn rows(&self, kind: ListKind) -> Vec<RowView> {
        self.rows.borrow().get(&kind).cloned().unwrap_or_default()
    }
}

impl ListView for RecordingView {
    fn render(&self, kind: ListKind, rows: Vec<RowView>) {
        *self.renders.borrow_mut().entry(kind).or_insert(0) += 1;
        self.rows.borrow_mut().insert(kind, rows);
    }
}

/// Records alerts and answers confirms with a preset reply
pub struct ScriptedNotifier {
    pub alerts: RefCell<Vec<String>>,
    pub confirms: RefCell<Vec<String>>,
    pub answer: Cell<bool>,
}

impl ScriptedNotifier {
    pub fn answering(answer: bool) -> Self {
        Self {
            alerts: RefCell::new(Vec::new()),
            confirms: RefCell::new(Vec::new()),
            answer: Cell::new(answer),
        }
    }
}

impl Notifier for ScriptedNotifier {
    fn alert(&self, message: &str) {
        self.alerts.borrow_mut().push(message.to_string());
    }

    fn confirm(&self, message: &str) -> bool {
        self.confirms.borrow_mut().push(message.to_string());
        self.answer.get()
    }
}

/// Clock that only moves when told to
pub struct FixedClock {
    now: Cell<DateTime<Utc>>,
}

impl FixedClock {
    pub fn at(now: DateTime<Utc>) -> Self {
        Self { now: Cell::new(now) }
    }

    pub fn advance(&self, by: chrono::Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now.get()
    }
}

#[derive(Default)]
struct ManualTimerState {
    pending: Option<Box<dyn FnOnce()>>,
    last_delay: Option<Duration>,
    cancellations: usize,
}

/// Timer fired by hand from the test through its handle
pub struct ManualTimer {
    state: Rc<RefCell<ManualTimerState>>,
}

#[derive(Clone)]
pub struct ManualTimerHandle {
    state: Rc<RefCell<ManualTimerState>>,
}

impl ManualTimer {
    pub fn new() -> (Self, ManualTimerHandle) {
        let state = Rc::new(RefCell::new(ManualTimerState::default()));
        (Self { state: state.clone() }, ManualTimerHandle { state })
    }
}

impl Timer for ManualTimer {
    fn schedule(&mut self, delay: Duration, action: Box<dyn FnOnce()>) {
        let mut state = self.state.borrow_mut();
        state.pending = Some(action);
        state.last_delay = Some(delay);
    }

    fn cancel(&mut self) {
        let mut state = self.state.borrow_mut();
        state.pending = None;
        state.cancellations += 1;
    }
}

impl ManualTimerHandle {
    /// Run the pending callback, if any
    pub fn fire(&self) -> bool {
        let action = self.state.borrow_mut().pending.take();
        match action {
            Some(action) => {
                action();
                true
            }
            None => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.state.borrow().pending.is_some()
    }

    pub fn last_delay(&self) -> Option<Duration> {
        self.state.borrow().last_delay
    }

    pub fn cancellations(&self) -> usize {
        self.state.borrow().cancellations
    }
}
