//! Application Context
//!
//! Shared state provided via Leptos Context API.

use std::collections::BTreeMap;
use std::rc::Rc;

use leptos::prelude::*;

use crate::calendar::{DateBounds, MonthSelection};
use crate::controller::{FormController, SharedController};
use crate::fields::{self, Visibility};
use crate::ports::FieldPort;
use crate::sync::SyncSession;

/// One signal per form field id. The controller reads and writes fields
/// through these, the inputs bind to them.
#[derive(Clone, Copy)]
pub struct FormSignals {
    signals: StoredValue<BTreeMap<&'static str, RwSignal<String>>>,
}

impl FormSignals {
    pub fn new() -> Self {
        let signals = fields::ALL_FIELDS
            .iter()
            .map(|id| (*id, RwSignal::new(String::new())))
            .collect();
        Self { signals: StoredValue::new(signals) }
    }

    pub fn signal(&self, id: &str) -> Option<RwSignal<String>> {
        self.signals.with_value(|signals| signals.get(id).copied())
    }

    /// Tracked read for view closures
    pub fn get(&self, id: &str) -> String {
        self.signal(id).map(|s| s.get()).unwrap_or_default()
    }

    pub fn visibility(&self) -> Visibility {
        Visibility::for_role(&self.get(fields::ROLE))
    }

    pub fn date_bounds(&self) -> Option<DateBounds> {
        MonthSelection::parse(&self.get(fields::MONTH)).and_then(|m| m.bounds())
    }
}

impl FieldPort for FormSignals {
    fn get_value(&self, id: &str) -> String {
        self.signal(id).map(|s| s.get_untracked()).unwrap_or_default()
    }

    fn set_value(&self, id: &str, value: &str) {
        match self.signal(id) {
            Some(signal) => signal.set(value.to_string()),
            None => log::warn!("[FORM] Unknown field {}", id),
        }
    }
}

/// App-wide handles provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    pub fields: FormSignals,
    controller: StoredValue<SharedController, LocalStorage>,
    session: StoredValue<Rc<SyncSession>, LocalStorage>,
}

impl AppContext {
    pub fn new(fields: FormSignals, session: Rc<SyncSession>) -> Self {
        Self {
            fields,
            controller: StoredValue::new_local(session.controller().clone()),
            session: StoredValue::new_local(session),
        }
    }

    /// Run `f` with the controller borrowed mutably. Only call from event
    /// handlers, never from view closures.
    pub fn with_controller<R>(&self, f: impl FnOnce(&mut FormController) -> R) -> R {
        self.controller.with_value(|controller| f(&mut controller.borrow_mut()))
    }

    /// Forward a user edit of field `id`
    pub fn input(&self, id: &'static str) {
        self.with_controller(|c| c.on_field_input(id));
    }

    pub fn session(&self) -> Rc<SyncSession> {
        self.session.get_value()
    }
}

/// Get the app context
pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
