//! Form Controller
//!
//! Owns both entry lists and the stores around them, and reacts to field
//! changes. One instance per page; the UI shares it as `SharedController`.

use std::cell::RefCell;
use std::rc::Rc;

use chrono::NaiveDate;

use crate::cache::{LocalCache, PanelStateStore, ProfileStore, SaveStamp, SaveStampStore, TimeDefaultsStore};
use crate::calendar::{round_time_to_5_minutes, DateBounds, MonthSelection};
use crate::fields;
use crate::list_store::ListStore;
use crate::models::{ListKind, ServiceEntry, Summary, WorkTimeEntry};
use crate::ports::{FieldPort, ListView, Notifier, StoragePort};
use crate::sync::FormPayload;
use crate::timer::Debouncer;

pub type SharedController = Rc<RefCell<FormController>>;

/// Everything the controller needs from its host
pub struct FormPorts {
    pub fields: Rc<dyn FieldPort>,
    pub storage: Rc<dyn StoragePort>,
    pub view: Rc<dyn ListView>,
    pub notifier: Rc<dyn Notifier>,
}

pub struct FormController {
    fields: Rc<dyn FieldPort>,
    notifier: Rc<dyn Notifier>,
    services: ListStore<ServiceEntry>,
    work_times: ListStore<WorkTimeEntry>,
    profile: ProfileStore,
    defaults: TimeDefaultsStore,
    panels: PanelStateStore,
    stamps: SaveStampStore,
    autosave: Debouncer,
    month_changed: Option<Rc<dyn Fn()>>,
}

impl FormController {
    pub fn new(ports: FormPorts, autosave: Debouncer) -> Self {
        let cache = LocalCache::new(ports.storage);
        Self {
            services: ListStore::new(cache.clone(), ports.view.clone(), ports.fields.clone()),
            work_times: ListStore::new(cache.clone(), ports.view, ports.fields.clone()),
            profile: ProfileStore::new(cache.clone()),
            defaults: TimeDefaultsStore::new(cache.clone()),
            panels: PanelStateStore::new(cache.clone()),
            stamps: SaveStampStore::new(cache),
            fields: ports.fields,
            notifier: ports.notifier,
            autosave,
            month_changed: None,
        }
    }

    /// Restore the profile, default the month to `today`'s and load both lists
    pub fn init(&mut self, today: NaiveDate) {
        for id in fields::PROFILE_FIELDS {
            let saved = self.profile.field(id);
            if !saved.is_empty() {
                self.fields.set_value(id, &saved);
            }
        }
        if self.selected_month().is_none() {
            self.fields
                .set_value(fields::MONTH, &MonthSelection::from_date(today).label());
        }
        self.refresh_context();
        log::info!("[FORM] Ready: {}", self.summary().label());
    }

    /// Action run when the debounce period after an edit ends
    pub fn set_autosave_action(&mut self, action: Rc<dyn Fn()>) {
        self.autosave.set_action(action);
    }

    /// Action run after the month switched, in place of the debounced save.
    /// It is expected to load the new month's record before saving.
    pub fn set_month_change_action(&mut self, action: Rc<dyn Fn()>) {
        self.month_changed = Some(action);
    }

    pub fn value(&self, id: &str) -> String {
        self.fields.get_value(id)
    }

    pub fn selected_month(&self) -> Option<MonthSelection> {
        MonthSelection::parse(&self.value(fields::MONTH))
    }

    /// Path key of the server record for the selected month
    pub fn month_key(&self) -> Option<String> {
        self.selected_month().map(|m| m.api_key())
    }

    pub fn date_bounds(&self) -> Option<DateBounds> {
        self.selected_month().and_then(|m| m.bounds())
    }

    fn partition_key(&self, kind: ListKind) -> String {
        kind.key_builder().partition_key(
            &self.value(fields::PARISH),
            &self.value(fields::MONTH),
            Some(&self.value(fields::ROLE)),
        )
    }

    pub fn services_key(&self) -> String {
        self.partition_key(ListKind::Services)
    }

    pub fn work_times_key(&self) -> String {
        self.partition_key(ListKind::WorkTimes)
    }

    /// Move both lists to the partitions of the current selections.
    ///
    /// Returns whether either list switched.
    pub fn refresh_context(&mut self) -> bool {
        let (services_key, work_times_key) = (self.services_key(), self.work_times_key());
        let services = self.services.switch_context(services_key);
        let work_times = self.work_times.switch_context(work_times_key);
        services || work_times
    }

    pub fn summary(&self) -> Summary {
        Summary {
            parish: self.value(fields::PARISH),
            role: self.value(fields::ROLE),
            month: self.value(fields::MONTH),
            services: self.services().len(),
            work_times: self.work_times().len(),
        }
    }

    pub fn services(&self) -> &[ServiceEntry] {
        self.services.entries()
    }

    pub fn work_times(&self) -> &[WorkTimeEntry] {
        self.work_times.entries()
    }

    /// React to a field the user just edited. The field port already holds
    /// the new value.
    pub fn on_field_input(&mut self, id: &str) {
        if fields::PROFILE_FIELDS.contains(&id) {
            self.profile.save_field(id, &self.value(id));
        }
        if id == fields::MONTH {
            self.fields.set_value(fields::SERVICE_DATE, "");
            self.fields.set_value(fields::WORK_DATE, "");
        }
        if fields::CONTEXT_FIELDS.contains(&id) {
            self.refresh_context();
        }
        if id == fields::SERVICE_LOCATION || id == fields::SERVICE_DATE {
            self.apply_saved_times();
        }
        match (id == fields::MONTH, self.month_changed.clone()) {
            (true, Some(action)) => {
                self.autosave.cancel();
                action();
            }
            _ => self.request_save(),
        }
    }

    /// Snap a time input to the 5-minute grid, leaving malformed input alone
    pub fn round_time_field(&self, id: &str) {
        let current = self.value(id);
        if let Ok(rounded) = round_time_to_5_minutes(&current) {
            if rounded != current {
                self.fields.set_value(id, &rounded);
            }
        }
    }

    /// Start an empty date input on the first day of the selected month
    pub fn ensure_date_in_month(&self, id: &str) {
        if !self.value(id).is_empty() {
            return;
        }
        if let Some(bounds) = self.date_bounds() {
            self.fields.set_value(id, &bounds.min_iso());
        }
    }

    /// Fill empty start, end and rate from the last service at this place and weekday
    pub fn apply_saved_times(&self) {
        let Some(saved) = self.defaults.lookup(
            &self.value(fields::PARISH),
            &self.value(fields::SERVICE_LOCATION),
            &self.value(fields::SERVICE_DATE),
        ) else {
            return;
        };
        for (id, value) in [
            (fields::SERVICE_START, &saved.start),
            (fields::SERVICE_END, &saved.end),
            (fields::SERVICE_RATE, &saved.rate),
        ] {
            if self.value(id).is_empty() && !value.is_empty() {
                self.fields.set_value(id, value);
            }
        }
    }

    /// Add the service typed into the entry inputs. Shows a message and
    /// returns false when it is rejected.
    pub fn add_service(&mut self) -> bool {
        self.round_time_field(fields::SERVICE_START);
        self.round_time_field(fields::SERVICE_END);
        let entry = ServiceEntry {
            location: self.value(fields::SERVICE_LOCATION).trim().to_string(),
            date: self.value(fields::SERVICE_DATE),
            rate: self.value(fields::SERVICE_RATE),
            start: self.value(fields::SERVICE_START),
            end: self.value(fields::SERVICE_END),
        };
        let bounds = self.date_bounds();
        if let Err(e) = self.services.add(entry.clone(), bounds.as_ref()) {
            self.notifier.alert(&e.to_string());
            return false;
        }

        self.defaults.remember(&self.value(fields::PARISH), &entry);
        self.clear_inputs(fields::SERVICE_INPUTS);
        self.request_save();
        true
    }

    pub fn add_work_time(&mut self) -> bool {
        self.round_time_field(fields::WORK_START);
        self.round_time_field(fields::WORK_END);
        let entry = WorkTimeEntry {
            date: self.value(fields::WORK_DATE),
            start: self.value(fields::WORK_START),
            end: self.value(fields::WORK_END),
        };
        let bounds = self.date_bounds();
        if let Err(e) = self.work_times.add(entry, bounds.as_ref()) {
            self.notifier.alert(&e.to_string());
            return false;
        }

        self.clear_inputs(fields::WORK_INPUTS);
        self.request_save();
        true
    }

    pub fn remove(&mut self, kind: ListKind, index: usize) -> bool {
        let removed = match kind {
            ListKind::Services => self.services.remove(index).is_some(),
            ListKind::WorkTimes => self.work_times.remove(index).is_some(),
        };
        if removed {
            self.request_save();
        }
        removed
    }

    /// Empty a list after the user confirms
    pub fn clear(&mut self, kind: ListKind) -> bool {
        if !self.notifier.confirm(kind.clear_prompt()) {
            return false;
        }
        match kind {
            ListKind::Services => self.services.clear(),
            ListKind::WorkTimes => self.work_times.clear(),
        }
        self.request_save();
        true
    }

    pub fn request_save(&mut self) {
        self.autosave.trigger();
    }

    /// Every field plus both lists, as sent to the server
    pub fn payload(&self) -> FormPayload {
        let mut payload = FormPayload::new();
        for id in fields::ALL_FIELDS {
            payload.insert(id, self.value(id));
        }
        payload.set_list(ListKind::Services, self.services.to_json());
        payload.set_list(ListKind::WorkTimes, self.work_times.to_json());
        payload
    }

    pub fn last_save(&self, month_key: &str) -> Option<SaveStamp> {
        self.stamps.get(month_key)
    }

    pub fn record_saved(&self, month_key: &str, stamp: &SaveStamp) {
        self.stamps.record(month_key, stamp);
    }

    /// Install a record loaded from the server.
    ///
    /// Plain fields go first and the context is refreshed before the lists
    /// are read: loaded lists belong to the partition of the loaded parish,
    /// month and role.
    pub fn apply_remote(&mut self, payload: &FormPayload) {
        for (id, value) in payload.plain_fields() {
            let Some(id) = fields::ALL_FIELDS.iter().find(|known| **known == id) else {
                continue;
            };
            if *id == ListKind::Services.mirror_field() || *id == ListKind::WorkTimes.mirror_field() {
                continue;
            }
            self.fields.set_value(id, value);
            if fields::PROFILE_FIELDS.contains(id) {
                self.profile.save_field(id, value);
            }
        }
        self.refresh_context();

        if let Some(services) = payload.list::<ServiceEntry>(ListKind::Services) {
            self.services.replace(services);
        }
        if let Some(work_times) = payload.list::<WorkTimeEntry>(ListKind::WorkTimes) {
            self.work_times.replace(work_times);
        }
        log::info!("[FORM] Applied server record: {}", self.summary().label());
    }

    pub fn is_panel_collapsed(&self, panel_id: &str) -> bool {
        self.panels.is_collapsed(panel_id)
    }

    pub fn toggle_panel(&self, panel_id: &str) -> bool {
        self.panels.toggle(panel_id)
    }

    fn clear_inputs(&self, ids: &[&str]) {
        for id in ids {
            self.fields.set_value(id, "");
        }
    }
}
