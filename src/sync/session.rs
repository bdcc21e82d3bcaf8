//! Save and load cycles between the form controller and the server.

use std::rc::Rc;
use std::time::Duration;

use crate::cache::SaveStamp;
use crate::controller::SharedController;
use crate::error::SyncError;
use crate::ports::Clock;

use super::{resolve, FormPayload, Resolution, SyncClient};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// No valid month is selected
    NoMonth,
    /// The server has nothing stored for the month
    NoRecord,
    Applied,
    /// A fresh local save won, a re-save was scheduled
    KeptLocal,
}

pub struct SyncSession {
    controller: SharedController,
    client: SyncClient,
    clock: Rc<dyn Clock>,
    freshness: Duration,
}

impl SyncSession {
    pub fn new(controller: SharedController, client: SyncClient, clock: Rc<dyn Clock>, freshness: Duration) -> Self {
        Self { controller, client, clock, freshness }
    }

    pub fn controller(&self) -> &SharedController {
        &self.controller
    }

    /// Push the whole form for the selected month.
    ///
    /// Returns the server's `updated_at`, `None` when no month is selected.
    pub async fn save(&self) -> Result<Option<String>, SyncError> {
        let (month_key, payload) = {
            let controller = self.controller.borrow();
            match controller.month_key() {
                Some(key) => (key, controller.payload()),
                None => return Ok(None),
            }
        };

        let updated_at = self.client.push(&month_key, &payload).await?;
        let stamp = SaveStamp {
            server_updated_at: updated_at.clone(),
            saved_at_ms: self.clock.now().timestamp_millis(),
        };
        self.controller.borrow().record_saved(&month_key, &stamp);
        log::info!("[SYNC] Saved {} ({})", month_key, updated_at);
        Ok(Some(updated_at))
    }

    /// `save` for timer callbacks. Failures are logged, the local copy stays.
    pub async fn save_logged(&self) {
        if let Err(e) = self.save().await {
            log::warn!("[SYNC] Save failed: {}", e);
        }
    }

    /// Fetch the selected month and install it unless a fresh local save wins
    pub async fn load(&self) -> Result<LoadOutcome, SyncError> {
        let Some(month_key) = self.controller.borrow().month_key() else {
            return Ok(LoadOutcome::NoMonth);
        };

        let record = match self.client.fetch(&month_key).await {
            Ok(Some(record)) => record,
            Ok(None) | Err(SyncError::Status(404)) => {
                log::debug!("[SYNC] No server record for {}", month_key);
                return Ok(LoadOutcome::NoRecord);
            }
            Err(e) => return Err(e),
        };

        let local = self.controller.borrow().last_save(&month_key);
        match resolve(local.as_ref(), &record.updated_at, self.clock.now(), self.freshness) {
            Resolution::KeepLocal => {
                log::info!("[SYNC] Local save for {} is newer, keeping it", month_key);
                self.controller.borrow_mut().request_save();
                Ok(LoadOutcome::KeptLocal)
            }
            Resolution::TakeServer => {
                let payload = FormPayload::from_form_data(&record.form_data)?;
                self.controller.borrow_mut().apply_remote(&payload);
                Ok(LoadOutcome::Applied)
            }
        }
    }

    /// Reconcile after the month selection changed: load the new month's
    /// record first and only schedule a save when the server has none. A
    /// failed load schedules nothing, so the server record is not overwritten.
    pub async fn month_changed(&self) -> Option<LoadOutcome> {
        let outcome = self.load_logged().await;
        if outcome == Some(LoadOutcome::NoRecord) {
            self.controller.borrow_mut().request_save();
        }
        outcome
    }

    pub async fn load_logged(&self) -> Option<LoadOutcome> {
        match self.load().await {
            Ok(outcome) => Some(outcome),
            Err(e) => {
                log::warn!("[SYNC] Load failed: {}", e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    use chrono::{TimeZone, Utc};

    use crate::controller::{FormController, FormPorts};
    use crate::fields;
    use crate::ports::{FieldPort, MemoryStorage};
    use crate::sync::fake::FakeTransport;
    use crate::testing::{FixedClock, ManualTimer, ManualTimerHandle, MemoryFields, RecordingView, ScriptedNotifier};
    use crate::timer::Debouncer;

    struct Harness {
        fields: Rc<MemoryFields>,
        transport: Rc<FakeTransport>,
        clock: Rc<FixedClock>,
        timer: ManualTimerHandle,
        session: SyncSession,
    }

    fn harness(values: &[(&str, &str)]) -> Harness {
        let fields = Rc::new(MemoryFields::with(values));
        let (timer, handle) = ManualTimer::new();
        let mut autosave = Debouncer::new(Box::new(timer), Duration::from_secs(2));
        autosave.set_action(Rc::new(|| {}));
        let controller = Rc::new(RefCell::new(FormController::new(
            FormPorts {
                fields: fields.clone(),
                storage: Rc::new(MemoryStorage::new()),
                view: Rc::new(RecordingView::default()),
                notifier: Rc::new(ScriptedNotifier::answering(true)),
            },
            autosave,
        )));
        controller
            .borrow_mut()
            .init(chrono::NaiveDate::from_ymd_opt(2026, 10, 18).unwrap());

        let transport = Rc::new(FakeTransport::default());
        let clock = Rc::new(FixedClock::at(Utc.with_ymd_and_hms(2026, 10, 18, 10, 0, 0).unwrap()));
        let client = SyncClient::new(transport.clone(), "/api/timerecords", None);
        let session = SyncSession::new(controller, client, clock.clone(), Duration::from_secs(5));
        Harness { fields, transport, clock, timer: handle, session }
    }

    fn record(form_data: &str, updated_at: &str) -> String {
        serde_json::json!({
            "success": true,
            "record": { "form_data": form_data, "updated_at": updated_at },
        })
        .to_string()
    }

    #[tokio::test]
    async fn save_without_month_sends_nothing() {
        let h = harness(&[]);
        h.fields.set_value(fields::MONTH, "");

        assert_eq!(h.session.save().await.unwrap(), None);
        assert!(h.transport.sent.borrow().is_empty());
    }

    #[tokio::test]
    async fn save_records_stamp_for_month() {
        let h = harness(&[(fields::MONTH, "10/2026")]);
        h.transport.reply(Ok(r#"{"success": true, "updated_at": "2026-10-18 10:00:00"}"#));

        h.session.save().await.unwrap();

        assert_eq!(h.transport.sent.borrow()[0].url, "/api/timerecords/2026-10");
        let stamp = h.session.controller().borrow().last_save("2026-10").unwrap();
        assert_eq!(stamp.server_updated_at, "2026-10-18 10:00:00");
        assert_eq!(stamp.saved_at_ms, h.clock.now().timestamp_millis());
    }

    #[tokio::test]
    async fn failed_save_keeps_no_stamp() {
        let h = harness(&[(fields::MONTH, "10/2026")]);
        h.transport.reply(Err(SyncError::Status(500)));

        h.session.save_logged().await;

        assert!(h.session.controller().borrow().last_save("2026-10").is_none());
    }

    #[tokio::test]
    async fn missing_record_is_not_an_error() {
        let h = harness(&[(fields::MONTH, "10/2026")]);
        h.transport.reply(Err(SyncError::Status(404)));
        h.transport.reply(Ok(r#"{"success": true, "record": null}"#));

        assert_eq!(h.session.load().await.unwrap(), LoadOutcome::NoRecord);
        assert_eq!(h.session.load().await.unwrap(), LoadOutcome::NoRecord);
    }

    #[tokio::test]
    async fn server_record_is_applied() {
        let h = harness(&[(fields::MONTH, "10/2026")]);
        h.transport.reply(Ok(&record(
            r#"{"vorname_input": "Anna", "monatjahr_input": "10/2026"}"#,
            "2026-10-18 09:00:00",
        )));

        assert_eq!(h.session.load().await.unwrap(), LoadOutcome::Applied);
        assert_eq!(h.fields.get_value(fields::FIRST_NAME), "Anna");
    }

    #[tokio::test]
    async fn fresh_local_save_beats_older_server_record() {
        let h = harness(&[(fields::MONTH, "10/2026"), (fields::FIRST_NAME, "Lokal")]);
        h.transport.reply(Ok(r#"{"success": true, "updated_at": "2026-10-18 09:59:00"}"#));
        h.session.save().await.unwrap();
        h.clock.advance(chrono::Duration::seconds(2));
        h.transport.reply(Ok(&record(r#"{"vorname_input": "Server"}"#, "2026-10-18 09:59:00")));

        assert_eq!(h.session.load().await.unwrap(), LoadOutcome::KeptLocal);
        assert_eq!(h.fields.get_value(fields::FIRST_NAME), "Lokal");
        assert!(h.timer.is_pending());
    }

    #[tokio::test]
    async fn stale_local_save_yields_to_server() {
        let h = harness(&[(fields::MONTH, "10/2026"), (fields::FIRST_NAME, "Lokal")]);
        h.transport.reply(Ok(r#"{"success": true, "updated_at": "2026-10-18 09:59:00"}"#));
        h.session.save().await.unwrap();
        h.clock.advance(chrono::Duration::seconds(30));
        h.transport.reply(Ok(&record(r#"{"vorname_input": "Server"}"#, "2026-10-18 10:00:20")));

        assert_eq!(h.session.load().await.unwrap(), LoadOutcome::Applied);
        assert_eq!(h.fields.get_value(fields::FIRST_NAME), "Server");
    }

    #[tokio::test]
    async fn own_save_survives_server_clock_running_ahead() {
        let h = harness(&[(fields::MONTH, "10/2026"), (fields::FIRST_NAME, "Lokal")]);
        h.transport.reply(Ok(r#"{"success": true, "updated_at": "2026-10-18 10:00:10"}"#));
        h.session.save().await.unwrap();
        h.fields.set_value(fields::FIRST_NAME, "Lokal-edit");
        h.clock.advance(chrono::Duration::seconds(2));
        h.transport.reply(Ok(&record(r#"{"vorname_input": "Lokal"}"#, "2026-10-18 10:00:10")));

        assert_eq!(h.session.load().await.unwrap(), LoadOutcome::KeptLocal);
        assert_eq!(h.fields.get_value(fields::FIRST_NAME), "Lokal-edit");
    }

    #[tokio::test]
    async fn month_change_with_server_record_does_not_save() {
        let h = harness(&[(fields::MONTH, "11/2026")]);
        h.transport.reply(Ok(&record(r#"{"vorname_input": "Anna"}"#, "2026-11-02 08:00:00")));

        assert_eq!(h.session.month_changed().await, Some(LoadOutcome::Applied));
        assert!(!h.timer.is_pending());
        assert_eq!(h.fields.get_value(fields::FIRST_NAME), "Anna");
    }

    #[tokio::test]
    async fn month_change_without_record_schedules_save() {
        let h = harness(&[(fields::MONTH, "11/2026")]);
        h.transport.reply(Ok(r#"{"success": true, "record": null}"#));

        assert_eq!(h.session.month_changed().await, Some(LoadOutcome::NoRecord));
        assert!(h.timer.is_pending());
    }

    #[tokio::test]
    async fn failed_month_load_schedules_nothing() {
        let h = harness(&[(fields::MONTH, "11/2026")]);
        h.transport.reply(Err(SyncError::Status(500)));

        assert_eq!(h.session.month_changed().await, None);
        assert!(!h.timer.is_pending());
    }

    #[tokio::test]
    async fn transport_failure_leaves_form_alone() {
        let h = harness(&[(fields::MONTH, "10/2026"), (fields::FIRST_NAME, "Lokal")]);
        h.transport.reply(Err(SyncError::Network("offline".to_string())));

        assert_eq!(h.session.load_logged().await, None);
        assert_eq!(h.fields.get_value(fields::FIRST_NAME), "Lokal");
    }
}
