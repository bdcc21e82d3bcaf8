//! Zeitaufzeichnung App
//!
//! Wires the browser adapters to the controller and lays out the form.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;

use crate::calendar::month_options;
use crate::components::{LogView, ProfilePanel, ServicesPanel, SummaryBar, WorkTimesPanel};
use crate::config::AppConfig;
use crate::context::{AppContext, FormSignals};
use crate::controller::{FormController, FormPorts};
use crate::store::{ListsState, StoreListView};
use crate::sync::{LoadOutcome, SyncClient, SyncSession};
use crate::timer::Debouncer;
use crate::web::{self, BrowserClock, BrowserDialogs, FetchTransport, TimeoutTimer};

#[component]
pub fn App(config: AppConfig) -> impl IntoView {
    let fields = FormSignals::new();
    let lists = Store::new(ListsState::default());
    provide_context(lists);

    let controller = Rc::new(RefCell::new(FormController::new(
        FormPorts {
            fields: Rc::new(fields),
            storage: web::open_storage(),
            view: Rc::new(StoreListView::new(lists)),
            notifier: Rc::new(BrowserDialogs),
        },
        Debouncer::new(Box::new(TimeoutTimer::default()), config.debounce_delay()),
    )));
    let today = web::today();
    controller.borrow_mut().init(today);

    let client = SyncClient::new(Rc::new(FetchTransport), &config.api_base, web::csrf_token());
    let session = Rc::new(SyncSession::new(
        controller.clone(),
        client,
        Rc::new(BrowserClock),
        config.freshness_window(),
    ));

    let debounced = Rc::downgrade(&session);
    controller.borrow_mut().set_autosave_action(Rc::new(move || {
        if let Some(session) = debounced.upgrade() {
            spawn_local(async move { session.save_logged().await });
        }
    }));

    let reloading = Rc::downgrade(&session);
    controller.borrow_mut().set_month_change_action(Rc::new(move || {
        if let Some(session) = reloading.upgrade() {
            spawn_local(async move {
                if session.month_changed().await.is_none() {
                    log::warn!("[APP] Month switch load failed, not saving");
                }
            });
        }
    }));

    provide_context(AppContext::new(fields, session.clone()));

    let autosave_interval = config.autosave_interval();
    spawn_local(async move {
        match session.load_logged().await {
            Some(LoadOutcome::KeptLocal) => log::info!("[APP] Keeping unsent local changes"),
            Some(outcome) => log::info!("[APP] Initial load: {:?}", outcome),
            None => {}
        }
        web::start_autosave(autosave_interval, Rc::downgrade(&session));
    });

    let months = month_options(today, config.past_months, config.future_months);

    view! {
        <form class="za-form" on:submit=|ev| ev.prevent_default()>
            <h1>"Zeitaufzeichnung"</h1>
            <SummaryBar />
            <ProfilePanel month_options=months />
            <ServicesPanel />
            <WorkTimesPanel />
        </form>
        <LogView />
    }
}
