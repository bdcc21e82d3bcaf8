use leptos::prelude::*;

use crate::context::use_app_context;
use crate::fields;
use crate::models::Summary;
use crate::store::{use_lists_store, ListsStateStoreFields};

/// Current parish, role, month and entry counts
#[component]
pub fn SummaryBar() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_lists_store();

    let summary = move || Summary {
        parish: ctx.fields.get(fields::PARISH),
        role: ctx.fields.get(fields::ROLE),
        month: ctx.fields.get(fields::MONTH),
        services: store.services().read().len(),
        work_times: store.work_times().read().len(),
    };

    view! {
        <div class="summary-bar">
            {move || summary().label()}
            <button
                type="button"
                class="save-btn"
                on:click=move |_| {
                    let session = ctx.session();
                    leptos::task::spawn_local(async move { session.save_logged().await });
                }
            >
                "Jetzt speichern"
            </button>
        </div>
    }
}
