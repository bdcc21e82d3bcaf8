use leptos::prelude::*;

use crate::components::{DateField, EntryTable, HiddenField, Panel, TimeField};
use crate::context::use_app_context;
use crate::fields;
use crate::models::ListKind;

/// Working hours, shown for every role except organist
#[component]
pub fn WorkTimesPanel() -> impl IntoView {
    let ctx = use_app_context();

    view! {
        <Show when=move || ctx.fields.visibility().work_times>
            <Panel id="panel_arbeitszeiten" title="Arbeitszeiten">
                <div class="form-grid">
                    <DateField id=fields::WORK_DATE label="Datum" />
                    <TimeField id=fields::WORK_START label="Arbeitsbeginn" />
                    <TimeField id=fields::WORK_END label="Arbeitsende" />
                </div>
                <div class="form-actions">
                    <button type="button" on:click=move |_| { ctx.with_controller(|c| c.add_work_time()); }>
                        "Arbeitszeit hinzufügen"
                    </button>
                    <button type="button" class="secondary" on:click=move |_| { ctx.with_controller(|c| c.clear(ListKind::WorkTimes)); }>
                        "Liste leeren"
                    </button>
                </div>
                <EntryTable kind=ListKind::WorkTimes headers=&["Datum", "Beginn", "Ende"] />
            </Panel>
        </Show>
        <HiddenField id=fields::WORK_TIMES_JSON />
    }
}
