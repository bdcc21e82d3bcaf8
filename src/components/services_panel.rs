use leptos::prelude::*;

use crate::components::{DateField, EntryTable, HiddenField, Panel, TextField, TimeField};
use crate::context::use_app_context;
use crate::fields::{self, place_suggestions};
use crate::models::ListKind;

const PLACES_LIST_ID: &str = "kirchorte";

/// Church services, shown for organists only
#[component]
pub fn ServicesPanel() -> impl IntoView {
    let ctx = use_app_context();
    let places = move || place_suggestions(&ctx.fields.get(fields::PARISH));

    view! {
        <Show when=move || ctx.fields.visibility().services>
            <Panel id="panel_gottesdienste" title="Gottesdienste">
                <datalist id=PLACES_LIST_ID>
                    {move || places().iter().map(|p| view! { <option value=*p></option> }).collect_view()}
                </datalist>
                <div class="form-grid">
                    <TextField id=fields::SERVICE_LOCATION label="Kirchort" list=PLACES_LIST_ID />
                    <DateField id=fields::SERVICE_DATE label="Datum" />
                    <TextField id=fields::SERVICE_RATE label="Satz" input_type="number" />
                    <TimeField id=fields::SERVICE_START label="Beginn" />
                    <TimeField id=fields::SERVICE_END label="Ende" />
                </div>
                <div class="form-actions">
                    <button type="button" on:click=move |_| { ctx.with_controller(|c| c.add_service()); }>
                        "Gottesdienst hinzufügen"
                    </button>
                    <button type="button" class="secondary" on:click=move |_| { ctx.with_controller(|c| c.clear(ListKind::Services)); }>
                        "Liste leeren"
                    </button>
                </div>
                <EntryTable kind=ListKind::Services headers=&["Kirchort", "Datum", "Satz", "Beginn", "Ende"] />
            </Panel>
        </Show>
        <HiddenField id=fields::SERVICES_JSON />
    }
}
