use leptos::prelude::*;

use crate::components::{Panel, SelectField, TextField};
use crate::fields;

fn owned(options: &[&str]) -> Vec<String> {
    options.iter().map(|o| o.to_string()).collect()
}

/// Personal data plus the parish, role and month selection
#[component]
pub fn ProfilePanel(month_options: Vec<String>) -> impl IntoView {
    view! {
        <Panel id="panel_profil" title="Angaben zur Person">
            <div class="form-grid">
                <TextField id=fields::FIRST_NAME label="Vorname" />
                <TextField id=fields::LAST_NAME label="Nachname" />
                <TextField id=fields::BIRTHDATE label="Geburtsdatum" input_type="date" />
                <SelectField id=fields::ROLE label="Tätigkeit" options=Signal::stored(owned(fields::ROLES)) />
                <SelectField id=fields::PARISH label="Kirchengemeinde" options=Signal::stored(owned(fields::PARISHES)) />
                <SelectField id=fields::MONTH label="Monat/Jahr" options=Signal::stored(month_options) />
            </div>
        </Panel>
    }
}
