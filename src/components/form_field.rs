//! Form Field Components
//!
//! Inputs bound to the field signals. Every edit is forwarded to the
//! controller under the field's id.

use leptos::prelude::*;

use crate::context::use_app_context;

fn field_signal(id: &'static str) -> RwSignal<String> {
    use_app_context()
        .fields
        .signal(id)
        .unwrap_or_else(|| RwSignal::new(String::new()))
}

/// Text-like input (`text`, `date`, `number`)
#[component]
pub fn TextField(
    id: &'static str,
    #[prop(into)] label: String,
    #[prop(default = "text")] input_type: &'static str,
    /// Id of a `<datalist>` with suggestions
    #[prop(optional)] list: Option<&'static str>,
) -> impl IntoView {
    let ctx = use_app_context();
    let value = field_signal(id);

    view! {
        <label class="form-field" for=id>
            <span class="form-label">{label}</span>
            <input
                id=id
                name=id
                type=input_type
                list=list
                prop:value=move || value.get()
                on:input=move |ev| {
                    value.set(event_target_value(&ev));
                    ctx.input(id);
                }
            />
        </label>
    }
}

/// Time input snapped to 5 minutes once the user leaves it
#[component]
pub fn TimeField(id: &'static str, #[prop(into)] label: String) -> impl IntoView {
    let ctx = use_app_context();
    let value = field_signal(id);

    view! {
        <label class="form-field" for=id>
            <span class="form-label">{label}</span>
            <input
                id=id
                name=id
                type="time"
                step="300"
                prop:value=move || value.get()
                on:input=move |ev| {
                    value.set(event_target_value(&ev));
                    ctx.input(id);
                }
                on:change=move |_| ctx.with_controller(|c| c.round_time_field(id))
            />
        </label>
    }
}

/// Date input limited to the selected month
#[component]
pub fn DateField(id: &'static str, #[prop(into)] label: String) -> impl IntoView {
    let ctx = use_app_context();
    let value = field_signal(id);
    let bounds = Memo::new(move |_| ctx.fields.date_bounds());

    view! {
        <label class="form-field" for=id>
            <span class="form-label">{label}</span>
            <input
                id=id
                name=id
                type="date"
                min=move || bounds.get().map(|b| b.min_iso())
                max=move || bounds.get().map(|b| b.max_iso())
                prop:value=move || value.get()
                on:focus=move |_| ctx.with_controller(|c| c.ensure_date_in_month(id))
                on:input=move |ev| {
                    value.set(event_target_value(&ev));
                    ctx.input(id);
                }
            />
        </label>
    }
}

#[component]
pub fn SelectField(
    id: &'static str,
    #[prop(into)] label: String,
    #[prop(into)] options: Signal<Vec<String>>,
) -> impl IntoView {
    let ctx = use_app_context();
    let value = field_signal(id);

    view! {
        <label class="form-field" for=id>
            <span class="form-label">{label}</span>
            <select
                id=id
                name=id
                prop:value=move || value.get()
                on:change=move |ev| {
                    value.set(event_target_value(&ev));
                    ctx.input(id);
                }
            >
                <option value="">"Bitte wählen"</option>
                {move || {
                    options
                        .get()
                        .into_iter()
                        .map(|option| {
                            let selected = value.get_untracked() == option;
                            view! { <option value=option.clone() selected=selected>{option.clone()}</option> }
                        })
                        .collect_view()
                }}
            </select>
        </label>
    }
}

/// Hidden input carrying a list as JSON
#[component]
pub fn HiddenField(id: &'static str) -> impl IntoView {
    let value = field_signal(id);

    view! { <input type="hidden" id=id name=id prop:value=move || value.get() /> }
}
