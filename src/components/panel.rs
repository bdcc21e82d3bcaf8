//! Collapsible Panel Component

use leptos::prelude::*;

use crate::context::use_app_context;

/// Section whose collapsed state survives reloads
#[component]
pub fn Panel(id: &'static str, #[prop(into)] title: String, children: Children) -> impl IntoView {
    let ctx = use_app_context();
    let collapsed = RwSignal::new(ctx.with_controller(|c| c.is_panel_collapsed(id)));

    view! {
        <section class="panel" id=id class:collapsed=move || collapsed.get()>
            <header
                class="panel-header"
                on:click=move |_| collapsed.set(ctx.with_controller(|c| c.toggle_panel(id)))
            >
                <h2>{title}</h2>
                <span class="panel-toggle">{move || if collapsed.get() { "▸" } else { "▾" }}</span>
            </header>
            <div class="panel-body" style:display=move || if collapsed.get() { "none" } else { "block" }>
                {children()}
            </div>
        </section>
    }
}
