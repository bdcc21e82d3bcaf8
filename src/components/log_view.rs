use leptos::prelude::*;

/// Recent log lines for support requests, read on demand
#[component]
pub fn LogView() -> impl IntoView {
    let (lines, set_lines) = signal(Vec::<String>::new());

    view! {
        <details class="log-view" on:toggle=move |_| set_lines.set(rolling_logger::recent_lines())>
            <summary>"Protokoll"</summary>
            <pre>{move || lines.get().join("\n")}</pre>
        </details>
    }
}
