//! Entry Table Component
//!
//! Renders the rows of one list from the lists store.

use leptos::prelude::*;

use crate::components::DeleteConfirmButton;
use crate::context::use_app_context;
use crate::models::{ListKind, RowView};
use crate::store::{rows, use_lists_store};

#[component]
pub fn EntryTable(kind: ListKind, headers: &'static [&'static str]) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_lists_store();
    let indexed_rows = move || rows(store, kind).into_iter().enumerate().collect::<Vec<_>>();

    view! {
        <table class="entry-table">
            <thead>
                <tr>
                    {headers.iter().map(|h| view! { <th>{*h}</th> }).collect_view()}
                    <th></th>
                </tr>
            </thead>
            <tbody>
                <For
                    each=indexed_rows
                    // Position is part of the key, delete targets the index
                    key=|(index, row)| (*index, row.clone())
                    children=move |(index, row): (usize, RowView)| {
                        let badge = row.badge;
                        view! {
                            <tr class:weekend=row.weekend>
                                {row
                                    .cells
                                    .into_iter()
                                    .enumerate()
                                    .map(|(cell, text)| match badge {
                                        Some((at, rate)) if at == cell => {
                                            view! { <td><span class=format!("badge {}", rate.css_class())>{text}</span></td> }.into_any()
                                        }
                                        _ => view! { <td>{text}</td> }.into_any(),
                                    })
                                    .collect_view()}
                                <td class="row-actions">
                                    <DeleteConfirmButton on_confirm=move |_| {
                                        ctx.with_controller(|c| c.remove(kind, index));
                                    } />
                                </td>
                            </tr>
                        }
                    }
                />
            </tbody>
        </table>
        <Show when=move || rows(store, kind).is_empty()>
            <p class="empty-hint">"Noch keine Einträge für diesen Monat."</p>
        </Show>
    }
}
