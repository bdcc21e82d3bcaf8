//! List Render Store
//!
//! Rows of both lists, as last rendered by the controller. Uses
//! reactive_stores so each table only tracks its own list.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::models::{ListKind, RowView};
use crate::ports::ListView;

#[derive(Clone, Debug, Default, Store)]
pub struct ListsState {
    pub services: Vec<RowView>,
    pub work_times: Vec<RowView>,
}

pub type ListsStore = Store<ListsState>;

/// Get the lists store from context
pub fn use_lists_store() -> ListsStore {
    expect_context::<ListsStore>()
}

/// `ListView` writing into the store
pub struct StoreListView {
    store: ListsStore,
}

impl StoreListView {
    pub fn new(store: ListsStore) -> Self {
        Self { store }
    }
}

impl ListView for StoreListView {
    fn render(&self, kind: ListKind, rows: Vec<RowView>) {
        match kind {
            ListKind::Services => *self.store.services().write() = rows,
            ListKind::WorkTimes => *self.store.work_times().write() = rows,
        }
    }
}

/// Rows of one list, tracked
pub fn rows(store: ListsStore, kind: ListKind) -> Vec<RowView> {
    match kind {
        ListKind::Services => store.services().get(),
        ListKind::WorkTimes => store.work_times().get(),
    }
}
