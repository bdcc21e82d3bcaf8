//! UI Components
//!
//! Leptos components of the time-record form.

mod delete_confirm_button;
mod entry_table;
mod form_field;
mod log_view;
mod panel;
mod profile_panel;
mod services_panel;
mod summary_bar;
mod work_times_panel;

pub use delete_confirm_button::DeleteConfirmButton;
pub use entry_table::EntryTable;
pub use form_field::{DateField, HiddenField, SelectField, TextField, TimeField};
pub use log_view::LogView;
pub use panel::Panel;
pub use profile_panel::ProfilePanel;
pub use services_panel::ServicesPanel;
pub use summary_bar::SummaryBar;
pub use work_times_panel::WorkTimesPanel;
