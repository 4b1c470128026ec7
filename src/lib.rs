pub mod catalog;
pub mod config;
pub mod error;
pub mod grading;
pub mod logger;
pub mod models;
pub mod session;
pub mod ui;
pub mod utils;
pub mod widgets;

#[cfg(test)]
mod ui_tests;

// Re-exports for convenience
pub use catalog::{load_embedded, load_from_path, Catalog, ItemContent};
pub use config::WorksheetConfig;
pub use error::ContentError;
pub use grading::{grade_session, Verdict, WorksheetResult};
pub use models::AppState;
pub use session::{
    handle_menu_input, handle_quit_confirm_input, handle_summary_input, handle_worksheet_input,
    ItemState, WorksheetSession,
};
pub use ui::{draw_menu, draw_quit_confirmation, draw_summary, draw_worksheet};
pub use utils::calculate_wrapped_cursor_position;
