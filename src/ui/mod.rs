pub mod layout;
mod menu;
mod summary;
mod worksheet;

pub use layout::{calculate_summary_chunks, calculate_worksheet_chunks};
pub use menu::draw_menu;
pub use summary::draw_summary;
pub use worksheet::{draw_quit_confirmation, draw_worksheet};
