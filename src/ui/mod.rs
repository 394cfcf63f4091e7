pub mod formatting;
pub mod status;
pub mod updates;

pub use status::{set_status, show_error, StatusLevel};
pub use updates::{print_events, print_json, print_query, print_sidebar};
