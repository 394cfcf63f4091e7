pub mod error_mapper;

pub use error_mapper::{map_action_error, map_file_load_error, map_file_save_error};
