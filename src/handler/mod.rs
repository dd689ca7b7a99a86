pub mod auth_handler;
pub mod call_list_handler;
pub mod progress_handler;
pub mod status_handler;
