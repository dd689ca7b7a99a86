pub mod auth_service;
pub mod call_list_service;
pub mod progress_service;
