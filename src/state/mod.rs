pub mod auth_state;
pub mod call_list_state;
pub mod progress_state;
