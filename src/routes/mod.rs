pub mod auth;
pub mod call_list;
pub mod progress;
pub mod root;
