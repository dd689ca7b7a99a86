pub mod api_error;
pub mod call_list_error;
pub mod error_code;
pub mod request_error;
pub mod upstream_error;
pub mod user_error;
