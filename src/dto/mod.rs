pub mod auth_dto;
pub mod call_list_dto;
pub mod progress_dto;
