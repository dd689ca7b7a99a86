pub mod sheet_repository;
pub mod user_repository;
