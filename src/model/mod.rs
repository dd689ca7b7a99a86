pub mod call_record;
pub mod user;
