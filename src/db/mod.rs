pub mod google_auth;
pub mod sheets;
pub mod store;
