pub mod user_service;
pub mod user_store;

pub use user_service::*;
pub use user_store::*;
