pub mod in_memory_user_service;
pub mod user_service;

pub use in_memory_user_service::*;
pub use user_service::*;
