//! Core business logic for mypoll-rs.

pub mod category;
pub mod services;

pub use category::Category;
pub use services::*;
