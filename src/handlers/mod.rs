//! HTTP request handlers organized by domain.

pub mod user_handler;

pub use user_handler::*;
