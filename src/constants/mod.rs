//! Application constants module.
//!
//! Centralizes the fixed error messages returned to clients and the
//! collection names used by the MongoDB adapter.

pub mod collections;
pub mod errors;

pub use collections::*;
pub use errors::*;
