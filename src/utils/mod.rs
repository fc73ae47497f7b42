//! Utility module
//!
//! Error types and logging helpers shared across the crate

pub mod error;
pub mod logging;

pub use error::{AppError, AppResult, FetchError};
