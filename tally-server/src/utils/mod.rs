//! Utility module
//!
//! - [`AppError`] / [`AppResult`] - boundary error type and handler Result
//! - [`logger`] - tracing setup

pub mod error;
pub mod logger;

pub use error::{AppError, AppResult, ErrorBody};
