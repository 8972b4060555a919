//! Configuration validation
//!
//! Rejects configurations that would fail later, before any stage runs.

mod error;
mod validator;

#[cfg(test)]
mod tests;

pub use error::ValidationError;
pub use validator::validate_config;
