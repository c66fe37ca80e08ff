//! Configuration source error types.

use thiserror::Error;

/// Errors a configuration backend can report.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// No configuration exists for the store.
    #[error("Store not found: {0}")]
    StoreNotFound(String),

    /// The backing store failed.
    #[error("Configuration backend error: {0}")]
    Backend(String),
}
