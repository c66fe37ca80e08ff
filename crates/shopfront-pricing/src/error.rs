//! Pricing engine error types.
//!
//! Ineligibility of a discount is not an error: it is a normal
//! [`crate::discount::Eligibility::Ineligible`] outcome. The variants here
//! cover unknown references and malformed input, both fatal to the single
//! request and never retried inside the engine.

use thiserror::Error;

/// Errors that can occur while pricing a cart.
#[derive(Error, Debug)]
pub enum PricingError {
    /// No discount with the given code exists in the snapshot.
    #[error("Discount not found: {0}")]
    DiscountNotFound(String),

    /// Input failed shape validation before any business logic ran.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Quantity must be at least 1.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// Currency mismatch between inputs.
    #[error("Currency mismatch: expected {expected}, got {got}")]
    CurrencyMismatch { expected: String, got: String },

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,
}
