//! Commerce error types.
//!
//! Cart mutations never fail; these errors come from explicit flushes and
//! from the checkout hand-off.

use thiserror::Error;

/// Errors that can occur in e-commerce operations.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Checkout was attempted with nothing in the cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// Customer or order data failed validation.
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Order submission was rejected or failed.
    #[error("Order submission failed: {0}")]
    SubmissionFailed(String),

    /// Persisted storage error.
    #[error("Cache error: {0}")]
    CacheError(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<fishmarket_cache::CacheError> for CommerceError {
    fn from(e: fishmarket_cache::CacheError) -> Self {
        CommerceError::CacheError(e.to_string())
    }
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::SerializationError(e.to_string())
    }
}
