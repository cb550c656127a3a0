//! Repository error definitions.

use thiserror::Error;

/// Message surfaced to clients when an identifier is unknown.
pub const NOT_FOUND_MESSAGE: &str = "Customer not found";

/// Errors returned by a [`CustomerRepository`](super::CustomerRepository).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    /// No customer with the requested identifier exists.
    #[error("Customer not found")]
    NotFound,
}
