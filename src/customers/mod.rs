//! Customer domain subsystem.
//!
//! # Data Flow
//! ```text
//! HTTP handler (decoded DTO)
//!     → repository.rs (lookup / mutate by identifier)
//!     → model.rs (Customer record, stored in insertion order)
//!     → Result<Customer, RepositoryError> back to the handler
//! ```
//!
//! # Design Decisions
//! - Identifiers are assigned by the repository, never by the caller
//! - Partial updates only overwrite fields that are present
//! - The in-memory store has no locking of its own; callers share it
//!   through `SharedRepository`

pub mod error;
pub mod model;
pub mod repository;

pub use error::RepositoryError;
pub use model::{CreateCustomer, Customer, UpdateCustomer};
pub use repository::{CustomerRepository, InMemoryCustomerRepository, SharedRepository};
