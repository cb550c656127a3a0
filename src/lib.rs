//! Minimal customer-relationship-management backend.
//!
//! CRUD over customers, served by either of two HTTP engines behind one
//! handler set.

// Domain
pub mod customers;

// Serving
pub mod engine;
pub mod http;
pub mod routing;

// Cross-cutting concerns
pub mod config;
pub mod lifecycle;
pub mod observability;

pub use config::CrmConfig;
pub use customers::{CustomerRepository, InMemoryCustomerRepository};
pub use engine::{EngineKind, Server};
pub use http::new_server;
pub use lifecycle::Shutdown;
