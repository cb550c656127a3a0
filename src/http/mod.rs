//! Customer HTTP API.
//!
//! # Data Flow
//! ```text
//! Engine (axum / hyper)
//!     → server.rs (route table: verb + colon pattern → handler)
//!     → handlers.rs (read params/body via HttpEngine)
//!     → CustomerRepository (under the shared lock)
//!     → status + JSON body (error.rs for failures)
//! ```
//!
//! # Design Decisions
//! - Handlers are stateless apart from the shared repository handle
//! - NotFound → 404, malformed body → 400, both as `{"message": ...}`

pub mod error;
pub mod handlers;
pub mod server;

pub use error::ResponseError;
pub use handlers::CrmApp;
pub use server::new_server;
