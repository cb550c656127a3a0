//! Routing subsystem for the bare hyper engine.
//!
//! # Data Flow
//! ```text
//! Incoming Request (method, path)
//!     → router.rs (route table lookup)
//!     → matcher.rs (colon-pattern segment match, capture params)
//!     → Return: Found(handler, params) | MethodNotAllowed | NotFound
//!
//! Route Compilation (at registration):
//!     "/customers/:id"
//!     → split into literal / parameter segments
//!     → appended to the table in registration order
//! ```
//!
//! # Design Decisions
//! - Patterns use colon syntax natively, no rewrite needed
//! - No regex; matching is a segment-by-segment comparison
//! - First registered match wins
//! - A path known under another method is reported as 405, not 404

pub mod matcher;
pub mod router;

pub use matcher::{PathParams, PathPattern};
pub use router::{RouteMatch, RouteTable};
