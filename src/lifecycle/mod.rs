//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Config → Templates → Repository → Engine + routes → Listener
//!
//! Shutdown (shutdown.rs / signals.rs):
//!     Ctrl+C or Shutdown::trigger → stop accepting → exit
//! ```
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Request handling never terminates the process

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::Shutdown;
