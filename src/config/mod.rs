//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → CLI overrides (engine, bind address)
//!     → validation.rs (semantic checks)
//!     → CrmConfig (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - All fields have defaults; running without a file is the common case
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{
    CrmConfig, EngineConfig, LimitsConfig, ListenerConfig, ObservabilityConfig, RepositoryConfig,
    TemplateConfig,
};
pub use validation::{validate_config, ValidationError};
