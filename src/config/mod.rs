//! Configuration management.
//!
//! # Data Flow
//! ```text
//! config file (JSON)
//!     → loader.rs (read & deserialize into the caller's type)
//!     → schema.rs (the recognized service schema)
//!     → immutable once loaded
//! ```
//!
//! # Design Decisions
//! - The loader is generic: generated projects load their own config types
//! - All schema fields have defaults to allow minimal configs
//! - A missing or malformed config file is fatal at startup

pub mod loader;
pub mod schema;

pub use loader::{load_config, ConfigError};
pub use schema::ServiceConfig;
