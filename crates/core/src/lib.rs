//! # CareMatch Core
//!
//! Shared plumbing for CareMatch services.
//!
//! ## Modules
//!
//! - `config`: Configuration loading and validation
//! - `database`: Shared PostgreSQL connection pool
//! - `error`: Error types
//! - `observability`: Structured logging with optional daily file rotation
//! - `validation`: Input validation helpers

pub mod config;
pub mod database;
pub mod error;
pub mod observability;
pub mod validation;

pub use config::{load_dotenv, parse_env_var, ConfigLoader, DatabaseConfig, ServiceConfig};
pub use database::DatabasePool;
pub use error::CoreError;
pub use observability::{init_logging, LogConfig};
pub use validation::{validate_email, validate_filter_id, validate_string_length};

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, CoreError>;
