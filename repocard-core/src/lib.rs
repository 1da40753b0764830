//! Repocard Core - Shared data structures, errors, and configuration
//!
//! This module defines the types that the stats resolver and the web layer
//! agree on: repository references, computed statistics, the error taxonomy,
//! and the service configuration.

pub mod config;
pub mod error;
pub mod types;

pub use config::*;
pub use error::*;
pub use types::*;
