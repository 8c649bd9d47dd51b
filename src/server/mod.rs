//! Server module for AirVoice
//!
//! Contains the main server initialization and runtime logic.
//!
//! # Module Structure
//!
//! - `config`: Configuration structures for all server components
//! - `loader`: Configuration loading from files and environment
//! - `validation`: Production configuration validation
//! - `shutdown`: Ctrl+C / SIGTERM handling
//! - `init`: Main server initialization and run loop

pub mod config;
mod init;
mod loader;
mod shutdown;
mod validation;

// Re-export public API
pub use init::{build_router, build_skill, run};
pub use loader::load_config;
