//! Memory - Session record storage
//!
//! This module persists the per-user [`SessionRecord`](crate::SessionRecord):
//! - SQLite store (default, no external services)
//! - Redis store (optional, for hosted deployments)
//! - In-memory store (development/testing)
//!
//! Every backend is a plain key-value get/put keyed by end-user identity.
//! Records are stored as JSON, verbatim, with no schema migration.

mod sqlite_store;
mod store;

pub use sqlite_store::{SessionBackend, SessionBackendConfig, SqliteStore};
pub use store::{MemoryStore, RedisStore, SessionStore};
