//! Session storage backends
//!
//! Provides both in-memory and Redis-backed session record storage.
//!
//! # Security Considerations
//!
//! Records contain the user's AirGradient API token. `MemoryStore` keeps
//! them only for the life of the process; `RedisStore` should be used with
//! Redis AUTH and TLS in production.

use crate::error::{Error, Result};
use crate::session::SessionRecord;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Check if running in production environment
fn is_production() -> bool {
    std::env::var("AIRVOICE_ENV")
        .map(|v| v.to_lowercase() == "production")
        .unwrap_or(false)
}

/// Session store trait for abstracting storage backends
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Load the record of a user, if one was ever saved
    async fn get(&self, user_id: &str) -> Result<Option<SessionRecord>>;

    /// Save (insert or replace) the record of a user
    async fn save(&self, user_id: &str, record: &SessionRecord) -> Result<()>;
}

/// In-memory session store (for development/testing)
///
/// Data is lost on restart. Use `SqliteStore` or `RedisStore` for
/// deployments.
#[derive(Default, Clone)]
pub struct MemoryStore {
    records: Arc<RwLock<HashMap<String, SessionRecord>>>,
}

impl MemoryStore {
    /// Create a new memory store
    #[must_use]
    pub fn new() -> Self {
        if is_production() {
            warn!(
                "MemoryStore is being used in production. \
                 Session records will not persist across restarts."
            );
        } else {
            info!("Initializing MemoryStore for session records");
        }
        Self::default()
    }

    /// Number of stored records
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Whether no record has been stored
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl SessionStore for MemoryStore {
    async fn get(&self, user_id: &str) -> Result<Option<SessionRecord>> {
        let records = self.records.read().await;
        Ok(records.get(user_id).cloned())
    }

    async fn save(&self, user_id: &str, record: &SessionRecord) -> Result<()> {
        let mut records = self.records.write().await;
        records.insert(user_id.to_string(), record.clone());
        debug!(user_id = %user_id, "Session record saved to memory");
        Ok(())
    }
}

/// Redis-backed session store
///
/// Records never expire: they are the durable source of truth for a
/// user's setup. Keys are `{prefix}{user_id}`.
pub struct RedisStore {
    client: redis::Client,
    /// Key prefix for record keys
    prefix: String,
}

impl RedisStore {
    /// Create a new Redis store with the default `airvoice:session:` prefix
    ///
    /// # Errors
    ///
    /// Returns error if Redis URL is invalid
    pub fn new(redis_url: &str) -> Result<Self> {
        Self::with_prefix(redis_url, "airvoice:session:")
    }

    /// Create with a custom key prefix
    ///
    /// # Errors
    ///
    /// Returns error if Redis URL is invalid
    pub fn with_prefix(redis_url: &str, prefix: &str) -> Result<Self> {
        let client =
            redis::Client::open(redis_url).map_err(|e| Error::Configuration(e.to_string()))?;

        Ok(Self {
            client,
            prefix: prefix.to_string(),
        })
    }

    /// Build the full Redis key
    fn build_key(&self, user_id: &str) -> String {
        format!("{}{}", self.prefix, user_id)
    }

    /// Get an async connection
    async fn get_connection(&self) -> Result<redis::aio::MultiplexedConnection> {
        self.client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| Error::Storage(format!("Redis connection failed: {}", e)))
    }
}

#[async_trait]
impl SessionStore for RedisStore {
    async fn get(&self, user_id: &str) -> Result<Option<SessionRecord>> {
        let mut conn = self.get_connection().await?;
        let key = self.build_key(user_id);

        let data: Option<String> = redis::cmd("GET")
            .arg(&key)
            .query_async(&mut conn)
            .await
            .map_err(|e| Error::Storage(format!("Redis GET failed: {}", e)))?;

        match data {
            Some(json) => {
                let record: SessionRecord = serde_json::from_str(&json).map_err(|e| {
                    Error::Internal(format!("Failed to deserialize session record: {}", e))
                })?;
                debug!(user_id = %user_id, "Session record loaded from Redis");
                Ok(Some(record))
            }
            None => Ok(None),
        }
    }

    async fn save(&self, user_id: &str, record: &SessionRecord) -> Result<()> {
        let mut conn = self.get_connection().await?;
        let key = self.build_key(user_id);

        let json = serde_json::to_string(record)
            .map_err(|e| Error::Internal(format!("Failed to serialize session record: {}", e)))?;

        redis::cmd("SET")
            .arg(&key)
            .arg(&json)
            .query_async::<()>(&mut conn)
            .await
            .map_err(|e| Error::Storage(format!("Redis SET failed: {}", e)))?;

        debug!(user_id = %user_id, "Session record saved to Redis");
        Ok(())
    }
}
