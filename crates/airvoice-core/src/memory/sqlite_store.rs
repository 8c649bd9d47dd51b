//! SQLite session storage backend
//!
//! Provides persistent session record storage using SQLite - the default
//! backend for AirVoice.
//!
//! # Usage
//!
//! ```no_run
//! use airvoice_core::memory::SqliteStore;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = SqliteStore::with_table("/path/to/sessions.db", "skill_records").await?;
//! # Ok(())
//! # }
//! ```

use super::{MemoryStore, RedisStore, SessionStore};
use crate::error::{Error, Result};
use crate::session::SessionRecord;
use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, info};

/// Default table name
const DEFAULT_TABLE: &str = "session_records";

/// Table names are interpolated into SQL, so only identifiers are accepted
fn validate_table_name(table: &str) -> Result<()> {
    let mut chars = table.chars();
    let valid = match chars.next() {
        Some(first) => {
            (first.is_ascii_alphabetic() || first == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        None => false,
    };

    if valid {
        Ok(())
    } else {
        Err(Error::Configuration(format!(
            "Invalid table name '{}': use letters, digits, and underscores",
            table
        )))
    }
}

/// SQLite session store
pub struct SqliteStore {
    pool: SqlitePool,
    table: String,
}

impl SqliteStore {
    /// Create a new SQLite store at the specified path
    ///
    /// # Errors
    ///
    /// Returns error if database creation or schema setup fails.
    pub async fn new(path: impl AsRef<Path>) -> Result<Self> {
        Self::with_table(path, DEFAULT_TABLE).await
    }

    /// Create a new SQLite store using a custom table
    pub async fn with_table(path: impl AsRef<Path>, table: &str) -> Result<Self> {
        validate_table_name(table)?;
        let path = path.as_ref();

        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                Error::Storage(format!("Failed to create database directory: {}", e))
            })?;
        }

        let options = SqliteConnectOptions::from_str(&format!("sqlite:{}", path.display()))
            .map_err(|e| Error::Configuration(format!("Invalid SQLite path: {}", e)))?
            .create_if_missing(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .map_err(|e| Error::Storage(format!("Failed to connect to SQLite: {}", e)))?;

        let store = Self {
            pool,
            table: table.to_string(),
        };
        store.init_schema().await?;

        info!(path = %path.display(), table = %table, "SQLite session store initialized");
        Ok(store)
    }

    /// Initialize the database schema
    async fn init_schema(&self) -> Result<()> {
        let statement = format!(
            r#"
            CREATE TABLE IF NOT EXISTS {} (
                user_id TEXT PRIMARY KEY,
                attributes TEXT NOT NULL,
                updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
            )
            "#,
            self.table
        );

        sqlx::query(&statement)
            .execute(&self.pool)
            .await
            .map_err(|e| Error::Storage(format!("Failed to create {} table: {}", self.table, e)))?;

        debug!(table = %self.table, "SQLite session schema initialized");
        Ok(())
    }

    /// Check database health
    pub async fn health_check(&self) -> Result<bool> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| Error::Storage(format!("Health check failed: {}", e)))?;
        Ok(true)
    }
}

#[async_trait]
impl SessionStore for SqliteStore {
    async fn get(&self, user_id: &str) -> Result<Option<SessionRecord>> {
        let query = format!("SELECT attributes FROM {} WHERE user_id = ?", self.table);
        let row: Option<(String,)> = sqlx::query_as(&query)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| Error::Storage(format!("Failed to get session record: {}", e)))?;

        match row {
            Some((data,)) => {
                let record: SessionRecord = serde_json::from_str(&data).map_err(|e| {
                    Error::Internal(format!("Failed to deserialize session record: {}", e))
                })?;
                debug!(user_id = %user_id, "Session record loaded from SQLite");
                Ok(Some(record))
            }
            None => Ok(None),
        }
    }

    async fn save(&self, user_id: &str, record: &SessionRecord) -> Result<()> {
        let data = serde_json::to_string(record)
            .map_err(|e| Error::Internal(format!("Failed to serialize session record: {}", e)))?;

        let now = Utc::now().to_rfc3339();
        let statement = format!(
            r#"
            INSERT INTO {} (user_id, attributes, updated_at)
            VALUES (?, ?, ?)
            ON CONFLICT(user_id) DO UPDATE SET
                attributes = excluded.attributes,
                updated_at = excluded.updated_at
            "#,
            self.table
        );

        sqlx::query(&statement)
            .bind(user_id)
            .bind(&data)
            .bind(&now)
            .execute(&self.pool)
            .await
            .map_err(|e| Error::Storage(format!("Failed to save session record: {}", e)))?;

        debug!(user_id = %user_id, "Session record saved to SQLite");
        Ok(())
    }
}

/// Directory for local data (~/.airvoice)
fn data_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| Error::Configuration("Could not determine home directory".to_string()))?;
    Ok(home.join(".airvoice"))
}

/// Session backend configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionBackendConfig {
    /// Backend type: "sqlite" (default), "redis", or "memory"
    #[serde(default = "default_backend")]
    pub backend: String,

    /// SQLite database path (relative paths resolve under ~/.airvoice)
    #[serde(default = "default_sqlite_path")]
    pub sqlite_path: String,

    /// Table name (SQLite) or key prefix (Redis)
    #[serde(default = "default_table")]
    pub table: String,

    /// Redis URL (only used when backend = "redis")
    #[serde(default)]
    pub redis_url: Option<String>,
}

fn default_backend() -> String {
    "sqlite".to_string()
}

fn default_sqlite_path() -> String {
    "sessions.db".to_string()
}

fn default_table() -> String {
    DEFAULT_TABLE.to_string()
}

impl Default for SessionBackendConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            sqlite_path: default_sqlite_path(),
            table: default_table(),
            redis_url: None,
        }
    }
}

impl SessionBackendConfig {
    /// Resolve the SQLite path against the data directory
    pub fn resolved_sqlite_path(&self) -> Result<PathBuf> {
        let path = PathBuf::from(&self.sqlite_path);
        if path.is_absolute() {
            Ok(path)
        } else {
            Ok(data_dir()?.join(path))
        }
    }
}

/// Unified session backend that wraps different storage implementations
pub enum SessionBackend {
    /// SQLite storage (default)
    Sqlite(SqliteStore),
    /// Redis storage
    Redis(RedisStore),
    /// In-memory storage (for testing only)
    Memory(MemoryStore),
}

impl SessionBackend {
    /// Create a session backend from configuration
    pub async fn from_config(config: &SessionBackendConfig) -> Result<Self> {
        match config.backend.as_str() {
            "sqlite" => {
                let path = config.resolved_sqlite_path()?;
                let store = SqliteStore::with_table(&path, &config.table).await?;
                Ok(Self::Sqlite(store))
            }
            "redis" => {
                let url = config
                    .redis_url
                    .as_deref()
                    .unwrap_or("redis://localhost:6379");
                let prefix = format!("{}:", config.table);
                let store = RedisStore::with_prefix(url, &prefix)?;
                Ok(Self::Redis(store))
            }
            "memory" => Ok(Self::Memory(MemoryStore::new())),
            other => Err(Error::Configuration(format!(
                "Unknown session backend: '{}'. Use 'sqlite', 'redis', or 'memory'.",
                other
            ))),
        }
    }

    /// Backend name for logging
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Sqlite(_) => "sqlite",
            Self::Redis(_) => "redis",
            Self::Memory(_) => "memory",
        }
    }
}

#[async_trait]
impl SessionStore for SessionBackend {
    async fn get(&self, user_id: &str) -> Result<Option<SessionRecord>> {
        match self {
            Self::Sqlite(store) => store.get(user_id).await,
            Self::Redis(store) => store.get(user_id).await,
            Self::Memory(store) => store.get(user_id).await,
        }
    }

    async fn save(&self, user_id: &str, record: &SessionRecord) -> Result<()> {
        match self {
            Self::Sqlite(store) => store.save(user_id, record).await,
            Self::Redis(store) => store.save(user_id, record).await,
            Self::Memory(store) => store.save(user_id, record).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn create_test_store() -> (SqliteStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("test_sessions.db");
        let store = SqliteStore::new(&db_path).await.unwrap();
        (store, temp_dir)
    }

    #[tokio::test]
    async fn test_sqlite_store_basic_operations() {
        let (store, _temp) = create_test_store().await;

        assert!(store.get("user-1").await.unwrap().is_none());

        let record = SessionRecord::with_token("tok");
        store.save("user-1", &record).await.unwrap();
        assert_eq!(store.get("user-1").await.unwrap(), Some(record));

        // Update
        let chosen = SessionRecord::with_token("tok").with_device(2);
        store.save("user-1", &chosen).await.unwrap();
        assert_eq!(store.get("user-1").await.unwrap(), Some(chosen));
    }

    #[tokio::test]
    async fn test_sqlite_store_persists_across_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("reopen.db");

        {
            let store = SqliteStore::with_table(&db_path, "skill_records").await.unwrap();
            store
                .save("user-1", &SessionRecord::with_token("tok").with_device(1))
                .await
                .unwrap();
        }

        let store = SqliteStore::with_table(&db_path, "skill_records").await.unwrap();
        let loaded = store.get("user-1").await.unwrap().unwrap();
        assert_eq!(loaded.device_index, 1);
    }

    #[tokio::test]
    async fn test_sqlite_store_health_check() {
        let (store, _temp) = create_test_store().await;
        assert!(store.health_check().await.unwrap());
    }

    #[tokio::test]
    async fn test_invalid_table_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("bad.db");

        let result = SqliteStore::with_table(&db_path, "records; DROP TABLE x").await;
        assert!(matches!(result, Err(Error::Configuration(_))));
    }

    #[test]
    fn test_validate_table_name() {
        assert!(validate_table_name("session_records").is_ok());
        assert!(validate_table_name("_t1").is_ok());
        assert!(validate_table_name("").is_err());
        assert!(validate_table_name("1abc").is_err());
        assert!(validate_table_name("a-b").is_err());
    }

    #[tokio::test]
    async fn test_session_backend_from_config() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("config_test.db");

        let config = SessionBackendConfig {
            backend: "sqlite".to_string(),
            sqlite_path: db_path.to_string_lossy().to_string(),
            table: "from_config".to_string(),
            redis_url: None,
        };

        let backend = SessionBackend::from_config(&config).await.unwrap();
        assert_eq!(backend.name(), "sqlite");

        backend
            .save("user-1", &SessionRecord::with_token("tok"))
            .await
            .unwrap();
        assert!(backend.get("user-1").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_session_backend_unknown() {
        let config = SessionBackendConfig {
            backend: "dynamodb".to_string(),
            ..Default::default()
        };
        let result = SessionBackend::from_config(&config).await;
        assert!(matches!(result, Err(Error::Configuration(_))));
    }
}
