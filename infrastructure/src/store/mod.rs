//! SQLite persistence
//!
//! Embedded database using rusqlite with r2d2 connection pooling. Each
//! repository adapter holds a pool handle and implements the corresponding
//! application-layer port; rusqlite is synchronous, so adapters run their
//! statements on the runtime's blocking pool via [`with_conn`]. The
//! `UNIQUE(article_id, persona_id)` constraint on the perspectives table is
//! the concurrency backstop for batch generation.

pub mod article_store;
pub mod persona_store;
pub mod perspective_store;

pub use article_store::SqliteArticleRepository;
pub use persona_store::SqlitePersonaRepository;
pub use perspective_store::SqlitePerspectiveRepository;

use chrono::{DateTime, Utc};
use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use std::path::Path;
use vantage_application::StoreError;

/// Type alias for the connection pool
pub type DbPool = Pool<SqliteConnectionManager>;

/// Database handle owning the connection pool and schema
#[derive(Clone)]
pub struct Database {
    pool: DbPool,
}

impl Database {
    /// Open (or create) the database file and initialize the schema.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| StoreError::Backend(e.to_string()))?;
            }
        }

        // The busy timeout lets a second writer wait for the file lock and
        // then surface the real constraint outcome instead of SQLITE_BUSY.
        let manager = SqliteConnectionManager::file(path).with_init(|conn| {
            conn.busy_timeout(std::time::Duration::from_secs(5))?;
            conn.execute_batch("PRAGMA foreign_keys = ON")
        });
        let pool = Pool::builder()
            .max_size(10)
            .build(manager)
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        let db = Self { pool };
        db.init_schema()?;
        Ok(db)
    }

    /// A cloneable handle for repository construction.
    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }

    fn init_schema(&self) -> Result<(), StoreError> {
        let conn = self.pool.get().map_err(pool_error)?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS personas (
                id TEXT PRIMARY KEY,
                slug TEXT NOT NULL UNIQUE,
                name TEXT NOT NULL,
                title TEXT NOT NULL,
                description TEXT NOT NULL,
                image_url TEXT,
                traits TEXT NOT NULL,
                speaking_style TEXT NOT NULL,
                expertise TEXT NOT NULL,
                quirks TEXT NOT NULL,
                category TEXT NOT NULL,
                active INTEGER NOT NULL DEFAULT 1,
                created_at TEXT NOT NULL
            )",
            [],
        )
        .map_err(store_error)?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS articles (
                id TEXT PRIMARY KEY,
                slug TEXT NOT NULL UNIQUE,
                title TEXT NOT NULL,
                summary TEXT NOT NULL,
                content TEXT NOT NULL,
                image_url TEXT,
                category TEXT NOT NULL,
                tags TEXT NOT NULL,
                published INTEGER NOT NULL DEFAULT 0,
                featured INTEGER NOT NULL DEFAULT 0,
                published_at TEXT,
                author TEXT NOT NULL,
                created_at TEXT NOT NULL
            )",
            [],
        )
        .map_err(store_error)?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS perspectives (
                id TEXT PRIMARY KEY,
                article_id TEXT NOT NULL,
                persona_id TEXT NOT NULL,
                headline TEXT NOT NULL,
                content TEXT NOT NULL,
                key_points TEXT NOT NULL,
                sentiment TEXT NOT NULL,
                generated INTEGER NOT NULL DEFAULT 1,
                created_at TEXT NOT NULL,
                UNIQUE(article_id, persona_id),
                FOREIGN KEY (article_id) REFERENCES articles(id) ON DELETE CASCADE,
                FOREIGN KEY (persona_id) REFERENCES personas(id) ON DELETE CASCADE
            )",
            [],
        )
        .map_err(store_error)?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_perspectives_article
             ON perspectives(article_id)",
            [],
        )
        .map_err(store_error)?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_perspectives_persona
             ON perspectives(persona_id, created_at DESC)",
            [],
        )
        .map_err(store_error)?;

        Ok(())
    }
}

/// Run a statement closure against a pooled connection on the blocking pool,
/// keeping SQLite file I/O off the async workers.
pub(crate) async fn with_conn<T, F>(pool: &DbPool, f: F) -> Result<T, StoreError>
where
    T: Send + 'static,
    F: FnOnce(&rusqlite::Connection) -> Result<T, StoreError> + Send + 'static,
{
    let pool = pool.clone();
    tokio::task::spawn_blocking(move || {
        let conn = pool.get().map_err(pool_error)?;
        f(&conn)
    })
    .await
    .map_err(|e| StoreError::Backend(e.to_string()))?
}

/// Convert a caller-supplied row cap into a SQL `LIMIT` bind. Values past
/// `i64::MAX` saturate; a raw cast would wrap negative, which SQLite reads
/// as "no limit".
pub(crate) fn sql_limit(limit: usize) -> i64 {
    i64::try_from(limit).unwrap_or(i64::MAX)
}

/// Map a rusqlite error to the port error, surfacing constraint rejections
/// as [`StoreError::Duplicate`].
pub(crate) fn store_error(e: rusqlite::Error) -> StoreError {
    match &e {
        rusqlite::Error::SqliteFailure(err, _)
            if err.code == rusqlite::ErrorCode::ConstraintViolation =>
        {
            StoreError::Duplicate
        }
        _ => StoreError::Backend(e.to_string()),
    }
}

pub(crate) fn pool_error(e: r2d2::Error) -> StoreError {
    StoreError::Backend(e.to_string())
}

/// Wrap a domain/serde/chrono parse failure so it can flow out of a
/// `query_map` row closure.
pub(crate) fn conversion_error<E>(e: E) -> rusqlite::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
}

pub(crate) fn encode_list(items: &[String]) -> Result<String, StoreError> {
    serde_json::to_string(items).map_err(|e| StoreError::Backend(e.to_string()))
}

pub(crate) fn decode_list(raw: &str) -> Result<Vec<String>, rusqlite::Error> {
    serde_json::from_str(raw).map_err(conversion_error)
}

pub(crate) fn encode_timestamp(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

pub(crate) fn decode_timestamp(raw: &str) -> Result<DateTime<Utc>, rusqlite::Error> {
    DateTime::parse_from_rfc3339(raw)
        .map(|d| d.with_timezone(&Utc))
        .map_err(conversion_error)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_creates_schema_idempotently() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.db");

        let db = Database::open(&path).unwrap();
        // Re-opening an existing database must not fail
        drop(db);
        Database::open(&path).unwrap();
    }

    #[test]
    fn test_timestamp_round_trip() {
        let now = Utc::now();
        let decoded = decode_timestamp(&encode_timestamp(&now)).unwrap();
        assert_eq!(decoded, now);
    }

    #[test]
    fn test_sql_limit_saturates_instead_of_wrapping() {
        assert_eq!(sql_limit(0), 0);
        assert_eq!(sql_limit(10), 10);
        assert_eq!(sql_limit(usize::MAX), i64::MAX);
    }
}
