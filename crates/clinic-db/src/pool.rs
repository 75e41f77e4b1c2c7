//! Connection pool creation and configuration.

use std::sync::atomic::{AtomicU64, Ordering};

use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{Connection, OpenFlags};
use thiserror::Error;

/// Path value that selects an in-memory database.
pub const IN_MEMORY_PATH: &str = ":memory:";

static NEXT_MEMORY_DB: AtomicU64 = AtomicU64::new(0);

/// Runtime tunables for SQLite connection behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DbRuntimeSettings {
    /// Busy timeout for SQLite connections, in milliseconds.
    pub busy_timeout_ms: u64,

    /// Maximum number of pooled SQLite connections.
    pub pool_max_size: u32,
}

impl Default for DbRuntimeSettings {
    fn default() -> Self {
        Self {
            busy_timeout_ms: 5_000,
            pool_max_size: 8,
        }
    }
}

/// The shared SQLite connection pool handed to record stores.
pub type DbPool = Pool<SqliteConnectionManager>;

/// Errors that can occur when creating the database pool.
#[derive(Debug, Error)]
pub enum PoolError {
    /// Failed to build the connection pool.
    #[error("failed to create database connection pool: {0}")]
    PoolInit(#[from] r2d2::Error),
}

/// Creates a connection pool with WAL mode, foreign keys, and the configured
/// busy timeout applied to every connection.
///
/// `db_path` is either a file path or [`IN_MEMORY_PATH`]. A plain `:memory:`
/// connection would give every pooled connection its own empty database, so
/// the in-memory case opens a named shared-cache database instead. It is
/// private to the returned pool and lives as long as one of its connections
/// is open.
///
/// # Errors
///
/// Returns `PoolError::PoolInit` if the connection pool cannot be created.
pub fn create_pool(db_path: &str, settings: DbRuntimeSettings) -> Result<DbPool, PoolError> {
    let (target, flags) = if db_path == IN_MEMORY_PATH {
        let name = format!(
            "file:clinic-mem-{}-{}?mode=memory&cache=shared",
            std::process::id(),
            NEXT_MEMORY_DB.fetch_add(1, Ordering::Relaxed)
        );
        (name, OpenFlags::SQLITE_OPEN_URI)
    } else {
        (db_path.to_string(), OpenFlags::empty())
    };

    let manager = SqliteConnectionManager::file(&target)
        .with_flags(
            flags
                | OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_CREATE
                | OpenFlags::SQLITE_OPEN_FULL_MUTEX,
        )
        .with_init(move |conn| configure_connection(conn, settings));

    let pool = Pool::builder()
        .max_size(settings.pool_max_size)
        .build(manager)?;

    tracing::debug!(
        path = db_path,
        uri = %target,
        max_size = settings.pool_max_size,
        "created database pool"
    );

    Ok(pool)
}

/// Per-connection setup run by the pool whenever it opens a connection.
fn configure_connection(conn: &mut Connection, settings: DbRuntimeSettings) -> rusqlite::Result<()> {
    // In-memory databases report "memory" rather than "wal".
    let journal_mode: String = conn.query_row("PRAGMA journal_mode = WAL;", [], |row| row.get(0))?;
    if journal_mode != "wal" && journal_mode != "memory" {
        return Err(rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_ERROR),
            Some(format!("unexpected journal mode: {journal_mode}")),
        ));
    }
    conn.execute_batch(&format!(
        "PRAGMA foreign_keys = ON;
         PRAGMA busy_timeout = {};",
        settings.busy_timeout_ms
    ))
}
