//! Database layer for the clinic workspace.
//!
//! Provides SQLite connection pooling (via `r2d2`), WAL-mode initialization,
//! and embedded SQL migrations for the `clients`, `pets`, and `appointments`
//! tables. Record-level access lives in `clinic-appointments`; this crate only
//! hands out connections and keeps the schema current.

mod migrations;
mod pool;

pub use migrations::{run_migrations, MigrationError};
pub use pool::{create_pool, DbPool, DbRuntimeSettings, PoolError, IN_MEMORY_PATH};
