//! Database layer for the Sakila rental service.
//!
//! Provides SQLite connection pooling (via `r2d2`) and the embedded bootstrap
//! schema. The service does not own the schema of an existing rental
//! database: every bootstrap statement is `CREATE ... IF NOT EXISTS`, so a
//! pre-populated database file is left as it is while a fresh file (or an
//! in-memory test database) gets the tables the handlers query.
//!
//! Handlers acquire one pooled connection per request and release it before
//! responding; nothing else is shared between requests.

mod migrations;
mod pool;

pub use migrations::{run_migrations, MigrationError};
pub use pool::{create_pool, DbPool, DbRuntimeSettings, PoolError, IN_MEMORY_PATH};
