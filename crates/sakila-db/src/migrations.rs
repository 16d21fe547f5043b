//! Embedded bootstrap schema.
//!
//! The schema is split into SQL files embedded at compile time and applied
//! in order on startup. Applied steps are recorded in `_sakila_migrations`
//! so each one runs at most once per database file. All statements use
//! `IF NOT EXISTS`, which makes the first run against an already populated
//! rental database a no-op apart from the bookkeeping rows.

use rusqlite::Connection;
use thiserror::Error;

/// A single embedded schema step.
struct Migration {
    name: &'static str,
    sql: &'static str,
}

/// All schema steps in dependency order. New steps are appended here.
const MIGRATIONS: &[Migration] = &[
    Migration {
        name: "000_reference",
        sql: include_str!("migrations/000_reference.sql"),
    },
    Migration {
        name: "001_catalog",
        sql: include_str!("migrations/001_catalog.sql"),
    },
    Migration {
        name: "002_stores",
        sql: include_str!("migrations/002_stores.sql"),
    },
    Migration {
        name: "003_rentals",
        sql: include_str!("migrations/003_rentals.sql"),
    },
];

/// Errors that can occur while applying the schema.
#[derive(Debug, Error)]
pub enum MigrationError {
    /// A SQL statement within a migration failed.
    #[error("migration '{name}' failed: {source}")]
    ExecutionFailed {
        /// The name of the migration that failed.
        name: String,
        /// The underlying SQLite error.
        source: rusqlite::Error,
    },

    /// Failed to query migration state.
    #[error("failed to check migration state: {0}")]
    StateQuery(rusqlite::Error),
}

impl MigrationError {
    fn failed(name: &str) -> impl FnOnce(rusqlite::Error) -> Self + '_ {
        move |source| Self::ExecutionFailed {
            name: name.to_string(),
            source,
        }
    }
}

/// Applies every pending schema step and returns how many ran.
///
/// # Errors
///
/// Returns `MigrationError` if a step fails to execute or if the tracking
/// table cannot be queried. A failed step leaves no partial schema behind.
pub fn run_migrations(conn: &Connection) -> Result<usize, MigrationError> {
    apply(conn, MIGRATIONS)
}

fn apply(conn: &Connection, migrations: &[Migration]) -> Result<usize, MigrationError> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS _sakila_migrations (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        );",
    )
    .map_err(MigrationError::failed("_sakila_migrations_bootstrap"))?;

    let mut applied = 0;

    for migration in migrations {
        let done: bool = conn
            .query_row(
                "SELECT EXISTS(SELECT 1 FROM _sakila_migrations WHERE name = ?1)",
                [migration.name],
                |row| row.get(0),
            )
            .map_err(MigrationError::StateQuery)?;

        if done {
            tracing::debug!(migration = migration.name, "schema step already applied");
            continue;
        }

        tracing::info!(migration = migration.name, "applying schema step");

        let tx = conn
            .unchecked_transaction()
            .map_err(MigrationError::failed(migration.name))?;
        tx.execute_batch(migration.sql)
            .map_err(MigrationError::failed(migration.name))?;
        tx.execute(
            "INSERT INTO _sakila_migrations (name) VALUES (?1)",
            [migration.name],
        )
        .map_err(MigrationError::failed(migration.name))?;
        tx.commit().map_err(MigrationError::failed(migration.name))?;

        applied += 1;
    }

    Ok(applied)
}
