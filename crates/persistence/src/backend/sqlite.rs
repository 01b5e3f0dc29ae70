// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! `SQLite` connection setup, migrations and catalog helpers.
//!
//! PRAGMA and catalog statements are raw SQL; Diesel has no DSL for them.

use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::sql_types::{BigInt, Integer, Text};
use diesel::{Connection, RunQueryDsl, SqliteConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{debug, info};

use crate::error::PersistenceError;

/// Embedded schema migrations for the employee, simulation and movement tables.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Milliseconds a writer waits on a locked database before failing.
const BUSY_TIMEOUT_MS: u32 = 5_000;

/// Where the simulator's database lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Storage {
    /// A named shared-cache in-memory database.
    Memory,
    /// A database file on disk.
    File,
}

impl Storage {
    /// PRAGMA statements run on every new connection.
    fn pragmas(self) -> Vec<String> {
        let mut pragmas: Vec<String> = vec![
            String::from("PRAGMA foreign_keys = ON"),
            format!("PRAGMA busy_timeout = {BUSY_TIMEOUT_MS}"),
        ];
        if self == Self::File {
            pragmas.push(String::from("PRAGMA journal_mode = WAL"));
            pragmas.push(String::from("PRAGMA synchronous = NORMAL"));
        }
        pragmas
    }
}

#[derive(QueryableByName)]
struct ForeignKeysRow {
    #[diesel(sql_type = Integer)]
    foreign_keys: i32,
}

#[derive(QueryableByName)]
struct TableNameRow {
    #[diesel(sql_type = Text)]
    name: String,
}

/// Opens a connection, configures it for `storage` and applies pending
/// migrations.
///
/// # Errors
///
/// Returns an error if the connection cannot be opened, a PRAGMA fails,
/// a migration fails or foreign keys end up disabled.
pub fn open(database_url: &str, storage: Storage) -> Result<SqliteConnection, PersistenceError> {
    info!(database_url, ?storage, "Opening simulator database");

    let mut conn: SqliteConnection = SqliteConnection::establish(database_url)?;

    for pragma in storage.pragmas() {
        diesel::sql_query(&pragma)
            .execute(&mut conn)
            .map_err(|e| PersistenceError::QueryFailed(format!("{pragma}: {e}")))?;
    }

    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| PersistenceError::MigrationFailed(e.to_string()))?;
    debug!(migrations = applied.len(), "Applied pending migrations");

    verify_foreign_key_enforcement(&mut conn)?;
    Ok(conn)
}

/// Returns the row id assigned by the most recent insert on this connection.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn get_last_insert_rowid(conn: &mut SqliteConnection) -> Result<i64, PersistenceError> {
    Ok(diesel::select(sql::<BigInt>("last_insert_rowid()")).get_result(conn)?)
}

/// Checks that `SQLite` enforces foreign keys on this connection.
///
/// Movement rows rely on `ON DELETE CASCADE` and on employee references
/// being checked, so a connection without enforcement is unusable.
///
/// # Errors
///
/// Returns [`PersistenceError::ForeignKeyEnforcementNotEnabled`] if
/// enforcement is off, or a database error if the PRAGMA fails.
pub fn verify_foreign_key_enforcement(conn: &mut SqliteConnection) -> Result<(), PersistenceError> {
    let row: ForeignKeysRow = diesel::sql_query("PRAGMA foreign_keys").get_result(conn)?;
    if row.foreign_keys == 0 {
        return Err(PersistenceError::ForeignKeyEnforcementNotEnabled);
    }
    Ok(())
}

/// Lists the application tables in the connected database, sorted by name.
///
/// # Errors
///
/// Returns an error if the catalog query fails.
pub fn list_tables(conn: &mut SqliteConnection) -> Result<Vec<String>, PersistenceError> {
    let rows: Vec<TableNameRow> = diesel::sql_query(
        "SELECT name FROM sqlite_master WHERE type = 'table' \
         AND name NOT LIKE 'sqlite_%' AND name != '__diesel_schema_migrations' ORDER BY name",
    )
    .load(conn)?;
    Ok(rows.into_iter().map(|row| row.name).collect())
}
