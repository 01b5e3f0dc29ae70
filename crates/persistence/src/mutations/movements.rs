// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::debug;

use crate::diesel_schema::movements;
use crate::error::PersistenceError;
use crate::records::MovementRecord;

/// Deletes every movement record of a simulation.
///
/// Returns the number of deleted records.
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn delete_movements_for_simulation(
    conn: &mut SqliteConnection,
    simulation_id: i64,
) -> Result<usize, PersistenceError> {
    let deleted: usize =
        diesel::delete(movements::table.filter(movements::simulation_id.eq(simulation_id)))
            .execute(conn)?;
    debug!(simulation_id, deleted, "Deleted movement records");
    Ok(deleted)
}

/// Inserts a single movement record.
///
/// # Errors
///
/// Returns an error if the insert fails, e.g. on a duplicate order or an
/// employee id that does not exist.
pub fn insert_movement_record(
    conn: &mut SqliteConnection,
    record: &MovementRecord,
) -> Result<(), PersistenceError> {
    diesel::insert_into(movements::table)
        .values(record)
        .execute(conn)?;
    Ok(())
}
