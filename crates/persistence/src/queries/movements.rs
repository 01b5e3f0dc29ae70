// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;

use crate::diesel_schema::movements;
use crate::error::PersistenceError;
use crate::records::MovementRecord;

/// Loads the movement records of a simulation in order.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn load_movement_records(
    conn: &mut SqliteConnection,
    simulation_id: i64,
) -> Result<Vec<MovementRecord>, PersistenceError> {
    Ok(movements::table
        .filter(movements::simulation_id.eq(simulation_id))
        .order(movements::sequence.asc())
        .select(MovementRecord::as_select())
        .load(conn)?)
}
