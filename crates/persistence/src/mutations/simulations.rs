// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Simulation mutations.
//!
//! Multi-step operations (`save_chain`, `duplicate_simulation`,
//! `finalize_simulation`) run inside a single transaction. Any failure
//! rolls back every step.

use diesel::SqliteConnection;
use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::sql_types::Text;
use paysim::lifecycle::{duplicate, validate_status_transition};
use paysim_domain::{MovementEvent, Simulation, SimulationStatus};
use tracing::{debug, info};

use crate::backend::sqlite::get_last_insert_rowid;
use crate::data_models::{SimulationRecord, StoredSimulation};
use crate::diesel_schema::simulations;
use crate::error::PersistenceError;
use crate::mutations::movements::{delete_movements_for_simulation, insert_movement_record};
use crate::queries::simulations::{get_simulation, get_simulation_record};
use crate::records::{MovementRecord, to_records};

/// Creates a new, empty draft simulation.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn create_simulation(
    conn: &mut SqliteConnection,
    name: &str,
    description: Option<&str>,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(simulations::table)
        .values((
            simulations::name.eq(name),
            simulations::description.eq(description),
            simulations::status.eq(SimulationStatus::Draft.as_str()),
        ))
        .execute(conn)?;

    let simulation_id: i64 = get_last_insert_rowid(conn)?;
    info!(simulation_id, name, "Created simulation");
    Ok(simulation_id)
}

/// Overwrites the name, description and status of a simulation.
///
/// # Errors
///
/// Returns [`PersistenceError::SimulationNotFound`] if no such simulation exists.
pub fn update_simulation(
    conn: &mut SqliteConnection,
    simulation_id: i64,
    name: &str,
    description: Option<&str>,
    status: SimulationStatus,
) -> Result<(), PersistenceError> {
    let rows_affected: usize = diesel::update(simulations::table)
        .filter(simulations::simulation_id.eq(simulation_id))
        .set((
            simulations::name.eq(name),
            simulations::description.eq(description),
            simulations::status.eq(status.as_str()),
            simulations::updated_at.eq(sql::<Text>("CURRENT_TIMESTAMP")),
        ))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::SimulationNotFound(simulation_id));
    }

    debug!(simulation_id, status = status.as_str(), "Updated simulation");
    Ok(())
}

/// Deletes a simulation and, by cascade, all of its movement records.
///
/// # Errors
///
/// Returns [`PersistenceError::SimulationNotFound`] if no such simulation exists.
pub fn delete_simulation(
    conn: &mut SqliteConnection,
    simulation_id: i64,
) -> Result<(), PersistenceError> {
    let rows_affected: usize = diesel::delete(
        simulations::table.filter(simulations::simulation_id.eq(simulation_id)),
    )
    .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::SimulationNotFound(simulation_id));
    }

    info!(simulation_id, "Deleted simulation");
    Ok(())
}

/// Marks a draft simulation as finalized.
///
/// # Errors
///
/// Returns an error if:
/// - The simulation does not exist
/// - The simulation is already finalized
pub fn finalize_simulation(
    conn: &mut SqliteConnection,
    simulation_id: i64,
) -> Result<(), PersistenceError> {
    conn.transaction::<_, PersistenceError, _>(|conn| {
        let record: SimulationRecord = get_simulation_record(conn, simulation_id)?;
        validate_status_transition(record.status, SimulationStatus::Finalized)?;
        update_simulation(
            conn,
            simulation_id,
            &record.name,
            record.description.as_deref(),
            SimulationStatus::Finalized,
        )?;
        info!(simulation_id, "Finalized simulation");
        Ok(())
    })
}

/// Copies a simulation and all of its events into a new draft.
///
/// Returns the id of the copy.
///
/// # Errors
///
/// Returns an error if the source does not exist or cannot be rebuilt, or
/// if any write fails.
pub fn duplicate_simulation(
    conn: &mut SqliteConnection,
    simulation_id: i64,
) -> Result<i64, PersistenceError> {
    conn.transaction::<_, PersistenceError, _>(|conn| {
        let stored: StoredSimulation = get_simulation(conn, simulation_id)?;
        let copy: Simulation = duplicate(&stored.simulation);

        let copy_id: i64 = create_simulation(conn, &copy.name, copy.description.as_deref())?;
        for record in &to_records(copy_id, &copy.events)? {
            insert_movement_record(conn, record)?;
        }

        info!(
            simulation_id,
            copy_id,
            movement_count = copy.events.len(),
            "Duplicated simulation"
        );
        Ok(copy_id)
    })
}

/// Replaces the stored chain of a simulation.
///
/// Updates the simulation header, deletes every previous record and
/// inserts the new chain in order, all in one transaction. On failure the
/// previous chain is left intact. The status is not changed.
///
/// Returns the number of records written.
///
/// # Errors
///
/// Returns an error if the simulation does not exist or any write fails.
pub fn save_chain(
    conn: &mut SqliteConnection,
    simulation_id: i64,
    name: &str,
    description: Option<&str>,
    events: &[MovementEvent],
) -> Result<usize, PersistenceError> {
    conn.transaction::<_, PersistenceError, _>(|conn| {
        let current: SimulationRecord = get_simulation_record(conn, simulation_id)?;
        update_simulation(conn, simulation_id, name, description, current.status)?;

        delete_movements_for_simulation(conn, simulation_id)?;

        let records: Vec<MovementRecord> = to_records(simulation_id, events)?;
        for record in &records {
            insert_movement_record(conn, record)?;
        }

        info!(
            simulation_id,
            movement_count = records.len(),
            "Saved movement chain"
        );
        Ok(records.len())
    })
}
