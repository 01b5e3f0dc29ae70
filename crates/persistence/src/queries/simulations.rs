// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Simulation queries.
//!
//! Full simulations are rebuilt from their movement records on every read.
//! The stored records are never trusted to be well-formed: any defect
//! surfaces as a reconstruction error instead of a partial chain.

use diesel::prelude::*;
use diesel::SqliteConnection;
use paysim_domain::{MovementEvent, Simulation, SimulationStatus, compute_impact};
use std::str::FromStr;
use tracing::debug;

use crate::data_models::{SimulationRecord, SimulationSummary, StoredSimulation};
use crate::diesel_schema::simulations;
use crate::error::PersistenceError;
use crate::queries::movements::load_movement_records;
use crate::records::from_records;

/// Diesel Queryable struct for simulation rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = simulations)]
struct SimulationRow {
    simulation_id: i64,
    name: String,
    description: Option<String>,
    status: String,
    created_at: String,
    updated_at: String,
}

impl SimulationRow {
    fn into_record(self) -> Result<SimulationRecord, PersistenceError> {
        let status: SimulationStatus = SimulationStatus::from_str(&self.status)
            .map_err(|e| PersistenceError::SerializationError(e.to_string()))?;
        Ok(SimulationRecord {
            simulation_id: self.simulation_id,
            name: self.name,
            description: self.description,
            status,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Retrieves a simulation header by id.
///
/// # Errors
///
/// Returns [`PersistenceError::SimulationNotFound`] if no such simulation exists.
pub fn get_simulation_record(
    conn: &mut SqliteConnection,
    simulation_id: i64,
) -> Result<SimulationRecord, PersistenceError> {
    let row: Option<SimulationRow> = simulations::table
        .filter(simulations::simulation_id.eq(simulation_id))
        .select(SimulationRow::as_select())
        .first(conn)
        .optional()?;

    row.ok_or(PersistenceError::SimulationNotFound(simulation_id))?
        .into_record()
}

/// Retrieves a simulation with its chain rebuilt from stored records.
///
/// # Errors
///
/// Returns an error if:
/// - The simulation does not exist
/// - The stored records cannot be turned back into a chain
pub fn get_simulation(
    conn: &mut SqliteConnection,
    simulation_id: i64,
) -> Result<StoredSimulation, PersistenceError> {
    let record: SimulationRecord = get_simulation_record(conn, simulation_id)?;
    let events: Vec<MovementEvent> = from_records(load_movement_records(conn, simulation_id)?)?;

    debug!(simulation_id, movement_count = events.len(), "Loaded simulation");

    Ok(StoredSimulation {
        simulation: Simulation {
            simulation_id: Some(record.simulation_id),
            name: record.name,
            description: record.description,
            status: record.status,
            events,
        },
        created_at: record.created_at,
        updated_at: record.updated_at,
    })
}

/// Lists all simulations, newest first, with their payroll impact.
///
/// # Errors
///
/// Returns an error if the query fails or any stored chain cannot be rebuilt.
pub fn list_simulation_summaries(
    conn: &mut SqliteConnection,
) -> Result<Vec<SimulationSummary>, PersistenceError> {
    let rows: Vec<SimulationRow> = simulations::table
        .order((
            simulations::created_at.desc(),
            simulations::simulation_id.desc(),
        ))
        .select(SimulationRow::as_select())
        .load(conn)?;

    let mut summaries: Vec<SimulationSummary> = Vec::with_capacity(rows.len());
    for row in rows {
        let record: SimulationRecord = row.into_record()?;
        let events: Vec<MovementEvent> =
            from_records(load_movement_records(conn, record.simulation_id)?)?;
        summaries.push(SimulationSummary {
            simulation_id: record.simulation_id,
            name: record.name,
            description: record.description,
            status: record.status,
            movement_count: events.len(),
            impact_total: compute_impact(&events).impact_total,
            created_at: record.created_at,
            updated_at: record.updated_at,
        });
    }

    Ok(summaries)
}
