// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the payroll movement simulator.
//!
//! This crate stores employees, simulations and the movement records of
//! each simulation's chain. It is built on Diesel over `SQLite`.
//!
//! ## Chains as records
//!
//! A chain is stored as one row per event, numbered from 1. Converting in
//! either direction goes through the pure functions in [`records`]. Reading a
//! chain back always validates it; malformed records never produce a
//! partial chain.
//!
//! ## Replace-all saves
//!
//! Saving a chain deletes every prior record of the simulation and inserts
//! the new ones, inside one transaction.
//!
//! ## Testing Philosophy
//!
//! - Tests run against isolated in-memory `SQLite` databases
//! - Each `Persistence::new_in_memory()` call gets its own database

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use backend::sqlite::Storage;
use diesel::SqliteConnection;
use paysim_domain::{Decimal, Employee, MovementEvent, SimulationStatus};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

/// Atomic counter for generating unique in-memory database names.
///
/// Each call to `new_in_memory()` receives a unique sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;
pub mod records;

#[cfg(test)]
mod tests;

pub use data_models::{SimulationRecord, SimulationSummary, StoredSimulation};
pub use error::PersistenceError;
pub use records::{MovementRecord, from_records, to_records};

/// Persistence adapter for employees, simulations and movement chains.
pub struct Persistence {
    pub(crate) conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives a unique database instance via atomic counter.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let url: String = format!("file:paysim_memdb_{db_id}?mode=memory&cache=shared");

        let conn: SqliteConnection = backend::sqlite::open(&url, Storage::Memory)?;
        Ok(Self { conn })
    }

    /// Opens (or creates) a file-backed `SQLite` database in WAL mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is not valid UTF-8 or the database
    /// cannot be opened or migrated.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path: &Path = path.as_ref();
        let url: &str = path.to_str().ok_or_else(|| {
            PersistenceError::DatabaseConnectionFailed(format!(
                "database path is not valid UTF-8: {}",
                path.display()
            ))
        })?;

        let conn: SqliteConnection = backend::sqlite::open(url, Storage::File)?;
        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        backend::sqlite::verify_foreign_key_enforcement(&mut self.conn)
    }

    /// Lists the tables created by the migrations.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog query fails.
    pub fn list_tables(&mut self) -> Result<Vec<String>, PersistenceError> {
        backend::sqlite::list_tables(&mut self.conn)
    }

    // ========================================================================
    // Employees
    // ========================================================================

    /// Lists active employees ordered by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_active_employees(&mut self) -> Result<Vec<Employee>, PersistenceError> {
        queries::list_active_employees(&mut self.conn)
    }

    /// Creates a new active employee.
    ///
    /// # Errors
    ///
    /// Returns an error if the badge is taken or the insert fails.
    pub fn create_employee(
        &mut self,
        badge: &str,
        name: &str,
        title: &str,
        salary: Decimal,
    ) -> Result<Employee, PersistenceError> {
        mutations::create_employee(&mut self.conn, badge, name, title, salary)
    }

    /// Retrieves an employee by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the employee does not exist.
    pub fn get_employee(&mut self, employee_id: i64) -> Result<Employee, PersistenceError> {
        queries::get_employee(&mut self.conn, employee_id)
    }

    /// Replaces an employee's badge, name, title and salary and returns the
    /// updated employee.
    ///
    /// # Errors
    ///
    /// Returns an error if the employee does not exist, the badge is taken
    /// or the update fails.
    pub fn update_employee(
        &mut self,
        employee_id: i64,
        badge: &str,
        name: &str,
        title: &str,
        salary: Decimal,
    ) -> Result<Employee, PersistenceError> {
        mutations::update_employee(&mut self.conn, employee_id, badge, name, title, salary)?;
        queries::get_employee(&mut self.conn, employee_id)
    }

    /// Activates or deactivates an employee.
    ///
    /// # Errors
    ///
    /// Returns an error if the employee does not exist.
    pub fn set_employee_active(
        &mut self,
        employee_id: i64,
        active: bool,
    ) -> Result<(), PersistenceError> {
        mutations::set_employee_active(&mut self.conn, employee_id, active)
    }

    // ========================================================================
    // Simulations
    // ========================================================================

    /// Creates a new, empty draft simulation and returns its id.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_simulation(
        &mut self,
        name: &str,
        description: Option<&str>,
    ) -> Result<i64, PersistenceError> {
        mutations::create_simulation(&mut self.conn, name, description)
    }

    /// Retrieves a simulation with its reconstructed chain.
    ///
    /// # Errors
    ///
    /// Returns an error if the simulation does not exist or its records are
    /// malformed.
    pub fn get_simulation(
        &mut self,
        simulation_id: i64,
    ) -> Result<StoredSimulation, PersistenceError> {
        queries::get_simulation(&mut self.conn, simulation_id)
    }

    /// Lists simulation summaries, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a chain cannot be rebuilt.
    pub fn list_simulation_summaries(
        &mut self,
    ) -> Result<Vec<SimulationSummary>, PersistenceError> {
        queries::list_simulation_summaries(&mut self.conn)
    }

    /// Overwrites the name, description and status of a simulation.
    ///
    /// # Errors
    ///
    /// Returns an error if the simulation does not exist.
    pub fn update_simulation(
        &mut self,
        simulation_id: i64,
        name: &str,
        description: Option<&str>,
        status: SimulationStatus,
    ) -> Result<(), PersistenceError> {
        mutations::update_simulation(&mut self.conn, simulation_id, name, description, status)
    }

    /// Deletes a simulation and its movement records.
    ///
    /// # Errors
    ///
    /// Returns an error if the simulation does not exist.
    pub fn delete_simulation(&mut self, simulation_id: i64) -> Result<(), PersistenceError> {
        mutations::delete_simulation(&mut self.conn, simulation_id)
    }

    /// Copies a simulation into a new draft and returns the copy's id.
    ///
    /// # Errors
    ///
    /// Returns an error if the source does not exist or a write fails.
    pub fn duplicate_simulation(&mut self, simulation_id: i64) -> Result<i64, PersistenceError> {
        mutations::duplicate_simulation(&mut self.conn, simulation_id)
    }

    /// Marks a draft simulation as finalized.
    ///
    /// # Errors
    ///
    /// Returns an error if the simulation does not exist or is already finalized.
    pub fn finalize_simulation(&mut self, simulation_id: i64) -> Result<(), PersistenceError> {
        mutations::finalize_simulation(&mut self.conn, simulation_id)
    }

    /// Replaces the stored chain of a simulation in one transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the simulation does not exist or a write fails.
    /// The previous chain is kept on failure.
    pub fn save_chain(
        &mut self,
        simulation_id: i64,
        name: &str,
        description: Option<&str>,
        events: &[MovementEvent],
    ) -> Result<usize, PersistenceError> {
        mutations::save_chain(&mut self.conn, simulation_id, name, description, events)
    }

    // ========================================================================
    // Movement records
    // ========================================================================

    /// Deletes every movement record of a simulation.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_movements_for_simulation(
        &mut self,
        simulation_id: i64,
    ) -> Result<usize, PersistenceError> {
        mutations::delete_movements_for_simulation(&mut self.conn, simulation_id)
    }

    /// Inserts a single movement record.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn insert_movement_record(
        &mut self,
        record: &MovementRecord,
    ) -> Result<(), PersistenceError> {
        mutations::insert_movement_record(&mut self.conn, record)
    }

    /// Loads the movement records of a simulation in order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn load_movement_records(
        &mut self,
        simulation_id: i64,
    ) -> Result<Vec<MovementRecord>, PersistenceError> {
        queries::load_movement_records(&mut self.conn, simulation_id)
    }
}
