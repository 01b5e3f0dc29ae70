// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Employee queries.

use diesel::prelude::*;
use diesel::SqliteConnection;
use paysim_domain::{Decimal, Employee, EmployeeRef};
use std::str::FromStr;
use tracing::debug;

use crate::diesel_schema::employees;
use crate::error::PersistenceError;

/// Diesel Queryable struct for employee rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = employees)]
struct EmployeeRow {
    employee_id: i64,
    badge: String,
    name: String,
    title: String,
    salary: String,
    is_active: i32,
}

impl EmployeeRow {
    fn into_employee(self) -> Result<Employee, PersistenceError> {
        let salary: Decimal = Decimal::from_str(&self.salary).map_err(|e| {
            PersistenceError::SerializationError(format!(
                "Invalid salary '{}' for employee {}: {e}",
                self.salary, self.employee_id
            ))
        })?;

        Ok(Employee {
            reference: EmployeeRef::Persisted(self.employee_id),
            badge: self.badge,
            name: self.name,
            title: self.title,
            salary,
            active: self.is_active != 0,
        })
    }
}

/// Lists active employees ordered by name.
///
/// # Errors
///
/// Returns an error if the query fails or a stored salary cannot be parsed.
pub fn list_active_employees(
    conn: &mut SqliteConnection,
) -> Result<Vec<Employee>, PersistenceError> {
    let rows: Vec<EmployeeRow> = employees::table
        .filter(employees::is_active.eq(1))
        .order((employees::name.asc(), employees::employee_id.asc()))
        .select(EmployeeRow::as_select())
        .load(conn)?;

    debug!(count = rows.len(), "Loaded active employees");

    rows.into_iter().map(EmployeeRow::into_employee).collect()
}

/// Retrieves an employee by id, active or not.
///
/// # Errors
///
/// Returns [`PersistenceError::EmployeeNotFound`] if no such employee exists.
pub fn get_employee(
    conn: &mut SqliteConnection,
    employee_id: i64,
) -> Result<Employee, PersistenceError> {
    let row: Option<EmployeeRow> = employees::table
        .filter(employees::employee_id.eq(employee_id))
        .select(EmployeeRow::as_select())
        .first(conn)
        .optional()?;

    row.ok_or(PersistenceError::EmployeeNotFound(employee_id))?
        .into_employee()
}
