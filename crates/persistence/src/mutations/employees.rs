// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Employee mutations.

use diesel::SqliteConnection;
use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel::sql_types::Text;
use paysim_domain::{Decimal, Employee, EmployeeRef};
use tracing::info;

use crate::backend::sqlite::get_last_insert_rowid;
use crate::diesel_schema::employees;
use crate::error::PersistenceError;

/// Creates a new active employee.
///
/// Field validation is the caller's responsibility; the badge is stored as given.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `badge` - Unique badge code
/// * `name` - Full name
/// * `title` - Job title
/// * `salary` - Monthly salary
///
/// # Errors
///
/// Returns [`PersistenceError::DuplicateBadge`] if the badge is taken, or a
/// database error if the insert fails.
pub fn create_employee(
    conn: &mut SqliteConnection,
    badge: &str,
    name: &str,
    title: &str,
    salary: Decimal,
) -> Result<Employee, PersistenceError> {
    let result: Result<usize, DieselError> = diesel::insert_into(employees::table)
        .values((
            employees::badge.eq(badge),
            employees::name.eq(name),
            employees::title.eq(title),
            employees::salary.eq(salary.to_string()),
            employees::is_active.eq(1),
        ))
        .execute(conn);

    match result {
        Ok(_) => {}
        Err(DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)) => {
            return Err(PersistenceError::DuplicateBadge(badge.to_string()));
        }
        Err(e) => return Err(e.into()),
    }

    let employee_id: i64 = get_last_insert_rowid(conn)?;
    info!(employee_id, badge, "Created employee");

    Ok(Employee {
        reference: EmployeeRef::Persisted(employee_id),
        badge: badge.to_string(),
        name: name.to_string(),
        title: title.to_string(),
        salary,
        active: true,
    })
}

/// Replaces the badge, name, title and salary of an employee.
///
/// Field validation is the caller's responsibility. The activation flag is
/// left as it is.
///
/// # Errors
///
/// Returns [`PersistenceError::EmployeeNotFound`] if no such employee exists,
/// [`PersistenceError::DuplicateBadge`] if another employee has the badge, or
/// a database error if the update fails.
pub fn update_employee(
    conn: &mut SqliteConnection,
    employee_id: i64,
    badge: &str,
    name: &str,
    title: &str,
    salary: Decimal,
) -> Result<(), PersistenceError> {
    let result: Result<usize, DieselError> = diesel::update(employees::table)
        .filter(employees::employee_id.eq(employee_id))
        .set((
            employees::badge.eq(badge),
            employees::name.eq(name),
            employees::title.eq(title),
            employees::salary.eq(salary.to_string()),
            employees::updated_at.eq(sql::<Text>("CURRENT_TIMESTAMP")),
        ))
        .execute(conn);

    match result {
        Ok(0) => Err(PersistenceError::EmployeeNotFound(employee_id)),
        Ok(_) => {
            info!(employee_id, badge, "Updated employee");
            Ok(())
        }
        Err(DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)) => {
            Err(PersistenceError::DuplicateBadge(badge.to_string()))
        }
        Err(e) => Err(e.into()),
    }
}

/// Activates or deactivates an employee.
///
/// # Errors
///
/// Returns [`PersistenceError::EmployeeNotFound`] if no such employee exists.
pub fn set_employee_active(
    conn: &mut SqliteConnection,
    employee_id: i64,
    active: bool,
) -> Result<(), PersistenceError> {
    let rows_affected: usize = diesel::update(employees::table)
        .filter(employees::employee_id.eq(employee_id))
        .set((
            employees::is_active.eq(i32::from(active)),
            employees::updated_at.eq(sql::<Text>("CURRENT_TIMESTAMP")),
        ))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::EmployeeNotFound(employee_id));
    }

    info!(employee_id, active, "Updated employee activation");
    Ok(())
}
