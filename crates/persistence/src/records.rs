// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Mapping between in-memory movement chains and flat movement records.
//!
//! Both directions are pure. Employee id columns are filled only for
//! persisted employees; external employees are durable only through their
//! JSON snapshots, which are the single source used to rebuild events.

use diesel::prelude::*;
use num_traits::ToPrimitive;
use paysim_domain::{
    Decimal, EmployeeSnapshot, EventKind, ExitReason, MovementEvent, MovementKind,
};
use std::str::FromStr;

use crate::diesel_schema::movements;
use crate::error::PersistenceError;

/// One stored chain event.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Insertable)]
#[diesel(table_name = movements)]
pub struct MovementRecord {
    pub simulation_id: i64,
    /// 1-based position in the chain.
    #[diesel(column_name = sequence)]
    pub order: i32,
    pub event_kind: String,
    pub origin_employee_id: Option<i64>,
    #[diesel(column_name = origin_snapshot_json)]
    pub origin_snapshot: Option<String>,
    pub destination_employee_id: Option<i64>,
    #[diesel(column_name = destination_snapshot_json)]
    pub destination_snapshot: Option<String>,
    pub new_title: Option<String>,
    pub new_salary: Option<String>,
    pub movement_kind: Option<String>,
    pub new_hire_title: Option<String>,
    pub new_hire_salary: Option<String>,
    pub exit_reason: Option<String>,
    pub note: Option<String>,
}

impl MovementRecord {
    fn empty(simulation_id: i64, order: i32, kind: EventKind) -> Self {
        Self {
            simulation_id,
            order,
            event_kind: kind.as_str().to_string(),
            origin_employee_id: None,
            origin_snapshot: None,
            destination_employee_id: None,
            destination_snapshot: None,
            new_title: None,
            new_salary: None,
            movement_kind: None,
            new_hire_title: None,
            new_hire_salary: None,
            exit_reason: None,
            note: None,
        }
    }
}

/// Converts a chain into one record per event, numbered from 1.
///
/// # Errors
///
/// Returns an error if a snapshot cannot be serialized or the chain is too
/// long to number.
pub fn to_records(
    simulation_id: i64,
    events: &[MovementEvent],
) -> Result<Vec<MovementRecord>, PersistenceError> {
    events
        .iter()
        .enumerate()
        .map(|(index, event)| {
            let order: i32 = (index + 1).to_i32().ok_or_else(|| {
                PersistenceError::SerializationError(format!(
                    "Movement order {} out of range",
                    index + 1
                ))
            })?;
            to_record(simulation_id, order, event)
        })
        .collect()
}

fn to_record(
    simulation_id: i64,
    order: i32,
    event: &MovementEvent,
) -> Result<MovementRecord, PersistenceError> {
    let mut record: MovementRecord = MovementRecord::empty(simulation_id, order, event.kind());

    match event {
        MovementEvent::InitialExit {
            origin,
            exit_reason,
        } => {
            record.origin_employee_id = origin.reference.persisted_id();
            record.origin_snapshot = Some(serde_json::to_string(origin)?);
            record.exit_reason = Some(exit_reason.as_str().to_string());
        }
        MovementEvent::InternalSubstitution {
            origin,
            destination,
            new_title,
            new_salary,
            movement_kind,
            note,
        } => {
            record.origin_employee_id = origin.reference.persisted_id();
            record.origin_snapshot = Some(serde_json::to_string(origin)?);
            record.destination_employee_id = destination.reference.persisted_id();
            record.destination_snapshot = Some(serde_json::to_string(destination)?);
            record.new_title = Some(new_title.clone());
            record.new_salary = Some(new_salary.to_string());
            record.movement_kind = Some(movement_kind.as_str().to_string());
            record.note.clone_from(note);
        }
        MovementEvent::NewHire {
            vacancy,
            title,
            proposed_salary,
            note,
        } => {
            // The vacancy is kept as a snapshot only; the hire refers to no employee row.
            record.origin_snapshot = Some(serde_json::to_string(vacancy)?);
            record.new_hire_title = Some(title.clone());
            record.new_hire_salary = Some(proposed_salary.to_string());
            record.note.clone_from(note);
        }
        MovementEvent::PositionClosed { origin, note } => {
            record.origin_employee_id = origin.reference.persisted_id();
            record.origin_snapshot = Some(serde_json::to_string(origin)?);
            record.note.clone_from(note);
        }
    }

    Ok(record)
}

/// Rebuilds a chain from stored records.
///
/// Records are sorted by order, which must then run exactly `1..=N`.
///
/// # Errors
///
/// Returns [`PersistenceError::ReconstructionError`] if:
/// - Orders have a gap or a duplicate
/// - An event kind or enum value is unknown
/// - A required field is missing
/// - A snapshot or decimal cannot be parsed
pub fn from_records(
    mut records: Vec<MovementRecord>,
) -> Result<Vec<MovementEvent>, PersistenceError> {
    records.sort_by_key(|r| r.order);

    for (expected, record) in (1_i32..).zip(records.iter()) {
        if record.order != expected {
            return Err(PersistenceError::ReconstructionError(format!(
                "Expected movement order {expected}, found {}",
                record.order
            )));
        }
    }

    records.iter().map(from_record).collect()
}

fn from_record(record: &MovementRecord) -> Result<MovementEvent, PersistenceError> {
    let order: i32 = record.order;
    let kind: EventKind = EventKind::from_str(&record.event_kind)
        .map_err(|e| reconstruction_error(order, &e.to_string()))?;

    let event: MovementEvent = match kind {
        EventKind::InitialExit => MovementEvent::InitialExit {
            origin: snapshot(order, "origin_snapshot", record.origin_snapshot.as_deref())?,
            exit_reason: ExitReason::from_str(required(
                order,
                "exit_reason",
                record.exit_reason.as_deref(),
            )?)
            .map_err(|e| reconstruction_error(order, &e.to_string()))?,
        },
        EventKind::InternalSubstitution => MovementEvent::InternalSubstitution {
            origin: snapshot(order, "origin_snapshot", record.origin_snapshot.as_deref())?,
            destination: snapshot(
                order,
                "destination_snapshot",
                record.destination_snapshot.as_deref(),
            )?,
            new_title: required(order, "new_title", record.new_title.as_deref())?.to_string(),
            new_salary: decimal(order, "new_salary", record.new_salary.as_deref())?,
            movement_kind: MovementKind::from_str(required(
                order,
                "movement_kind",
                record.movement_kind.as_deref(),
            )?)
            .map_err(|e| reconstruction_error(order, &e.to_string()))?,
            note: record.note.clone(),
        },
        EventKind::NewHire => MovementEvent::NewHire {
            vacancy: snapshot(order, "origin_snapshot", record.origin_snapshot.as_deref())?,
            title: required(order, "new_hire_title", record.new_hire_title.as_deref())?
                .to_string(),
            proposed_salary: decimal(order, "new_hire_salary", record.new_hire_salary.as_deref())?,
            note: record.note.clone(),
        },
        EventKind::PositionClosed => MovementEvent::PositionClosed {
            origin: snapshot(order, "origin_snapshot", record.origin_snapshot.as_deref())?,
            note: record.note.clone(),
        },
    };

    Ok(event)
}

fn reconstruction_error(order: i32, msg: &str) -> PersistenceError {
    PersistenceError::ReconstructionError(format!("Movement {order}: {msg}"))
}

fn required<'a>(
    order: i32,
    field: &str,
    value: Option<&'a str>,
) -> Result<&'a str, PersistenceError> {
    value.ok_or_else(|| reconstruction_error(order, &format!("missing {field}")))
}

fn snapshot(
    order: i32,
    field: &str,
    value: Option<&str>,
) -> Result<EmployeeSnapshot, PersistenceError> {
    serde_json::from_str(required(order, field, value)?)
        .map_err(|e| reconstruction_error(order, &format!("malformed {field}: {e}")))
}

fn decimal(order: i32, field: &str, value: Option<&str>) -> Result<Decimal, PersistenceError> {
    let raw: &str = required(order, field, value)?;
    Decimal::from_str(raw)
        .map_err(|e| reconstruction_error(order, &format!("invalid {field} '{raw}': {e}")))
}
