// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for the pure mapping between chains and movement records.

use paysim::{ChainBuilder, Resolution, reconstruct_from};
use std::str::FromStr;
use paysim_domain::{Decimal, Employee, EmployeeRef, ExitReason, MovementEvent, MovementKind};

use super::{create_closed_chain, create_complete_chain, external_employee};
use crate::{MovementRecord, PersistenceError, from_records, to_records};

fn persisted(id: i64, name: &str, title: &str, salary: i64) -> Employee {
    Employee::new(
        EmployeeRef::Persisted(id),
        &format!("P{id}"),
        name,
        title,
        Decimal::from(salary),
    )
}

fn sample_chain() -> Vec<MovementEvent> {
    create_complete_chain(
        &persisted(1, "Ana", "Manager", 5000),
        &persisted(2, "Bruno", "Analyst", 4000),
    )
}

#[test]
fn test_records_are_numbered_from_one() {
    let records: Vec<MovementRecord> = to_records(7, &sample_chain()).unwrap();
    let orders: Vec<i32> = records.iter().map(|r| r.order).collect();
    assert_eq!(orders, vec![1, 2, 3]);
    assert!(records.iter().all(|r| r.simulation_id == 7));
}

#[test]
fn test_record_columns_per_event_kind() {
    let records: Vec<MovementRecord> = to_records(1, &sample_chain()).unwrap();

    let exit = &records[0];
    assert_eq!(exit.event_kind, "initial_exit");
    assert_eq!(exit.origin_employee_id, Some(1));
    assert_eq!(exit.exit_reason.as_deref(), Some("resignation"));
    assert!(exit.destination_snapshot.is_none());

    let substitution = &records[1];
    assert_eq!(substitution.event_kind, "internal_substitution");
    assert_eq!(substitution.origin_employee_id, Some(1));
    assert_eq!(substitution.destination_employee_id, Some(2));
    assert_eq!(
        Decimal::from_str(substitution.new_salary.as_deref().unwrap()).unwrap(),
        Decimal::from(4800)
    );
    assert_eq!(substitution.movement_kind.as_deref(), Some("promotion"));
    assert_eq!(substitution.note.as_deref(), Some("Internal promotion"));

    let hire = &records[2];
    assert_eq!(hire.event_kind, "new_hire");
    assert_eq!(hire.origin_employee_id, None);
    assert!(hire.origin_snapshot.is_some());
    assert_eq!(hire.new_hire_title.as_deref(), Some("Analyst"));
    assert_eq!(
        Decimal::from_str(hire.new_hire_salary.as_deref().unwrap()).unwrap(),
        Decimal::from(3500)
    );
}

#[test]
fn test_external_employees_get_no_id_column() {
    let ana: Employee = persisted(1, "Ana", "Manager", 5000);
    let diego: Employee = external_employee("000900", 6000);
    let events: Vec<MovementEvent> = ChainBuilder::new()
        .start_chain(ana.clone(), ExitReason::Transfer)
        .unwrap()
        .resolve_vacancy(
            ana.reference,
            Resolution::InternalSubstitution {
                destination: diego,
                new_title: String::from("Manager"),
                new_salary: String::from("6200"),
                movement_kind: MovementKind::Lateral,
                note: None,
            },
        )
        .unwrap()
        .into_events();

    let records: Vec<MovementRecord> = to_records(1, &events).unwrap();
    assert_eq!(records[1].destination_employee_id, None);
    assert!(
        records[1]
            .destination_snapshot
            .as_deref()
            .unwrap()
            .contains("000900")
    );

    assert_eq!(from_records(records).unwrap(), events);
}

#[test]
fn test_round_trip_restores_chain_and_builder() {
    let events: Vec<MovementEvent> = sample_chain();
    let restored: Vec<MovementEvent> = from_records(to_records(3, &events).unwrap()).unwrap();
    assert_eq!(restored, events);

    let closed: Vec<MovementEvent> = create_closed_chain(&persisted(5, "Eva", "Clerk", 2000));
    assert_eq!(
        from_records(to_records(3, &closed).unwrap()).unwrap(),
        closed
    );

    let original = reconstruct_from(events).unwrap();
    let rebuilt = reconstruct_from(restored).unwrap();
    assert_eq!(rebuilt, original);
}

#[test]
fn test_from_records_sorts_by_order() {
    let events: Vec<MovementEvent> = sample_chain();
    let mut records: Vec<MovementRecord> = to_records(1, &events).unwrap();
    records.reverse();
    assert_eq!(from_records(records).unwrap(), events);
}

#[test]
fn test_from_records_rejects_gap() {
    let mut records: Vec<MovementRecord> = to_records(1, &sample_chain()).unwrap();
    records[2].order = 4;
    assert!(matches!(
        from_records(records),
        Err(PersistenceError::ReconstructionError(_))
    ));
}

#[test]
fn test_from_records_rejects_duplicate_order() {
    let mut records: Vec<MovementRecord> = to_records(1, &sample_chain()).unwrap();
    records[2].order = 2;
    assert!(matches!(
        from_records(records),
        Err(PersistenceError::ReconstructionError(_))
    ));
}

#[test]
fn test_from_records_rejects_unknown_kind() {
    let mut records: Vec<MovementRecord> = to_records(1, &sample_chain()).unwrap();
    records[1].event_kind = String::from("demotion");
    assert!(matches!(
        from_records(records),
        Err(PersistenceError::ReconstructionError(_))
    ));
}

#[test]
fn test_from_records_rejects_malformed_snapshot() {
    let mut records: Vec<MovementRecord> = to_records(1, &sample_chain()).unwrap();
    records[0].origin_snapshot = Some(String::from("{not json"));
    assert!(matches!(
        from_records(records),
        Err(PersistenceError::ReconstructionError(_))
    ));
}

#[test]
fn test_from_records_rejects_bad_decimal() {
    let mut records: Vec<MovementRecord> = to_records(1, &sample_chain()).unwrap();
    records[2].new_hire_salary = Some(String::from("three thousand"));
    assert!(matches!(
        from_records(records),
        Err(PersistenceError::ReconstructionError(_))
    ));
}

#[test]
fn test_from_records_rejects_missing_field() {
    let mut records: Vec<MovementRecord> = to_records(1, &sample_chain()).unwrap();
    records[1].movement_kind = None;
    assert!(matches!(
        from_records(records),
        Err(PersistenceError::ReconstructionError(_))
    ));

    let mut records: Vec<MovementRecord> = to_records(1, &sample_chain()).unwrap();
    records[0].exit_reason = Some(String::from("vanished"));
    assert!(matches!(
        from_records(records),
        Err(PersistenceError::ReconstructionError(_))
    ));
}

#[test]
fn test_empty_records_make_empty_chain() {
    assert_eq!(from_records(Vec::new()).unwrap(), Vec::new());
}
