// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{create_test_employee, exit_event, hire_event, snapshot};
use crate::{
    DomainError, Employee, EmployeeRef, EventKind, ExitReason, MovementEvent, MovementKind,
    PendingVacancy, Simulation, SimulationStatus,
};
use std::str::FromStr;

#[test]
fn test_employee_new_normalizes_fields() {
    let employee: Employee = create_test_employee(1, " ab12 ", "  Ana Souza ", " Analyst ", 5000);
    assert_eq!(employee.badge, "AB12");
    assert_eq!(employee.name, "Ana Souza");
    assert_eq!(employee.title, "Analyst");
    assert!(employee.active);
}

#[test]
fn test_snapshot_copies_employee_state() {
    let employee: Employee = create_test_employee(3, "C3", "Carla", "Manager", 9000);
    let snap = employee.snapshot();
    assert_eq!(snap.reference, EmployeeRef::Persisted(3));
    assert_eq!(snap.title, "Manager");
    assert_eq!(snap.salary, employee.salary);
}

#[test]
fn test_employee_ref_persisted_id() {
    assert_eq!(EmployeeRef::Persisted(9).persisted_id(), Some(9));
    assert_eq!(
        EmployeeRef::External(String::from("000042")).persisted_id(),
        None
    );
}

#[test]
fn test_employee_ref_equality_distinguishes_sources() {
    assert_ne!(
        EmployeeRef::Persisted(1),
        EmployeeRef::External(String::from("1"))
    );
}

#[test]
fn test_exit_reason_round_trips_through_str() {
    for reason in [
        ExitReason::Resignation,
        ExitReason::Termination,
        ExitReason::Retirement,
        ExitReason::Transfer,
        ExitReason::Other,
    ] {
        assert_eq!(ExitReason::from_str(reason.as_str()), Ok(reason));
    }
    assert!(matches!(
        ExitReason::from_str("fired"),
        Err(DomainError::InvalidExitReason(_))
    ));
}

#[test]
fn test_movement_kind_parse_rejects_unknown() {
    assert_eq!(MovementKind::from_str("raise"), Ok(MovementKind::Raise));
    assert!(matches!(
        MovementKind::from_str("demotion"),
        Err(DomainError::InvalidMovementKind(_))
    ));
}

#[test]
fn test_simulation_status_transitions() {
    assert!(SimulationStatus::Draft.can_transition_to(SimulationStatus::Finalized));
    assert!(!SimulationStatus::Finalized.can_transition_to(SimulationStatus::Finalized));
    assert!(!SimulationStatus::Finalized.can_transition_to(SimulationStatus::Draft));
    assert!(!SimulationStatus::Draft.can_transition_to(SimulationStatus::Draft));
}

#[test]
fn test_event_kind_parse() {
    assert_eq!(EventKind::from_str("new_hire"), Ok(EventKind::NewHire));
    assert!(matches!(
        EventKind::from_str("promotion"),
        Err(DomainError::InvalidEventKind(_))
    ));
}

#[test]
fn test_new_hire_origin_is_its_vacancy() {
    let vacancy = snapshot(1, "A1", "Ana", "Analyst", 5000);
    let event: MovementEvent = hire_event(vacancy.clone(), 4000);
    assert_eq!(event.kind(), EventKind::NewHire);
    assert_eq!(event.origin(), &vacancy);
    assert!(event.destination().is_none());
}

#[test]
fn test_pending_vacancy_source_ref() {
    let vacancy: PendingVacancy = PendingVacancy::new(snapshot(1, "A1", "Ana", "Analyst", 5000));
    assert_eq!(vacancy.source_ref(), &EmployeeRef::Persisted(1));
    assert_eq!(vacancy.source.title, "Analyst");
}

#[test]
fn test_numbered_events_are_one_based() {
    let simulation: Simulation = Simulation {
        simulation_id: None,
        name: String::from("Plan"),
        description: None,
        status: SimulationStatus::Draft,
        events: vec![
            exit_event(snapshot(1, "A1", "Ana", "Analyst", 5000)),
            hire_event(snapshot(1, "A1", "Ana", "Analyst", 5000), 4000),
        ],
    };

    let orders: Vec<u32> = simulation.numbered_events().map(|(n, _)| n).collect();
    assert_eq!(orders, vec![1, 2]);
}

#[test]
fn test_movement_event_serializes_with_kind_tag() {
    let event: MovementEvent = exit_event(snapshot(1, "A1", "Ana", "Analyst", 5000));
    let json: serde_json::Value = serde_json::to_value(&event).unwrap();
    assert_eq!(json["kind"], "initial_exit");
    assert_eq!(json["exit_reason"], "resignation");
    assert_eq!(json["origin"]["reference"]["source"], "persisted");
}
