// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod employee_tests;
mod initialization_tests;
mod records_tests;

use paysim::{ChainBuilder, Resolution};
use paysim_domain::{
    Decimal, Employee, EmployeeRef, ExitReason, MovementEvent, MovementKind,
};

use crate::Persistence;

/// Three stored employees: Ana (Manager, 5000), Bruno (Analyst, 4000) and
/// Carla (Assistant, 2500).
pub fn create_test_employees(persistence: &mut Persistence) -> (Employee, Employee, Employee) {
    let ana = persistence
        .create_employee("A001", "Ana Souza", "Manager", Decimal::from(5000))
        .unwrap();
    let bruno = persistence
        .create_employee("B002", "Bruno Lima", "Analyst", Decimal::from(4000))
        .unwrap();
    let carla = persistence
        .create_employee("C003", "Carla Dias", "Assistant", Decimal::from(2500))
        .unwrap();
    (ana, bruno, carla)
}

pub fn external_employee(badge: &str, salary: i64) -> Employee {
    Employee::new(
        EmployeeRef::External(String::from(badge)),
        badge,
        "Diego Alves",
        "Coordinator",
        Decimal::from(salary),
    )
}

/// Ana leaves, Bruno is promoted into her seat and Bruno's seat goes to a new hire.
pub fn create_complete_chain(ana: &Employee, bruno: &Employee) -> Vec<MovementEvent> {
    ChainBuilder::new()
        .start_chain(ana.clone(), ExitReason::Resignation)
        .unwrap()
        .resolve_vacancy(
            ana.reference.clone(),
            Resolution::InternalSubstitution {
                destination: bruno.clone(),
                new_title: String::from("Manager"),
                new_salary: String::from("4800"),
                movement_kind: MovementKind::Promotion,
                note: Some(String::from("Internal promotion")),
            },
        )
        .unwrap()
        .resolve_vacancy(
            bruno.reference.clone(),
            Resolution::NewHire {
                title: String::from("Analyst"),
                proposed_salary: String::from("3500"),
                note: None,
            },
        )
        .unwrap()
        .into_events()
}

/// A single exit followed by closing the position.
pub fn create_closed_chain(leaver: &Employee) -> Vec<MovementEvent> {
    ChainBuilder::new()
        .start_chain(leaver.clone(), ExitReason::Retirement)
        .unwrap()
        .resolve_vacancy(
            leaver.reference.clone(),
            Resolution::ClosePosition {
                note: Some(String::from("Budget cut")),
            },
        )
        .unwrap()
        .into_events()
}
