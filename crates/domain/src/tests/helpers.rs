// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    Decimal, Employee, EmployeeRef, EmployeeSnapshot, ExitReason, MovementEvent, MovementKind,
};

pub fn create_test_employee(
    id: i64,
    badge: &str,
    name: &str,
    title: &str,
    salary: i64,
) -> Employee {
    Employee::new(
        EmployeeRef::Persisted(id),
        badge,
        name,
        title,
        Decimal::from(salary),
    )
}

pub fn snapshot(id: i64, badge: &str, name: &str, title: &str, salary: i64) -> EmployeeSnapshot {
    create_test_employee(id, badge, name, title, salary).snapshot()
}

pub fn exit_event(origin: EmployeeSnapshot) -> MovementEvent {
    MovementEvent::InitialExit {
        origin,
        exit_reason: ExitReason::Resignation,
    }
}

pub fn substitution_event(
    origin: EmployeeSnapshot,
    destination: EmployeeSnapshot,
    new_salary: i64,
    movement_kind: MovementKind,
) -> MovementEvent {
    MovementEvent::InternalSubstitution {
        new_title: origin.title.clone(),
        origin,
        destination,
        new_salary: Decimal::from(new_salary),
        movement_kind,
        note: None,
    }
}

pub fn hire_event(vacancy: EmployeeSnapshot, proposed_salary: i64) -> MovementEvent {
    MovementEvent::NewHire {
        title: vacancy.title.clone(),
        vacancy,
        proposed_salary: Decimal::from(proposed_salary),
        note: None,
    }
}
