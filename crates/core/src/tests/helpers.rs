// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{ChainBuilder, Resolution};
use paysim_domain::{Decimal, Employee, EmployeeRef, ExitReason, MovementKind};

pub fn create_test_employee(id: i64, name: &str, title: &str, salary: i64) -> Employee {
    Employee::new(
        EmployeeRef::Persisted(id),
        &format!("B{id:03}"),
        name,
        title,
        Decimal::from(salary),
    )
}

pub fn ana() -> Employee {
    create_test_employee(1, "Ana", "Manager", 5000)
}

pub fn bruno() -> Employee {
    create_test_employee(2, "Bruno", "Analyst", 4000)
}

pub fn carla() -> Employee {
    create_test_employee(3, "Carla", "Assistant", 2500)
}

pub fn promotion(destination: Employee, title: &str, salary: &str) -> Resolution {
    Resolution::InternalSubstitution {
        destination,
        new_title: String::from(title),
        new_salary: String::from(salary),
        movement_kind: MovementKind::Promotion,
        note: None,
    }
}

pub fn hire(title: &str, salary: &str) -> Resolution {
    Resolution::NewHire {
        title: String::from(title),
        proposed_salary: String::from(salary),
        note: None,
    }
}

/// Ana leaves and Bruno is promoted into her seat; Bruno's seat is open.
pub fn started_with_promotion() -> ChainBuilder {
    ChainBuilder::new()
        .start_chain(ana(), ExitReason::Resignation)
        .unwrap()
        .resolve_vacancy(
            EmployeeRef::Persisted(1),
            promotion(bruno(), "Manager", "4800"),
        )
        .unwrap()
}
