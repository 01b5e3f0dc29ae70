// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use paysim_domain::EmployeeRef;
use paysim_persistence::Persistence;

use crate::{
    ChainCommandRequest, CreateEmployeeRequest, EmployeeInfo, EmployeeSelection,
    ResolutionRequest, SaveChainRequest, create_employee,
};

pub fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory().expect("in-memory persistence")
}

pub fn employee_request(
    badge: &str,
    name: &str,
    title: &str,
    salary: &str,
) -> CreateEmployeeRequest {
    CreateEmployeeRequest {
        badge: String::from(badge),
        name: String::from(name),
        title: String::from(title),
        salary: String::from(salary),
    }
}

/// Stores Ana (Manager, 5000) and Bruno (Analyst, 4000) and returns their ids.
pub fn seed_employees(persistence: &mut Persistence) -> (i64, i64) {
    let ana: EmployeeInfo = create_employee(
        persistence,
        &employee_request("a001", "Ana Souza", "Manager", "5.000,00"),
    )
    .unwrap();
    let bruno: EmployeeInfo = create_employee(
        persistence,
        &employee_request("b002", "Bruno Lima", "Analyst", "4000"),
    )
    .unwrap();
    (
        ana.reference.persisted_id().unwrap(),
        bruno.reference.persisted_id().unwrap(),
    )
}

pub fn start(employee_id: i64) -> ChainCommandRequest {
    ChainCommandRequest::StartChain {
        employee: EmployeeSelection::Persisted { employee_id },
        exit_reason: String::from("resignation"),
    }
}

pub fn promote(vacancy_id: i64, destination_id: i64, salary: &str) -> ChainCommandRequest {
    ChainCommandRequest::ResolveVacancy {
        vacancy: EmployeeRef::Persisted(vacancy_id),
        resolution: ResolutionRequest::InternalSubstitution {
            destination: EmployeeSelection::Persisted {
                employee_id: destination_id,
            },
            new_title: String::from("Manager"),
            new_salary: String::from(salary),
            movement_kind: String::from("promotion"),
            note: None,
        },
    }
}

pub fn hire(vacancy: EmployeeRef, salary: &str) -> ChainCommandRequest {
    ChainCommandRequest::ResolveVacancy {
        vacancy,
        resolution: ResolutionRequest::NewHire {
            title: String::from("Analyst"),
            proposed_salary: String::from(salary),
            note: Some(String::from("  ")),
        },
    }
}

/// Ana leaves, Bruno is promoted at 4800 and his seat goes to a hire at 3500.
pub fn complete_chain_request(ana: i64, bruno: i64) -> SaveChainRequest {
    SaveChainRequest {
        name: String::from("Finance reshuffle"),
        description: Some(String::from("Q3")),
        commands: vec![
            start(ana),
            promote(ana, bruno, "4800"),
            hire(EmployeeRef::Persisted(bruno), "3500"),
        ],
    }
}
