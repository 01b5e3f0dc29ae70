// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{DomainError, EmployeeRef, SimulationStatus};

#[test]
fn test_domain_error_display() {
    let err: DomainError = DomainError::EmptyField { field: "title" };
    assert_eq!(format!("{err}"), "Field 'title' must not be empty");

    let err: DomainError = DomainError::InvalidSalary(String::from("test"));
    assert_eq!(format!("{err}"), "Invalid salary: test");

    let err: DomainError = DomainError::DuplicateEmployee(EmployeeRef::Persisted(7));
    assert_eq!(
        format!("{err}"),
        "employee #7 already takes part in this movement chain"
    );

    let err: DomainError =
        DomainError::VacancyNotPending(EmployeeRef::External(String::from("000123")));
    assert_eq!(
        format!("{err}"),
        "No pending vacancy left by external employee 000123"
    );

    let err: DomainError = DomainError::ChainAlreadyStarted;
    assert_eq!(format!("{err}"), "Movement chain has already been started");

    let err: DomainError = DomainError::InvalidStatusTransition {
        from: SimulationStatus::Finalized,
        to: SimulationStatus::Finalized,
    };
    assert_eq!(
        format!("{err}"),
        "Cannot transition simulation from finalized to finalized"
    );
}

#[test]
fn test_domain_error_is_std_error() {
    let err: Box<dyn std::error::Error> = Box::new(DomainError::ChainNotStarted);
    assert_eq!(err.to_string(), "Movement chain has not been started");
}
