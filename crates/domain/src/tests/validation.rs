// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{exit_event, snapshot, substitution_event};
use crate::{
    Decimal, DomainError, EmployeeRef, MAX_SALARY, MovementKind, normalize_note, parse_salary,
    validate_employee_fields, validate_employee_unique_in_chain, validate_required_text,
    validate_simulation_name,
};

#[test]
fn test_parse_salary_accepts_brazilian_format() {
    assert_eq!(parse_salary("R$ 1.234,56"), Ok(Decimal::new(123_456, 2)));
}

#[test]
fn test_parse_salary_accepts_dot_decimal() {
    assert_eq!(parse_salary("4800.5"), Ok(Decimal::new(480_050, 2)));
}

#[test]
fn test_parse_salary_reads_grouped_dots_as_thousands() {
    assert_eq!(parse_salary("R$ 5.000"), Ok(Decimal::from(5000)));
    assert_eq!(parse_salary("4.800"), Ok(Decimal::from(4800)));
    assert_eq!(parse_salary("1.234.567"), Ok(Decimal::from(1_234_567)));
    assert_eq!(parse_salary("4.80"), Ok(Decimal::new(480, 2)));
    assert_eq!(parse_salary("4800.500"), Ok(Decimal::new(480_050, 2)));
    assert!(matches!(
        parse_salary("1.23.456"),
        Err(DomainError::InvalidSalary(_))
    ));
}

#[test]
fn test_parse_salary_accepts_plain_integer() {
    assert_eq!(parse_salary(" 5000 "), Ok(Decimal::from(5000)));
}

#[test]
fn test_parse_salary_rounds_to_cents() {
    assert_eq!(parse_salary("10,005"), Ok(Decimal::new(1001, 2)));
}

#[test]
fn test_parse_salary_rejects_zero_and_negative() {
    assert!(matches!(
        parse_salary("0"),
        Err(DomainError::InvalidSalary(_))
    ));
    assert!(matches!(
        parse_salary("-100"),
        Err(DomainError::InvalidSalary(_))
    ));
}

#[test]
fn test_parse_salary_rejects_garbage() {
    assert!(matches!(
        parse_salary("abc"),
        Err(DomainError::InvalidSalary(_))
    ));
    assert!(matches!(parse_salary("R$"), Err(DomainError::InvalidSalary(_))));
}

#[test]
fn test_parse_salary_enforces_maximum() {
    assert_eq!(parse_salary("9.999.999,99"), Ok(MAX_SALARY));
    assert!(matches!(
        parse_salary("10.000.000,00"),
        Err(DomainError::SalaryOutOfRange(_))
    ));
}

#[test]
fn test_validate_required_text_trims() {
    assert_eq!(
        validate_required_text("title", "  Manager "),
        Ok(String::from("Manager"))
    );
    assert_eq!(
        validate_required_text("title", "   "),
        Err(DomainError::EmptyField { field: "title" })
    );
}

#[test]
fn test_normalize_note() {
    assert_eq!(normalize_note(None), None);
    assert_eq!(normalize_note(Some("  ")), None);
    assert_eq!(normalize_note(Some(" ok ")), Some(String::from("ok")));
}

#[test]
fn test_validate_simulation_name() {
    assert_eq!(validate_simulation_name(" Plan "), Ok(String::from("Plan")));
    assert!(matches!(
        validate_simulation_name(""),
        Err(DomainError::InvalidSimulationName(_))
    ));
    let long: String = "x".repeat(101);
    assert!(matches!(
        validate_simulation_name(&long),
        Err(DomainError::InvalidSimulationName(_))
    ));
}

#[test]
fn test_validate_employee_fields() {
    let result = validate_employee_fields(" ab1 ", "Ana", "Analyst", Decimal::from(10));
    assert_eq!(
        result,
        Ok((
            String::from("AB1"),
            String::from("Ana"),
            String::from("Analyst")
        ))
    );
    assert!(validate_employee_fields("AB1", "", "Analyst", Decimal::from(10)).is_err());
    assert!(validate_employee_fields("AB1", "Ana", "Analyst", Decimal::ZERO).is_err());
}

#[test]
fn test_unique_in_chain_checks_origins_and_destinations() {
    let a = snapshot(1, "A1", "Ana", "Manager", 5000);
    let b = snapshot(2, "B2", "Bruno", "Analyst", 4000);
    let events = vec![
        exit_event(a.clone()),
        substitution_event(a, b, 4800, MovementKind::Promotion),
    ];

    assert_eq!(
        validate_employee_unique_in_chain(&EmployeeRef::Persisted(1), &events),
        Err(DomainError::DuplicateEmployee(EmployeeRef::Persisted(1)))
    );
    assert_eq!(
        validate_employee_unique_in_chain(&EmployeeRef::Persisted(2), &events),
        Err(DomainError::DuplicateEmployee(EmployeeRef::Persisted(2)))
    );
    assert_eq!(
        validate_employee_unique_in_chain(&EmployeeRef::Persisted(3), &events),
        Ok(())
    );
}
