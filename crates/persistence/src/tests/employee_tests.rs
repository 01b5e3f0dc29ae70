// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use paysim_domain::{Decimal, Employee, EmployeeRef};

use super::create_test_employees;
use crate::{Persistence, PersistenceError};

#[test]
fn test_create_and_get_employee() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let created: Employee = persistence
        .create_employee("X100", "Xavier", "Engineer", Decimal::new(712_345, 2))
        .unwrap();

    let id: i64 = created.reference.persisted_id().unwrap();
    let loaded: Employee = persistence.get_employee(id).unwrap();

    assert_eq!(loaded, created);
    assert_eq!(loaded.salary, Decimal::new(712_345, 2));
    assert!(loaded.active);
}

#[test]
fn test_duplicate_badge_is_rejected() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    persistence
        .create_employee("X100", "Xavier", "Engineer", Decimal::from(1000))
        .unwrap();

    let result = persistence.create_employee("X100", "Other", "Engineer", Decimal::from(1000));
    assert_eq!(
        result,
        Err(PersistenceError::DuplicateBadge(String::from("X100")))
    );
}

#[test]
fn test_get_missing_employee() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    assert_eq!(
        persistence.get_employee(404),
        Err(PersistenceError::EmployeeNotFound(404))
    );
}

#[test]
fn test_list_active_employees_orders_by_name_and_skips_inactive() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let (_ana, bruno, _carla) = create_test_employees(&mut persistence);

    persistence
        .set_employee_active(bruno.reference.persisted_id().unwrap(), false)
        .unwrap();

    let names: Vec<String> = persistence
        .list_active_employees()
        .unwrap()
        .into_iter()
        .map(|e| e.name)
        .collect();
    assert_eq!(names, vec!["Ana Souza", "Carla Dias"]);

    let bruno_again: Employee = persistence
        .get_employee(bruno.reference.persisted_id().unwrap())
        .unwrap();
    assert!(!bruno_again.active);
    assert_eq!(bruno_again.reference, EmployeeRef::Persisted(2));
}

#[test]
fn test_set_active_on_missing_employee() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    assert_eq!(
        persistence.set_employee_active(77, true),
        Err(PersistenceError::EmployeeNotFound(77))
    );
}

#[test]
fn test_update_employee_replaces_fields_and_keeps_activation() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let created: Employee = persistence
        .create_employee("X100", "Xavier", "Engineer", Decimal::from(1000))
        .unwrap();
    let id: i64 = created.reference.persisted_id().unwrap();
    persistence.set_employee_active(id, false).unwrap();

    let updated: Employee = persistence
        .update_employee(id, "X101", "Xavier Lima", "Lead", Decimal::new(150_050, 2))
        .unwrap();

    assert_eq!(updated.reference, EmployeeRef::Persisted(id));
    assert_eq!(updated.badge, "X101");
    assert_eq!(updated.name, "Xavier Lima");
    assert_eq!(updated.title, "Lead");
    assert_eq!(updated.salary, Decimal::new(150_050, 2));
    assert!(!updated.active);
    assert_eq!(persistence.get_employee(id).unwrap(), updated);
}

#[test]
fn test_update_employee_rejects_taken_badge_and_missing_id() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    persistence
        .create_employee("X100", "Xavier", "Engineer", Decimal::from(1000))
        .unwrap();
    let other: Employee = persistence
        .create_employee("Y200", "Yara", "Engineer", Decimal::from(1000))
        .unwrap();
    let other_id: i64 = other.reference.persisted_id().unwrap();

    assert_eq!(
        persistence.update_employee(other_id, "X100", "Yara", "Engineer", Decimal::from(1000)),
        Err(PersistenceError::DuplicateBadge(String::from("X100")))
    );
    assert_eq!(persistence.get_employee(other_id).unwrap().badge, "Y200");

    assert_eq!(
        persistence.update_employee(99, "Z300", "Zed", "Engineer", Decimal::from(1000)),
        Err(PersistenceError::EmployeeNotFound(99))
    );
}
