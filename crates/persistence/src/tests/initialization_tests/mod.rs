// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Backend initialization tests.
//!
//! Every other persistence test also exercises connection setup, migrations
//! and foreign key enforcement through `Persistence::new_in_memory()`.

use crate::{Persistence, PersistenceError};

#[test]
fn test_persistence_initialization() {
    let result: Result<Persistence, PersistenceError> = Persistence::new_in_memory();
    assert!(result.is_ok());
}

#[test]
fn test_multiple_in_memory_instances_are_isolated() {
    let mut db1 = Persistence::new_in_memory().unwrap();
    let mut db2 = Persistence::new_in_memory().unwrap();

    db1.create_simulation("Only in db1", None).unwrap();

    assert_eq!(db1.list_simulation_summaries().unwrap().len(), 1);
    assert_eq!(
        db2.list_simulation_summaries().unwrap().len(),
        0,
        "db2 should not see db1's simulation"
    );
}

#[test]
fn test_migrations_create_expected_tables() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let tables: Vec<String> = persistence.list_tables().unwrap();
    assert_eq!(tables, vec!["employees", "movements", "simulations"]);
}

#[test]
fn test_foreign_keys_are_enforced() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    assert!(persistence.verify_foreign_key_enforcement().is_ok());
}

#[test]
fn test_file_database_initialization() {
    let path = std::env::temp_dir().join(format!(
        "paysim_init_test_{}.db",
        std::process::id()
    ));
    let _ = std::fs::remove_file(&path);

    {
        let mut persistence = Persistence::new_with_file(&path).unwrap();
        persistence.create_simulation("On disk", None).unwrap();
    }
    {
        let mut reopened = Persistence::new_with_file(&path).unwrap();
        let summaries = reopened.list_simulation_summaries().unwrap();
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].name, "On disk");
    }

    let _ = std::fs::remove_file(&path);
    let _ = std::fs::remove_file(path.with_extension("db-wal"));
    let _ = std::fs::remove_file(path.with_extension("db-shm"));
}
