// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Mutation modules for persistence layer.
//!
//! This module contains all state-changing operations for the persistence layer.
//! Mutations use Diesel DSL, with `last_insert_rowid()` taken from the
//! `backend` module.
//!
//! ## Module Organization
//!
//! - `employees`: Employee creation, edits and activation
//! - `simulations`: Simulation lifecycle and replace-all chain saves
//! - `movements`: Single movement record writes

pub mod employees;
pub mod movements;
pub mod simulations;

pub use employees::{create_employee, set_employee_active, update_employee};
pub use movements::{delete_movements_for_simulation, insert_movement_record};
pub use simulations::{
    create_simulation, delete_simulation, duplicate_simulation, finalize_simulation, save_chain,
    update_simulation,
};
