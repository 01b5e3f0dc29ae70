// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Query modules for persistence layer.
//!
//! This module contains all read-only queries for the persistence layer.
//!
//! ## Module Organization
//!
//! - `employees`: Employee lookups
//! - `simulations`: Simulation headers, full simulations and summaries
//! - `movements`: Ordered movement records of a simulation

pub mod employees;
pub mod movements;
pub mod simulations;

pub use employees::{get_employee, list_active_employees};
pub use movements::load_movement_records;
pub use simulations::{get_simulation, list_simulation_summaries};
