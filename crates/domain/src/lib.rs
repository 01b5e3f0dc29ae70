// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

pub mod currency;
mod error;
mod impact;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use error::DomainError;
pub use impact::{
    EventCounts, ImpactCategory, ImpactRow, ImpactSummary, compute_impact, count_events,
};
pub use types::{
    Employee, EmployeeRef, EmployeeSnapshot, EventKind, ExitReason, MovementEvent, MovementKind,
    PendingVacancy, Simulation, SimulationStatus,
};
pub use validation::{
    MAX_SALARY, MAX_SIMULATION_NAME_LEN, normalize_note, parse_salary, validate_employee_fields,
    validate_employee_unique_in_chain, validate_required_text, validate_salary,
    validate_simulation_name,
};

// Re-exported so dependents share one decimal type.
pub use rust_decimal::Decimal;
