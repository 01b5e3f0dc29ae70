// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::types::{EmployeeRef, SimulationStatus};

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A required text field is empty after trimming.
    EmptyField {
        /// Name of the field.
        field: &'static str,
    },
    /// Salary text could not be parsed or is not strictly positive.
    InvalidSalary(String),
    /// Salary exceeds the accepted maximum.
    SalaryOutOfRange(String),
    /// The employee already appears in the chain.
    DuplicateEmployee(EmployeeRef),
    /// The employee is inactive and cannot take a position.
    InactiveEmployee(EmployeeRef),
    /// The chain already has an initial exit.
    ChainAlreadyStarted,
    /// The chain has no initial exit yet.
    ChainNotStarted,
    /// No pending vacancy was left by the referenced employee.
    VacancyNotPending(EmployeeRef),
    /// Unknown exit reason.
    InvalidExitReason(String),
    /// Unknown movement kind.
    InvalidMovementKind(String),
    /// Unknown simulation status.
    InvalidSimulationStatus(String),
    /// Unknown event kind.
    InvalidEventKind(String),
    /// Status change not permitted by the simulation lifecycle.
    InvalidStatusTransition {
        /// Current status.
        from: SimulationStatus,
        /// Requested status.
        to: SimulationStatus,
    },
    /// Simulation name is empty or too long.
    InvalidSimulationName(String),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyField { field } => write!(f, "Field '{field}' must not be empty"),
            Self::InvalidSalary(msg) => write!(f, "Invalid salary: {msg}"),
            Self::SalaryOutOfRange(value) => {
                write!(f, "Salary {value} exceeds the maximum of 9999999.99")
            }
            Self::DuplicateEmployee(reference) => {
                write!(f, "{reference} already takes part in this movement chain")
            }
            Self::InactiveEmployee(reference) => {
                write!(f, "{reference} is inactive and cannot fill a position")
            }
            Self::ChainAlreadyStarted => write!(f, "Movement chain has already been started"),
            Self::ChainNotStarted => write!(f, "Movement chain has not been started"),
            Self::VacancyNotPending(reference) => {
                write!(f, "No pending vacancy left by {reference}")
            }
            Self::InvalidExitReason(value) => write!(f, "Invalid exit reason: {value}"),
            Self::InvalidMovementKind(value) => write!(f, "Invalid movement kind: {value}"),
            Self::InvalidSimulationStatus(value) => {
                write!(f, "Invalid simulation status: {value}")
            }
            Self::InvalidEventKind(value) => write!(f, "Invalid event kind: {value}"),
            Self::InvalidStatusTransition { from, to } => {
                write!(f, "Cannot transition simulation from {from} to {to}")
            }
            Self::InvalidSimulationName(msg) => write!(f, "Invalid simulation name: {msg}"),
        }
    }
}

impl std::error::Error for DomainError {}
