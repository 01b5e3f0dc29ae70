// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use paysim::CoreError;
use paysim_domain::DomainError;
use paysim_persistence::PersistenceError;

use crate::external_hr::ExternalQueryError;

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A domain rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// The chain still has open positions and cannot be saved.
    ChainIncomplete {
        /// Number of positions still open.
        pending: usize,
    },
    /// The external HR system failed or is not configured.
    ExternalService {
        /// A human-readable description of the failure.
        message: String,
        /// HTTP status returned by the external system, when there was one.
        status: Option<u16>,
        /// Stable error code.
        code: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::ChainIncomplete { pending } => {
                write!(
                    f,
                    "Movement chain is incomplete: {pending} position(s) still open"
                )
            }
            Self::ExternalService { message, code, .. } => {
                write!(f, "External HR system error ({code}): {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<ExternalQueryError> for ApiError {
    fn from(err: ExternalQueryError) -> Self {
        Self::ExternalService {
            message: err.to_string(),
            status: err.status(),
            code: String::from(err.code()),
        }
    }
}

fn rule(rule: &str, err: &DomainError) -> ApiError {
    ApiError::DomainRuleViolation {
        rule: String::from(rule),
        message: err.to_string(),
    }
}

fn input(field: &str, err: &DomainError) -> ApiError {
    ApiError::InvalidInput {
        field: String::from(field),
        message: err.to_string(),
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match &err {
        DomainError::EmptyField { field } => input(field, &err),
        DomainError::InvalidSalary(_) | DomainError::SalaryOutOfRange(_) => input("salary", &err),
        DomainError::InvalidExitReason(_) => input("exit_reason", &err),
        DomainError::InvalidMovementKind(_) => input("movement_kind", &err),
        DomainError::InvalidSimulationStatus(_) => input("status", &err),
        DomainError::InvalidEventKind(_) => input("event_kind", &err),
        DomainError::InvalidSimulationName(_) => input("name", &err),
        DomainError::DuplicateEmployee(_) => rule("unique_employee_in_chain", &err),
        DomainError::InactiveEmployee(_) => rule("active_employee", &err),
        DomainError::ChainAlreadyStarted => rule("single_initial_exit", &err),
        DomainError::ChainNotStarted => rule("chain_started", &err),
        DomainError::VacancyNotPending(_) => rule("pending_vacancy", &err),
        DomainError::InvalidStatusTransition { .. } => rule("status_transition", &err),
    }
}

/// Translates a core error into an API error.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::Reconstruction(msg) => ApiError::Internal {
            message: format!("Stored chain is invalid: {msg}"),
        },
    }
}

/// Translates a persistence error into an API error.
///
/// Missing rows become [`ApiError::ResourceNotFound`]. Storage failures are
/// internal errors.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::SimulationNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Simulation"),
            message: format!("Simulation {id} does not exist"),
        },
        PersistenceError::EmployeeNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Employee"),
            message: format!("Employee {id} does not exist"),
        },
        PersistenceError::DuplicateBadge(badge) => ApiError::DomainRuleViolation {
            rule: String::from("unique_badge"),
            message: format!("An employee with badge '{badge}' already exists"),
        },
        PersistenceError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        other => ApiError::Internal {
            message: other.to_string(),
        },
    }
}

/// Attaches the position of a failing chain command to its error.
///
/// Input errors inside a chain are reported as rule violations: the whole
/// chain is rejected, not a single field of the request.
#[must_use]
pub fn chain_step_error(step: usize, err: ApiError) -> ApiError {
    match err {
        ApiError::InvalidInput { field, message } => ApiError::DomainRuleViolation {
            rule: format!("valid_{field}"),
            message: format!("Command {step}: {message}"),
        },
        ApiError::DomainRuleViolation { rule, message } => ApiError::DomainRuleViolation {
            rule,
            message: format!("Command {step}: {message}"),
        },
        other => other,
    }
}
