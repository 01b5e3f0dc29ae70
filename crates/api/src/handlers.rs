// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for state-changing and read-only operations.

use paysim::{ChainBuilder, Command, Resolution, apply, reconstruct_from};
use paysim_domain::{
    Decimal, DomainError, Employee, EmployeeRef, ExitReason, ImpactSummary, MovementKind,
    SimulationStatus, compute_impact, count_events, parse_salary, validate_employee_fields,
    validate_simulation_name,
};
use paysim_persistence::{Persistence, SimulationSummary, StoredSimulation};
use std::str::FromStr;
use tracing::{debug, info};

use crate::error::{
    ApiError, chain_step_error, translate_core_error, translate_domain_error,
    translate_persistence_error,
};
use crate::external_hr::{ExternalQueryError, ExternalRecord, map_external_employees};
use crate::report::build_report;
use crate::request_response::{
    ChainCommandRequest, CreateEmployeeRequest, CreateSimulationRequest, CsvReport,
    DashboardStats, EmployeeInfo, EmployeeSelection, ExternalEmployeesResponse,
    ExternalErrorInfo, ExternalQueryResponse, ListEmployeesResponse, ListSimulationsResponse,
    MovementEventInfo, ResolutionRequest, SaveChainRequest, SetEmployeeActiveRequest,
    SimulationActionResponse, SimulationDetailResponse, UpdateEmployeeRequest,
};

// ============================================================================
// Employees
// ============================================================================

/// Lists active employees ordered by name.
///
/// # Errors
///
/// Returns an error if the store cannot be read.
pub fn list_employees(persistence: &mut Persistence) -> Result<ListEmployeesResponse, ApiError> {
    let employees: Vec<Employee> = persistence
        .list_active_employees()
        .map_err(translate_persistence_error)?;

    Ok(ListEmployeesResponse {
        employees: employees.into_iter().map(EmployeeInfo::from).collect(),
    })
}

/// Creates a new active employee.
///
/// # Errors
///
/// Returns an error if:
/// - The badge, name or title is blank
/// - The salary does not parse or is out of range
/// - Another employee already has the badge
pub fn create_employee(
    persistence: &mut Persistence,
    request: &CreateEmployeeRequest,
) -> Result<EmployeeInfo, ApiError> {
    let salary: Decimal = parse_salary(&request.salary).map_err(translate_domain_error)?;
    let (badge, name, title) =
        validate_employee_fields(&request.badge, &request.name, &request.title, salary)
            .map_err(translate_domain_error)?;

    let employee: Employee = persistence
        .create_employee(&badge, &name, &title, salary)
        .map_err(translate_persistence_error)?;

    info!(badge = %employee.badge, "Created employee");
    Ok(EmployeeInfo::from(employee))
}

/// Replaces an employee's badge, name, title and salary.
///
/// Chains already saved keep the snapshot taken when the employee joined
/// them.
///
/// # Errors
///
/// Returns an error if:
/// - The employee does not exist
/// - The badge, name or title is blank
/// - The salary does not parse or is out of range
/// - Another employee already has the badge
pub fn update_employee(
    persistence: &mut Persistence,
    employee_id: i64,
    request: &UpdateEmployeeRequest,
) -> Result<EmployeeInfo, ApiError> {
    let salary: Decimal = parse_salary(&request.salary).map_err(translate_domain_error)?;
    let (badge, name, title) =
        validate_employee_fields(&request.badge, &request.name, &request.title, salary)
            .map_err(translate_domain_error)?;

    let employee: Employee = persistence
        .update_employee(employee_id, &badge, &name, &title, salary)
        .map_err(translate_persistence_error)?;

    info!(employee_id, badge = %employee.badge, "Updated employee");
    Ok(EmployeeInfo::from(employee))
}

/// Activates or deactivates an employee.
///
/// Inactive employees drop out of the employee listing and cannot join new
/// chains.
///
/// # Errors
///
/// Returns an error if the employee does not exist.
pub fn set_employee_active(
    persistence: &mut Persistence,
    employee_id: i64,
    request: SetEmployeeActiveRequest,
) -> Result<EmployeeInfo, ApiError> {
    persistence
        .set_employee_active(employee_id, request.active)
        .map_err(translate_persistence_error)?;
    let employee: Employee = persistence
        .get_employee(employee_id)
        .map_err(translate_persistence_error)?;

    info!(
        employee_id,
        active = request.active,
        "Changed employee activation"
    );
    Ok(EmployeeInfo::from(employee))
}

// ============================================================================
// Simulations
// ============================================================================

/// Computes dashboard figures over a list of simulation summaries.
#[must_use]
pub fn dashboard_stats(summaries: &[SimulationSummary]) -> DashboardStats {
    let finalized: usize = summaries
        .iter()
        .filter(|s| s.status == SimulationStatus::Finalized)
        .count();
    let total_impact: Decimal = summaries.iter().map(|s| s.impact_total).sum();
    let average_impact: Decimal = if summaries.is_empty() {
        Decimal::ZERO
    } else {
        (total_impact / Decimal::from(summaries.len())).round_dp(2)
    };

    DashboardStats {
        total: summaries.len(),
        finalized,
        drafts: summaries.len() - finalized,
        total_impact,
        average_impact,
    }
}

/// Lists simulations newest first, with dashboard figures.
///
/// # Errors
///
/// Returns an error if the store cannot be read.
pub fn list_simulations(
    persistence: &mut Persistence,
) -> Result<ListSimulationsResponse, ApiError> {
    let simulations: Vec<SimulationSummary> = persistence
        .list_simulation_summaries()
        .map_err(translate_persistence_error)?;
    let stats: DashboardStats = dashboard_stats(&simulations);

    Ok(ListSimulationsResponse { simulations, stats })
}

/// Creates a new, empty draft simulation.
///
/// # Errors
///
/// Returns an error if the name is blank or too long, or the insert fails.
pub fn create_simulation(
    persistence: &mut Persistence,
    request: &CreateSimulationRequest,
) -> Result<SimulationActionResponse, ApiError> {
    let name: String = validate_simulation_name(&request.name).map_err(translate_domain_error)?;
    let description: Option<&str> = request
        .description
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty());

    let simulation_id: i64 = persistence
        .create_simulation(&name, description)
        .map_err(translate_persistence_error)?;

    Ok(SimulationActionResponse {
        simulation_id,
        message: format!("Created simulation '{name}'"),
    })
}

fn detail_response(stored: StoredSimulation) -> Result<SimulationDetailResponse, ApiError> {
    let simulation = stored.simulation;
    let simulation_id: i64 = simulation.simulation_id.ok_or_else(|| ApiError::Internal {
        message: String::from("Stored simulation has no id"),
    })?;

    let events: Vec<MovementEventInfo> = simulation
        .numbered_events()
        .map(|(order, event)| MovementEventInfo {
            order,
            event: event.clone(),
        })
        .collect();
    let impact: ImpactSummary = compute_impact(&simulation.events);
    let counts = count_events(&simulation.events);
    let builder: ChainBuilder =
        reconstruct_from(simulation.events).map_err(translate_core_error)?;

    Ok(SimulationDetailResponse {
        simulation_id,
        name: simulation.name,
        description: simulation.description,
        status: simulation.status,
        created_at: stored.created_at,
        updated_at: stored.updated_at,
        events,
        pending: builder.pending().to_vec(),
        impact,
        counts,
    })
}

/// Retrieves a simulation with its chain, open positions and impact.
///
/// # Errors
///
/// Returns an error if the simulation does not exist or its chain is invalid.
pub fn get_simulation(
    persistence: &mut Persistence,
    simulation_id: i64,
) -> Result<SimulationDetailResponse, ApiError> {
    let stored: StoredSimulation = persistence
        .get_simulation(simulation_id)
        .map_err(translate_persistence_error)?;
    detail_response(stored)
}

fn resolve_employee(
    persistence: &mut Persistence,
    selection: &EmployeeSelection,
) -> Result<Employee, ApiError> {
    match selection {
        EmployeeSelection::Persisted { employee_id } => persistence
            .get_employee(*employee_id)
            .map_err(translate_persistence_error),
        EmployeeSelection::External {
            badge,
            name,
            title,
            salary,
        } => {
            let salary: Decimal = parse_salary(salary).map_err(translate_domain_error)?;
            let (badge, name, title) = validate_employee_fields(badge, name, title, salary)
                .map_err(translate_domain_error)?;
            Ok(Employee::new(
                EmployeeRef::External(badge.clone()),
                &badge,
                &name,
                &title,
                salary,
            ))
        }
    }
}

fn to_command(
    persistence: &mut Persistence,
    request: &ChainCommandRequest,
) -> Result<Command, ApiError> {
    match request {
        ChainCommandRequest::StartChain {
            employee,
            exit_reason,
        } => Ok(Command::StartChain {
            exiting_employee: resolve_employee(persistence, employee)?,
            exit_reason: ExitReason::from_str(exit_reason).map_err(translate_domain_error)?,
        }),
        ChainCommandRequest::ResolveVacancy {
            vacancy,
            resolution,
        } => {
            let resolution: Resolution = match resolution {
                ResolutionRequest::InternalSubstitution {
                    destination,
                    new_title,
                    new_salary,
                    movement_kind,
                    note,
                } => Resolution::InternalSubstitution {
                    destination: resolve_employee(persistence, destination)?,
                    new_title: new_title.clone(),
                    new_salary: new_salary.clone(),
                    movement_kind: MovementKind::from_str(movement_kind)
                        .map_err(translate_domain_error)?,
                    note: note.clone(),
                },
                ResolutionRequest::NewHire {
                    title,
                    proposed_salary,
                    note,
                } => Resolution::NewHire {
                    title: title.clone(),
                    proposed_salary: proposed_salary.clone(),
                    note: note.clone(),
                },
                ResolutionRequest::ClosePosition { note } => {
                    Resolution::ClosePosition { note: note.clone() }
                }
            };
            Ok(Command::ResolveVacancy {
                vacancy: vacancy.clone(),
                resolution,
            })
        }
    }
}

/// Replays chain commands from an empty chain.
///
/// Persisted employees are looked up in the store; external employees are
/// built from the request. Errors name the 1-based command that failed.
///
/// # Errors
///
/// Returns an error if an employee does not exist or a command violates a
/// chain rule.
pub fn build_chain(
    persistence: &mut Persistence,
    commands: &[ChainCommandRequest],
) -> Result<ChainBuilder, ApiError> {
    let mut builder: ChainBuilder = ChainBuilder::new();

    for (index, request) in commands.iter().enumerate() {
        let step: usize = index + 1;
        let command: Command =
            to_command(persistence, request).map_err(|e| chain_step_error(step, e))?;
        builder = apply(&builder, command)
            .map_err(|e| chain_step_error(step, translate_core_error(e)))?;
    }

    debug!(
        event_count = builder.events().len(),
        pending = builder.pending().len(),
        "Built movement chain"
    );
    Ok(builder)
}

/// Replaces the chain of a simulation.
///
/// The commands are replayed from an empty chain. Nothing is saved unless
/// every command succeeds and no position is left open.
///
/// # Errors
///
/// Returns an error if:
/// - The name is blank or too long
/// - The simulation or a referenced employee does not exist
/// - A command violates a chain rule
/// - The chain is empty or still has open positions
/// - The store write fails
pub fn save_chain(
    persistence: &mut Persistence,
    simulation_id: i64,
    request: &SaveChainRequest,
) -> Result<SimulationDetailResponse, ApiError> {
    let name: String = validate_simulation_name(&request.name).map_err(translate_domain_error)?;
    let description: Option<&str> = request
        .description
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty());

    let builder: ChainBuilder = build_chain(persistence, &request.commands)?;
    if !builder.is_started() {
        return Err(translate_domain_error(DomainError::ChainNotStarted));
    }
    if !builder.is_complete() {
        return Err(ApiError::ChainIncomplete {
            pending: builder.pending().len(),
        });
    }

    let movement_count: usize = persistence
        .save_chain(simulation_id, &name, description, builder.events())
        .map_err(translate_persistence_error)?;
    info!(simulation_id, movement_count, "Saved simulation chain");

    get_simulation(persistence, simulation_id)
}

/// Marks a draft simulation as finalized.
///
/// # Errors
///
/// Returns an error if the simulation does not exist or is already finalized.
pub fn finalize_simulation(
    persistence: &mut Persistence,
    simulation_id: i64,
) -> Result<SimulationActionResponse, ApiError> {
    persistence
        .finalize_simulation(simulation_id)
        .map_err(translate_persistence_error)?;

    Ok(SimulationActionResponse {
        simulation_id,
        message: format!("Finalized simulation {simulation_id}"),
    })
}

/// Copies a simulation into a new draft.
///
/// # Errors
///
/// Returns an error if the simulation does not exist or the copy fails.
pub fn duplicate_simulation(
    persistence: &mut Persistence,
    simulation_id: i64,
) -> Result<SimulationActionResponse, ApiError> {
    let copy_id: i64 = persistence
        .duplicate_simulation(simulation_id)
        .map_err(translate_persistence_error)?;

    Ok(SimulationActionResponse {
        simulation_id: copy_id,
        message: format!("Duplicated simulation {simulation_id}"),
    })
}

/// Deletes a simulation and its chain.
///
/// # Errors
///
/// Returns an error if the simulation does not exist.
pub fn delete_simulation(
    persistence: &mut Persistence,
    simulation_id: i64,
) -> Result<SimulationActionResponse, ApiError> {
    persistence
        .delete_simulation(simulation_id)
        .map_err(translate_persistence_error)?;

    Ok(SimulationActionResponse {
        simulation_id,
        message: format!("Deleted simulation {simulation_id}"),
    })
}

/// Builds the CSV impact report of a simulation.
///
/// # Errors
///
/// Returns an error if the simulation does not exist or the report cannot
/// be written.
pub fn simulation_report(
    persistence: &mut Persistence,
    simulation_id: i64,
) -> Result<CsvReport, ApiError> {
    let stored: StoredSimulation = persistence
        .get_simulation(simulation_id)
        .map_err(translate_persistence_error)?;
    let impact: ImpactSummary = compute_impact(&stored.simulation.events);
    build_report(&stored.simulation.name, &impact)
}

// ============================================================================
// External HR system
// ============================================================================

/// Wraps the outcome of an external query in the relay response shape.
#[must_use]
pub fn external_query_response(
    result: Result<Vec<ExternalRecord>, ExternalQueryError>,
) -> ExternalQueryResponse {
    match result {
        Ok(records) => ExternalQueryResponse {
            success: true,
            data: Some(records),
            error: None,
        },
        Err(err) => ExternalQueryResponse {
            success: false,
            data: None,
            error: Some(ExternalErrorInfo {
                message: err.to_string(),
                status: err.status(),
                code: String::from(err.code()),
            }),
        },
    }
}

/// Maps external records to employees and counts the records skipped.
#[must_use]
pub fn external_employees_response(records: &[ExternalRecord]) -> ExternalEmployeesResponse {
    let employees: Vec<Employee> = map_external_employees(records);
    let skipped: usize = records.len().saturating_sub(employees.len());

    ExternalEmployeesResponse {
        employees: employees.into_iter().map(EmployeeInfo::from).collect(),
        skipped,
    }
}
