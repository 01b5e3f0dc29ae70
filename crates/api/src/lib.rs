// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary for the payroll movement simulator.
//!
//! Handlers translate request DTOs into core commands and store calls, and
//! translate every lower-layer error into an [`ApiError`]. They are
//! synchronous and take the persistence adapter explicitly; the HTTP layer
//! decides how access to it is shared.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod error;
pub mod external_hr;
mod handlers;
pub mod report;
mod request_response;

#[cfg(test)]
mod tests;

pub use error::{
    ApiError, chain_step_error, translate_core_error, translate_domain_error,
    translate_persistence_error,
};
pub use external_hr::{
    DEFAULT_EMPLOYEE_QUERY, ExternalHrClient, ExternalHrConfig, ExternalQuery, ExternalQueryError,
    ExternalRecord, format_parameters, map_external_employees, parse_parameter_string,
};
pub use handlers::{
    build_chain, create_employee, create_simulation, dashboard_stats, delete_simulation,
    duplicate_simulation, external_employees_response, external_query_response,
    finalize_simulation, get_simulation, list_employees, list_simulations, save_chain,
    set_employee_active, simulation_report, update_employee,
};
pub use request_response::{
    ChainCommandRequest, CreateEmployeeRequest, CreateSimulationRequest, CsvReport,
    DashboardStats, EmployeeInfo, EmployeeSelection, ExternalEmployeesResponse,
    ExternalErrorInfo, ExternalQueryRequest, ExternalQueryResponse, ListEmployeesResponse,
    ListSimulationsResponse, MovementEventInfo, ResolutionRequest, SaveChainRequest,
    SetEmployeeActiveRequest, SimulationActionResponse, SimulationDetailResponse,
    UpdateEmployeeRequest,
};
