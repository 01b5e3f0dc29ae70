// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.

use paysim_domain::{
    Decimal, Employee, EmployeeRef, EventCounts, ImpactSummary, MovementEvent, PendingVacancy,
    SimulationStatus,
};
use paysim_persistence::SimulationSummary;
use serde::{Deserialize, Serialize};

use crate::external_hr::ExternalRecord;

/// Employee information as exposed by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeInfo {
    /// Where the employee comes from.
    pub reference: EmployeeRef,
    /// Badge code.
    pub badge: String,
    /// Full name.
    pub name: String,
    /// Job title.
    pub title: String,
    /// Monthly salary.
    pub salary: Decimal,
    /// Whether the employee is active.
    pub active: bool,
}

impl From<Employee> for EmployeeInfo {
    fn from(employee: Employee) -> Self {
        Self {
            reference: employee.reference,
            badge: employee.badge,
            name: employee.name,
            title: employee.title,
            salary: employee.salary,
            active: employee.active,
        }
    }
}

/// API response listing employees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListEmployeesResponse {
    /// The employees, ordered by name.
    pub employees: Vec<EmployeeInfo>,
}

/// API request to create an employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateEmployeeRequest {
    /// Badge code.
    pub badge: String,
    /// Full name.
    pub name: String,
    /// Job title.
    pub title: String,
    /// Monthly salary, as typed by the user.
    pub salary: String,
}

/// API request to replace an employee's fields.
///
/// The activation flag is changed separately.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateEmployeeRequest {
    /// Badge code.
    pub badge: String,
    /// Full name.
    pub name: String,
    /// Job title.
    pub title: String,
    /// Monthly salary, as typed by the user.
    pub salary: String,
}

/// API request to activate or deactivate an employee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetEmployeeActiveRequest {
    /// The new activation flag.
    pub active: bool,
}

/// API request to create a simulation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateSimulationRequest {
    /// Display name.
    pub name: String,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
}

/// API response for a simulation write that has no other payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationActionResponse {
    /// The simulation that was created or changed.
    pub simulation_id: i64,
    /// A success message.
    pub message: String,
}

/// Aggregate figures over all simulations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    /// Number of simulations.
    pub total: usize,
    /// Number of finalized simulations.
    pub finalized: usize,
    /// Number of draft simulations.
    pub drafts: usize,
    /// Sum of every simulation's impact.
    pub total_impact: Decimal,
    /// Mean impact per simulation. Zero when there are none.
    pub average_impact: Decimal,
}

/// API response listing simulations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListSimulationsResponse {
    /// Summaries, newest first.
    pub simulations: Vec<SimulationSummary>,
    /// Aggregate figures.
    pub stats: DashboardStats,
}

/// A chain event with its position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovementEventInfo {
    /// 1-based position in the chain.
    pub order: u32,
    /// The event.
    #[serde(flatten)]
    pub event: MovementEvent,
}

/// API response with a simulation, its chain and its payroll impact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationDetailResponse {
    /// Simulation identifier.
    pub simulation_id: i64,
    /// Display name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Lifecycle state.
    pub status: SimulationStatus,
    /// Creation timestamp.
    pub created_at: String,
    /// Last update timestamp.
    pub updated_at: String,
    /// Events in order.
    pub events: Vec<MovementEventInfo>,
    /// Positions still open.
    pub pending: Vec<PendingVacancy>,
    /// Payroll impact.
    pub impact: ImpactSummary,
    /// Number of events of each kind.
    pub counts: EventCounts,
}

/// Identifies the employee a chain command refers to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum EmployeeSelection {
    /// A stored employee, looked up by id.
    Persisted {
        /// The employee id.
        employee_id: i64,
    },
    /// An employee read from the external HR system.
    External {
        /// Badge code.
        badge: String,
        /// Full name.
        name: String,
        /// Job title.
        title: String,
        /// Monthly salary, as text.
        salary: String,
    },
}

/// How a vacancy is resolved, as sent by a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResolutionRequest {
    /// An existing employee moves into the position.
    InternalSubstitution {
        /// The employee moving in.
        destination: EmployeeSelection,
        /// Title after the move.
        new_title: String,
        /// Salary after the move, as text.
        new_salary: String,
        /// `promotion`, `lateral` or `raise`.
        movement_kind: String,
        /// Optional note.
        #[serde(default)]
        note: Option<String>,
    },
    /// The position is filled by an external hire.
    NewHire {
        /// Title of the position.
        title: String,
        /// Proposed salary, as text.
        proposed_salary: String,
        /// Optional note.
        #[serde(default)]
        note: Option<String>,
    },
    /// The position is eliminated.
    ClosePosition {
        /// Optional note.
        #[serde(default)]
        note: Option<String>,
    },
}

/// One step of chain construction, as sent by a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ChainCommandRequest {
    /// Start the chain with an employee's departure.
    StartChain {
        /// The departing employee.
        employee: EmployeeSelection,
        /// `resignation`, `termination`, `retirement`, `transfer` or `other`.
        exit_reason: String,
    },
    /// Resolve the vacancy left by an employee.
    ResolveVacancy {
        /// The employee whose former position is open.
        vacancy: EmployeeRef,
        /// How the position is resolved.
        resolution: ResolutionRequest,
    },
}

/// API request to replace the chain of a simulation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveChainRequest {
    /// Display name.
    pub name: String,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
    /// Commands replayed from an empty chain.
    pub commands: Vec<ChainCommandRequest>,
}

/// Query string for relaying an external query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalQueryRequest {
    /// Registered query code.
    pub query_code: String,
    /// Company code.
    pub company_code: String,
    /// System code.
    pub system_code: String,
    /// Parameters as `KEY=VALUE;KEY2=VALUE2`.
    #[serde(default)]
    pub params: Option<String>,
}

/// Error details of a failed external query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalErrorInfo {
    /// A human-readable description.
    pub message: String,
    /// HTTP status returned by the external system, if any.
    pub status: Option<u16>,
    /// Stable error code.
    pub code: String,
}

/// API response for a relayed external query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalQueryResponse {
    /// Whether the query succeeded.
    pub success: bool,
    /// Records returned on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<ExternalRecord>>,
    /// Error details on failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ExternalErrorInfo>,
}

/// API response listing employees read from the external HR system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalEmployeesResponse {
    /// Employees that could be mapped.
    pub employees: Vec<EmployeeInfo>,
    /// Number of records that were skipped.
    pub skipped: usize,
}

/// A generated CSV report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvReport {
    /// Suggested file name.
    pub filename: String,
    /// File contents, UTF-8 with a byte order mark.
    pub content: Vec<u8>,
}
