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
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use clap::Parser;
use paysim_api::{
    ApiError, CreateEmployeeRequest, CreateSimulationRequest, CsvReport, DEFAULT_EMPLOYEE_QUERY,
    EmployeeInfo, ExternalEmployeesResponse, ExternalHrClient, ExternalHrConfig, ExternalQuery,
    ExternalQueryError, ExternalQueryRequest, ExternalRecord, ListEmployeesResponse,
    ListSimulationsResponse, SaveChainRequest, SetEmployeeActiveRequest, SimulationActionResponse,
    SimulationDetailResponse, UpdateEmployeeRequest, create_employee, create_simulation,
    delete_simulation, duplicate_simulation, external_employees_response,
    external_query_response, finalize_simulation, get_simulation, list_employees,
    list_simulations, parse_parameter_string, save_chain, set_employee_active,
    simulation_report, update_employee,
};
use paysim_persistence::Persistence;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

/// Paysim Server - HTTP server for the payroll movement simulator
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long, env = "PAYSIM_DATABASE")]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, env = "PAYSIM_PORT", default_value_t = 3000)]
    port: u16,

    /// Address to bind the server to
    #[arg(short, long, env = "PAYSIM_BIND", default_value = "127.0.0.1")]
    bind: String,

    /// Base URL of the external HR system
    #[arg(long, env = "PAYSIM_EXTERNAL_BASE_URL")]
    external_base_url: Option<String>,

    /// User name for the external HR system
    #[arg(long, env = "PAYSIM_EXTERNAL_USERNAME")]
    external_username: Option<String>,

    /// Password for the external HR system
    #[arg(long, env = "PAYSIM_EXTERNAL_PASSWORD", hide_env_values = true)]
    external_password: Option<String>,

    /// Query code that lists employees
    #[arg(long, env = "PAYSIM_EXTERNAL_QUERY_CODE", default_value = DEFAULT_EMPLOYEE_QUERY)]
    external_query_code: String,

    /// Company code the employee query runs under
    #[arg(long, env = "PAYSIM_EXTERNAL_COMPANY_CODE", default_value = "0")]
    external_company_code: String,

    /// System code the employee query runs under
    #[arg(long, env = "PAYSIM_EXTERNAL_SYSTEM_CODE", default_value = "P")]
    external_system_code: String,

    /// Value of the `CODCOLIGADA` parameter of the employee query
    #[arg(long, env = "PAYSIM_EXTERNAL_COMPANY_PARAM", default_value = "1")]
    external_company_param: String,
}

/// Codes used to list employees from the external HR system.
#[derive(Debug, Clone)]
struct EmployeeQuerySettings {
    query_code: String,
    company_code: String,
    system_code: String,
    company_param: String,
}

impl EmployeeQuerySettings {
    /// Builds the employee query, optionally narrowed to one badge.
    fn query(&self, badge: Option<&str>) -> ExternalQuery {
        let mut query: ExternalQuery =
            ExternalQuery::new(&self.query_code, &self.company_code, &self.system_code);
        query
            .params
            .insert(String::from("CODCOLIGADA"), self.company_param.clone());
        if let Some(badge) = badge.map(str::trim).filter(|b| !b.is_empty()) {
            query
                .params
                .insert(String::from("CHAPA"), badge.to_string());
        }
        query
    }
}

impl Default for EmployeeQuerySettings {
    fn default() -> Self {
        Self {
            query_code: String::from(DEFAULT_EMPLOYEE_QUERY),
            company_code: String::from("0"),
            system_code: String::from("P"),
            company_param: String::from("1"),
        }
    }
}

/// Application state shared across handlers.
///
/// The store is behind a Mutex; the external client is optional and
/// shared read-only.
#[derive(Clone)]
struct AppState {
    /// The simulation store.
    persistence: Arc<Mutex<Persistence>>,
    /// Client for the external HR system, when configured.
    external: Option<Arc<ExternalHrClient>>,
    /// Codes of the employee listing query.
    employee_query: Arc<EmployeeQuerySettings>,
}

/// Query string of `GET /external/employees`.
#[derive(Debug, Clone, Default, Deserialize)]
struct ExternalEmployeesQuery {
    /// Restricts the listing to one badge.
    #[serde(default)]
    badge: Option<String>,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match &err {
            ApiError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            ApiError::DomainRuleViolation { .. } | ApiError::ChainIncomplete { .. } => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::ExternalService { status, code, .. } => external_status(code, *status),
            ApiError::Internal { .. } => {
                error!(error = %err, "Internal error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

/// Status code for a failed external query.
///
/// An error status sent by the external system is passed through.
fn external_status(code: &str, status: Option<u16>) -> StatusCode {
    if let Some(passed) = status
        .and_then(|s| StatusCode::from_u16(s).ok())
        .filter(|s| s.is_client_error() || s.is_server_error())
    {
        return passed;
    }
    match code {
        "INVALID_QUERY" => StatusCode::BAD_REQUEST,
        "NOT_CONFIGURED" => StatusCode::SERVICE_UNAVAILABLE,
        "TIMEOUT" => StatusCode::GATEWAY_TIMEOUT,
        _ => StatusCode::BAD_GATEWAY,
    }
}

/// Validates a query and runs it against the configured external system.
async fn run_external(
    app_state: &AppState,
    query: &ExternalQuery,
) -> Result<Vec<ExternalRecord>, ExternalQueryError> {
    query.validate()?;
    let client: &ExternalHrClient = app_state
        .external
        .as_deref()
        .ok_or(ExternalQueryError::NotConfigured)?;
    client.run_query(query).await
}

/// Handler for GET `/employees` endpoint.
async fn handle_list_employees(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<ListEmployeesResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: ListEmployeesResponse = list_employees(&mut persistence)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/employees` endpoint.
async fn handle_create_employee(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<CreateEmployeeRequest>,
) -> Result<Json<EmployeeInfo>, HttpError> {
    info!(badge = %req.badge, "Handling create_employee request");

    let mut persistence = app_state.persistence.lock().await;
    let employee: EmployeeInfo = create_employee(&mut persistence, &req)?;
    drop(persistence);

    Ok(Json(employee))
}

/// Handler for PUT `/employees/{employee_id}` endpoint.
async fn handle_update_employee(
    AxumState(app_state): AxumState<AppState>,
    Path(employee_id): Path<i64>,
    Json(req): Json<UpdateEmployeeRequest>,
) -> Result<Json<EmployeeInfo>, HttpError> {
    info!(employee_id, badge = %req.badge, "Handling update_employee request");

    let mut persistence = app_state.persistence.lock().await;
    let employee: EmployeeInfo = update_employee(&mut persistence, employee_id, &req)?;
    drop(persistence);

    Ok(Json(employee))
}

/// Handler for POST `/employees/{employee_id}/active` endpoint.
async fn handle_set_employee_active(
    AxumState(app_state): AxumState<AppState>,
    Path(employee_id): Path<i64>,
    Json(req): Json<SetEmployeeActiveRequest>,
) -> Result<Json<EmployeeInfo>, HttpError> {
    info!(
        employee_id,
        active = req.active,
        "Handling set_employee_active request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let employee: EmployeeInfo = set_employee_active(&mut persistence, employee_id, req)?;
    drop(persistence);

    Ok(Json(employee))
}

/// Handler for GET `/simulations` endpoint.
async fn handle_list_simulations(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<ListSimulationsResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: ListSimulationsResponse = list_simulations(&mut persistence)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/simulations` endpoint.
async fn handle_create_simulation(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<CreateSimulationRequest>,
) -> Result<Json<SimulationActionResponse>, HttpError> {
    info!(name = %req.name, "Handling create_simulation request");

    let mut persistence = app_state.persistence.lock().await;
    let response: SimulationActionResponse = create_simulation(&mut persistence, &req)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/simulations/{simulation_id}` endpoint.
async fn handle_get_simulation(
    AxumState(app_state): AxumState<AppState>,
    Path(simulation_id): Path<i64>,
) -> Result<Json<SimulationDetailResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: SimulationDetailResponse = get_simulation(&mut persistence, simulation_id)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for PUT `/simulations/{simulation_id}/chain` endpoint.
///
/// Replays the commands from an empty chain and replaces the stored chain
/// only when every command succeeds and no position is left open.
async fn handle_save_chain(
    AxumState(app_state): AxumState<AppState>,
    Path(simulation_id): Path<i64>,
    Json(req): Json<SaveChainRequest>,
) -> Result<Json<SimulationDetailResponse>, HttpError> {
    info!(
        simulation_id,
        command_count = req.commands.len(),
        "Handling save_chain request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: SimulationDetailResponse = save_chain(&mut persistence, simulation_id, &req)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/simulations/{simulation_id}/finalize` endpoint.
async fn handle_finalize_simulation(
    AxumState(app_state): AxumState<AppState>,
    Path(simulation_id): Path<i64>,
) -> Result<Json<SimulationActionResponse>, HttpError> {
    info!(simulation_id, "Handling finalize request");

    let mut persistence = app_state.persistence.lock().await;
    let response: SimulationActionResponse = finalize_simulation(&mut persistence, simulation_id)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/simulations/{simulation_id}/duplicate` endpoint.
async fn handle_duplicate_simulation(
    AxumState(app_state): AxumState<AppState>,
    Path(simulation_id): Path<i64>,
) -> Result<Json<SimulationActionResponse>, HttpError> {
    info!(simulation_id, "Handling duplicate request");

    let mut persistence = app_state.persistence.lock().await;
    let response: SimulationActionResponse =
        duplicate_simulation(&mut persistence, simulation_id)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for DELETE `/simulations/{simulation_id}` endpoint.
async fn handle_delete_simulation(
    AxumState(app_state): AxumState<AppState>,
    Path(simulation_id): Path<i64>,
) -> Result<Json<SimulationActionResponse>, HttpError> {
    info!(simulation_id, "Handling delete request");

    let mut persistence = app_state.persistence.lock().await;
    let response: SimulationActionResponse = delete_simulation(&mut persistence, simulation_id)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/simulations/{simulation_id}/report.csv` endpoint.
async fn handle_simulation_report(
    AxumState(app_state): AxumState<AppState>,
    Path(simulation_id): Path<i64>,
) -> Result<Response, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let report: CsvReport = simulation_report(&mut persistence, simulation_id)?;
    drop(persistence);

    let disposition: String = format!("attachment; filename=\"{}\"", report.filename);
    Ok((
        [
            (header::CONTENT_TYPE, String::from("text/csv; charset=utf-8")),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        report.content,
    )
        .into_response())
}

/// Handler for GET `/external/query` endpoint.
///
/// Always answers with the `{success, data | error}` envelope; the status
/// code follows the outcome.
async fn handle_external_query(
    AxumState(app_state): AxumState<AppState>,
    Query(req): Query<ExternalQueryRequest>,
) -> Response {
    let mut query: ExternalQuery =
        ExternalQuery::new(&req.query_code, &req.company_code, &req.system_code);
    if let Some(raw) = req.params.as_deref() {
        query.params = parse_parameter_string(raw);
    }

    let result: Result<Vec<ExternalRecord>, ExternalQueryError> =
        run_external(&app_state, &query).await;
    let status: StatusCode = match &result {
        Ok(records) => {
            info!(
                query_code = %query.query_code,
                records = records.len(),
                "External query succeeded"
            );
            StatusCode::OK
        }
        Err(err) => {
            warn!(query_code = %query.query_code, error = %err, "External query failed");
            external_status(err.code(), err.status())
        }
    };

    (status, Json(external_query_response(result))).into_response()
}

/// Handler for GET `/external/employees` endpoint.
async fn handle_external_employees(
    AxumState(app_state): AxumState<AppState>,
    Query(params): Query<ExternalEmployeesQuery>,
) -> Result<Json<ExternalEmployeesResponse>, HttpError> {
    let query: ExternalQuery = app_state.employee_query.query(params.badge.as_deref());
    let records: Vec<ExternalRecord> = run_external(&app_state, &query)
        .await
        .map_err(ApiError::from)?;

    let response: ExternalEmployeesResponse = external_employees_response(&records);
    info!(
        employees = response.employees.len(),
        skipped = response.skipped,
        "Mapped external employees"
    );

    Ok(Json(response))
}

/// Builds the application router.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route(
            "/employees",
            get(handle_list_employees).post(handle_create_employee),
        )
        .route("/employees/{employee_id}", put(handle_update_employee))
        .route(
            "/employees/{employee_id}/active",
            post(handle_set_employee_active),
        )
        .route(
            "/simulations",
            get(handle_list_simulations).post(handle_create_simulation),
        )
        .route(
            "/simulations/{simulation_id}",
            get(handle_get_simulation).delete(handle_delete_simulation),
        )
        .route("/simulations/{simulation_id}/chain", put(handle_save_chain))
        .route(
            "/simulations/{simulation_id}/finalize",
            post(handle_finalize_simulation),
        )
        .route(
            "/simulations/{simulation_id}/duplicate",
            post(handle_duplicate_simulation),
        )
        .route(
            "/simulations/{simulation_id}/report.csv",
            get(handle_simulation_report),
        )
        .route("/external/query", get(handle_external_query))
        .route("/external/employees", get(handle_external_employees))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Paysim Server");

    let mut persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };
    persistence.verify_foreign_key_enforcement()?;

    let external: Option<Arc<ExternalHrClient>> = match ExternalHrConfig::from_parts(
        args.external_base_url.as_deref(),
        args.external_username.as_deref(),
        args.external_password.as_deref(),
    ) {
        Some(config) => {
            info!(base_url = %config.base_url, "External HR relay enabled");
            Some(Arc::new(ExternalHrClient::new(config)?))
        }
        None => {
            warn!("External HR relay not configured");
            None
        }
    };

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        external,
        employee_query: Arc::new(EmployeeQuerySettings {
            query_code: args.external_query_code,
            company_code: args.external_company_code,
            system_code: args.external_system_code,
            company_param: args.external_company_param,
        }),
    };

    let app: Router = build_router(app_state);

    let addr: std::net::SocketAddr = format!("{}:{}", args.bind, args.port).parse()?;
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
