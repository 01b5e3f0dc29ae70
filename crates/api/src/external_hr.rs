// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Relay to the external HR system's SQL query endpoint.
//!
//! The external system exposes named, pre-registered queries addressed by
//! query code, company code and system code. Query parameters travel as a
//! single `parameters` value of the form `KEY=VALUE;KEY2=VALUE2`.
//!
//! Employees read from the external system are never stored. They are
//! mapped to [`Employee`] values carrying an [`EmployeeRef::External`]
//! reference and take part in chains through their snapshots only.

use paysim_domain::{Employee, EmployeeRef, parse_salary};
use reqwest::Url;
use reqwest::header::ACCEPT;
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashSet};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Path of the query endpoint, relative to the configured base URL.
pub const QUERY_PATH: &str = "/api/framework/v1/consultaSQLServer/RealizaConsulta";

/// Query code used to list employees when none is configured.
pub const DEFAULT_EMPLOYEE_QUERY: &str = "NISFOL0088";

const REQUEST_TIMEOUT_SECS: u64 = 30;

const BADGE_FIELDS: &[&str] = &["CHAPA_FUNC", "CHAPA"];
const NAME_FIELDS: &[&str] = &["NOME_FUNC", "NOME"];
const TITLE_FIELDS: &[&str] = &["FUNCAO_FUNC", "CARGO"];
const SALARY_FIELDS: &[&str] = &["SALARIO_FUNC", "SALARIO"];

/// A raw record returned by the external system.
pub type ExternalRecord = Map<String, Value>;

/// Errors raised while talking to the external HR system.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExternalQueryError {
    /// The query is missing a required code.
    #[error("Invalid query: {0}")]
    InvalidQuery(String),
    /// No base URL or credentials were configured.
    #[error("External HR system is not configured")]
    NotConfigured,
    /// The external system answered with an error status.
    #[error("External HR system answered with HTTP {status}: {message}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Description of the failure.
        message: String,
    },
    /// The request did not complete in time.
    #[error("External HR system did not answer within {0} seconds")]
    Timeout(u64),
    /// The body could not be read as JSON.
    #[error("Invalid response from external HR system: {0}")]
    InvalidResponse(String),
    /// The external system could not be reached.
    #[error("Could not reach external HR system: {0}")]
    Network(String),
}

impl ExternalQueryError {
    /// Stable code reported to API clients.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidQuery(_) => "INVALID_QUERY",
            Self::NotConfigured => "NOT_CONFIGURED",
            Self::Http { .. } => "HTTP_ERROR",
            Self::Timeout(_) => "TIMEOUT",
            Self::InvalidResponse(_) => "INVALID_RESPONSE",
            Self::Network(_) => "NETWORK_ERROR",
        }
    }

    /// HTTP status associated with the error, if the external system sent one.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// A named query against the external HR system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalQuery {
    /// Registered query code.
    pub query_code: String,
    /// Company code. `"0"` is a valid company.
    pub company_code: String,
    /// System code.
    pub system_code: String,
    /// Query parameters.
    pub params: BTreeMap<String, String>,
}

impl ExternalQuery {
    /// Creates a query without parameters.
    #[must_use]
    pub fn new(query_code: &str, company_code: &str, system_code: &str) -> Self {
        Self {
            query_code: query_code.trim().to_string(),
            company_code: company_code.trim().to_string(),
            system_code: system_code.trim().to_string(),
            params: BTreeMap::new(),
        }
    }

    /// Checks that every code is present and safe to place in a URL path.
    ///
    /// Codes may only contain ASCII letters, digits, `_`, `.` and `-`, and
    /// cannot consist of dots alone. The company code must be numeric.
    ///
    /// # Errors
    ///
    /// Returns [`ExternalQueryError::InvalidQuery`] naming the first bad code.
    pub fn validate(&self) -> Result<(), ExternalQueryError> {
        let codes: [(&str, &str); 3] = [
            ("query_code", self.query_code.as_str()),
            ("company_code", self.company_code.as_str()),
            ("system_code", self.system_code.as_str()),
        ];
        for (field, value) in codes {
            if value.trim().is_empty() {
                return Err(ExternalQueryError::InvalidQuery(format!(
                    "{field} is required"
                )));
            }
            if !is_path_safe_code(value) {
                return Err(ExternalQueryError::InvalidQuery(format!(
                    "{field} may only contain letters, digits, '_', '.' and '-'"
                )));
            }
        }
        if !self.company_code.chars().all(|c| c.is_ascii_digit()) {
            return Err(ExternalQueryError::InvalidQuery(String::from(
                "company_code must be numeric",
            )));
        }
        Ok(())
    }

    /// Endpoint path for this query, without parameters.
    #[must_use]
    pub fn path(&self) -> String {
        format!(
            "{QUERY_PATH}/{}/{}/{}",
            self.query_code, self.company_code, self.system_code
        )
    }

    /// Full URL for this query against `base_url`, with parameters encoded.
    ///
    /// Each code is appended as its own percent-encoded path segment.
    ///
    /// # Errors
    ///
    /// Returns [`ExternalQueryError::InvalidQuery`] if the query is invalid or
    /// the URL cannot be built.
    pub fn url(&self, base_url: &str) -> Result<Url, ExternalQueryError> {
        self.validate()?;
        let mut url: Url = Url::parse(base_url)
            .map_err(|e| ExternalQueryError::InvalidQuery(format!("invalid URL: {e}")))?;
        url.path_segments_mut()
            .map_err(|()| {
                ExternalQueryError::InvalidQuery(format!(
                    "base URL cannot carry a path: {base_url}"
                ))
            })?
            .pop_if_empty()
            .extend(QUERY_PATH.split('/').filter(|segment| !segment.is_empty()))
            .extend([
                self.query_code.as_str(),
                self.company_code.as_str(),
                self.system_code.as_str(),
            ]);
        if !self.params.is_empty() {
            url.query_pairs_mut()
                .append_pair("parameters", &format_parameters(&self.params));
        }
        Ok(url)
    }
}

fn is_path_safe_code(code: &str) -> bool {
    code.chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
        && !code.chars().all(|c| c == '.')
}

/// Joins parameters as `KEY=VALUE;KEY2=VALUE2`.
///
/// Values are kept as given so leading zeros survive.
#[must_use]
pub fn format_parameters(params: &BTreeMap<String, String>) -> String {
    params
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<String>>()
        .join(";")
}

/// Parses `KEY=VALUE;KEY2=VALUE2` into a map.
///
/// Pairs are split on the first `=`. Keys and values are trimmed. Pairs
/// without `=` or with an empty key are skipped.
#[must_use]
pub fn parse_parameter_string(raw: &str) -> BTreeMap<String, String> {
    raw.split(';')
        .filter_map(|pair| pair.split_once('='))
        .map(|(key, value)| (key.trim(), value.trim()))
        .filter(|(key, _)| !key.is_empty())
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}

/// Connection settings for the external HR system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalHrConfig {
    /// Base URL, without trailing slashes.
    pub base_url: String,
    /// Basic auth user.
    pub username: String,
    /// Basic auth password.
    pub password: String,
}

impl ExternalHrConfig {
    /// Creates a configuration, stripping trailing slashes from the base URL.
    #[must_use]
    pub fn new(base_url: &str, username: &str, password: &str) -> Self {
        Self {
            base_url: base_url.trim().trim_end_matches('/').to_string(),
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    /// Builds a configuration when every setting is present and non-blank.
    #[must_use]
    pub fn from_parts(
        base_url: Option<&str>,
        username: Option<&str>,
        password: Option<&str>,
    ) -> Option<Self> {
        Some(Self::new(
            non_blank(base_url)?,
            non_blank(username)?,
            non_blank(password)?,
        ))
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// HTTP client for the external HR system.
#[derive(Debug, Clone)]
pub struct ExternalHrClient {
    config: ExternalHrConfig,
    http: reqwest::Client,
}

impl ExternalHrClient {
    /// Creates a client with a 30 second request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ExternalQueryError::Network`] if the HTTP client cannot be built.
    pub fn new(config: ExternalHrConfig) -> Result<Self, ExternalQueryError> {
        let http: reqwest::Client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| ExternalQueryError::Network(e.to_string()))?;
        Ok(Self { config, http })
    }

    /// Runs a query and returns the records it produced.
    ///
    /// # Errors
    ///
    /// Returns an error if the query is invalid, the request fails or times
    /// out, the external system answers with an error status, or the body is
    /// not JSON.
    pub async fn run_query(
        &self,
        query: &ExternalQuery,
    ) -> Result<Vec<ExternalRecord>, ExternalQueryError> {
        query.validate()?;
        let url: Url = query.url(&self.config.base_url)?;
        debug!(query_code = %query.query_code, path = %query.path(), "Running external query");

        let response: reqwest::Response = self
            .http
            .get(url)
            .basic_auth(&self.config.username, Some(&self.config.password))
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ExternalQueryError::Timeout(REQUEST_TIMEOUT_SECS)
                } else {
                    ExternalQueryError::Network(e.to_string())
                }
            })?;

        let status: u16 = response.status().as_u16();
        if !response.status().is_success() {
            let body: String = response.text().await.unwrap_or_default();
            warn!(query_code = %query.query_code, status, "External query failed");
            return Err(ExternalQueryError::Http {
                status,
                message: status_message(status, &body),
            });
        }

        let body: Value = response.json().await.map_err(|e| {
            if e.is_timeout() {
                ExternalQueryError::Timeout(REQUEST_TIMEOUT_SECS)
            } else {
                ExternalQueryError::InvalidResponse(e.to_string())
            }
        })?;

        let records: Vec<ExternalRecord> = extract_records(body);
        info!(
            query_code = %query.query_code,
            record_count = records.len(),
            "External query completed"
        );
        Ok(records)
    }
}

fn status_message(status: u16, body: &str) -> String {
    match status {
        400 => serde_json::from_str::<Value>(body)
            .ok()
            .and_then(|v| v.get("message").and_then(Value::as_str).map(String::from))
            .unwrap_or_else(|| String::from("Invalid parameters for the query")),
        401 => String::from("Invalid or missing credentials"),
        403 => String::from("Not allowed to run this query"),
        404 => String::from("Query not found"),
        s if s >= 500 => String::from("External server error"),
        _ => String::from("Unexpected response"),
    }
}

/// Pulls the record list out of a response body.
///
/// Accepts a bare array, or an object holding the array under `dados`,
/// `data` or `records`. Any other object is a single record, unless it
/// carries `error` or `message`. Non-object entries are dropped.
#[must_use]
pub fn extract_records(body: Value) -> Vec<ExternalRecord> {
    let objects = |items: Vec<Value>| -> Vec<ExternalRecord> {
        items
            .into_iter()
            .filter_map(|item| match item {
                Value::Object(map) => Some(map),
                _ => None,
            })
            .collect()
    };

    match body {
        Value::Array(items) => objects(items),
        Value::Object(mut map) => {
            for key in ["dados", "data", "records"] {
                if let Some(Value::Array(items)) = map.remove(key) {
                    return objects(items);
                }
            }
            if map.contains_key("error") || map.contains_key("message") {
                Vec::new()
            } else {
                vec![map]
            }
        }
        _ => Vec::new(),
    }
}

fn field_text(record: &ExternalRecord, names: &[&str]) -> Option<String> {
    names
        .iter()
        .find_map(|name| match record.get(*name) {
            Some(Value::String(s)) => Some(s.trim().to_string()),
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        })
        .filter(|s| !s.is_empty())
}

/// Maps external records to employees.
///
/// Records without a badge, name, title or valid salary are skipped, as are
/// repeated badges.
#[must_use]
pub fn map_external_employees(records: &[ExternalRecord]) -> Vec<Employee> {
    let mut seen: HashSet<String> = HashSet::new();

    records
        .iter()
        .filter_map(|record| {
            let badge: String = field_text(record, BADGE_FIELDS)?;
            let name: String = field_text(record, NAME_FIELDS)?;
            let title: String = field_text(record, TITLE_FIELDS)?;
            let salary = parse_salary(&field_text(record, SALARY_FIELDS)?).ok()?;
            Some(Employee::new(
                EmployeeRef::External(badge.to_uppercase()),
                &badge,
                &name,
                &title,
                salary,
            ))
        })
        .filter(|employee| seen.insert(employee.badge.clone()))
        .collect()
}
