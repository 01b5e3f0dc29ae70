// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! CSV export of a simulation's payroll impact.
//!
//! The file is `;` separated and starts with a UTF-8 byte order mark so
//! spreadsheet tools open it with the right encoding. Detail rows are
//! followed by a blank line and four summary lines.

use csv::{Writer, WriterBuilder};
use paysim_domain::{Decimal, ImpactSummary};
use rust_decimal::RoundingStrategy;

use crate::error::ApiError;
use crate::request_response::CsvReport;

const BOM: &[u8] = b"\xEF\xBB\xBF";

/// Column headers of the detail section.
pub const REPORT_HEADERS: [&str; 9] = [
    "Badge",
    "Name",
    "Previous Title",
    "New Title",
    "Previous Salary",
    "New Salary",
    "Difference",
    "Difference %",
    "Type",
];

fn fixed(value: Decimal, places: u32) -> String {
    let rounded: Decimal =
        value.round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero);
    let places: usize = places as usize;
    format!("{rounded:.places$}")
}

fn amount(value: Decimal) -> String {
    fixed(value, 2)
}

fn percent(value: Decimal) -> String {
    format!("{}%", fixed(value, 1))
}

fn csv_error(err: impl std::fmt::Display) -> ApiError {
    ApiError::Internal {
        message: format!("Failed to write CSV report: {err}"),
    }
}

fn writer(buffer: Vec<u8>) -> Writer<Vec<u8>> {
    WriterBuilder::new()
        .delimiter(b';')
        .flexible(true)
        .from_writer(buffer)
}

/// File name for a simulation report.
///
/// Runs of whitespace, control characters, quotes, backslashes and slashes
/// become a single `_`, so the name is safe inside a quoted
/// `Content-Disposition` value.
#[must_use]
pub fn report_filename(simulation_name: &str) -> String {
    let mut name: String = String::with_capacity(simulation_name.len());
    let mut in_separator: bool = false;
    for c in simulation_name.chars() {
        if c.is_whitespace() || c.is_control() || matches!(c, '"' | '\\' | '/') {
            if !in_separator {
                name.push('_');
            }
            in_separator = true;
        } else {
            name.push(c);
            in_separator = false;
        }
    }
    format!("simulation_{name}.csv")
}

/// Renders an impact summary as CSV.
///
/// # Errors
///
/// Returns [`ApiError::Internal`] if the CSV writer fails.
pub fn render_impact_csv(impact: &ImpactSummary) -> Result<Vec<u8>, ApiError> {
    let mut rows: Writer<Vec<u8>> = writer(BOM.to_vec());
    rows.write_record(REPORT_HEADERS).map_err(csv_error)?;

    for row in &impact.rows {
        rows.write_record([
            row.badge.as_str(),
            row.name.as_str(),
            row.from_title.as_str(),
            row.to_title.as_str(),
            amount(row.from_salary).as_str(),
            amount(row.to_salary).as_str(),
            amount(row.delta).as_str(),
            percent(row.percent).as_str(),
            row.category.label(),
        ])
        .map_err(csv_error)?;
    }

    let mut buffer: Vec<u8> = rows.into_inner().map_err(csv_error)?;
    buffer.push(b'\n');

    let mut footer: Writer<Vec<u8>> = writer(buffer);
    footer
        .write_record(["Total Before", amount(impact.total_before).as_str()])
        .map_err(csv_error)?;
    footer
        .write_record(["Total After", amount(impact.total_after).as_str()])
        .map_err(csv_error)?;
    footer
        .write_record(["Total Impact", amount(impact.impact_total).as_str()])
        .map_err(csv_error)?;
    footer
        .write_record(["Impact %", percent(impact.impact_percent).as_str()])
        .map_err(csv_error)?;

    footer.into_inner().map_err(csv_error)
}

/// Builds the CSV report of a simulation.
///
/// # Errors
///
/// Returns [`ApiError::Internal`] if the CSV writer fails.
pub fn build_report(simulation_name: &str, impact: &ImpactSummary) -> Result<CsvReport, ApiError> {
    Ok(CsvReport {
        filename: report_filename(simulation_name),
        content: render_impact_csv(impact)?,
    })
}
