// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::{EmployeeRef, MovementEvent};
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

/// Largest monthly salary accepted anywhere in the system.
pub const MAX_SALARY: Decimal = Decimal::from_parts(999_999_999, 0, 0, false, 2);

/// Maximum length of a simulation name, in characters.
pub const MAX_SIMULATION_NAME_LEN: usize = 100;

/// Parses a salary typed by a user into a decimal amount.
///
/// Accepts an optional `R$` prefix and surrounding whitespace. When a comma
/// is present it is the decimal separator and dots are thousands separators
/// (`"R$ 1.234,56"`). Without a comma, dots that split the digits into
/// groups of three are thousands separators (`"R$ 5.000"`, `"1.234.567"`);
/// any other dot is the decimal separator (`"1234.56"`).
/// The result is rounded to cents, half away from zero.
///
/// # Errors
///
/// Returns an error if:
/// - The text is not a number
/// - The amount is zero or negative
/// - The amount exceeds [`MAX_SALARY`]
pub fn parse_salary(raw: &str) -> Result<Decimal, DomainError> {
    let trimmed: &str = raw.trim();
    let without_symbol: &str = trimmed.strip_prefix("R$").unwrap_or(trimmed);
    let compact: String = without_symbol
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();

    if compact.is_empty() {
        return Err(DomainError::InvalidSalary(String::from(
            "Salary cannot be empty",
        )));
    }

    let normalized: String = if compact.contains(',') || has_thousands_grouping(&compact) {
        compact.replace('.', "").replace(',', ".")
    } else {
        compact
    };

    let value: Decimal = Decimal::from_str(&normalized)
        .map_err(|_| DomainError::InvalidSalary(format!("'{}' is not a number", raw.trim())))?
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

    validate_salary(value)?;
    Ok(value)
}

/// True for text like `5.000` or `1.234.567`: a lead group of one to three
/// digits followed by one or more dot-separated groups of exactly three.
fn has_thousands_grouping(text: &str) -> bool {
    let is_digits = |group: &str| group.chars().all(|c| c.is_ascii_digit());
    let mut groups = text.split('.').peekable();
    let lead_ok: bool = groups
        .next()
        .is_some_and(|lead| (1..=3).contains(&lead.len()) && is_digits(lead));
    lead_ok
        && groups.peek().is_some()
        && groups.all(|group| group.len() == 3 && is_digits(group))
}

/// Validates that an already-parsed salary is within range.
///
/// # Errors
///
/// Returns an error if the amount is not strictly positive or exceeds
/// [`MAX_SALARY`].
pub fn validate_salary(value: Decimal) -> Result<(), DomainError> {
    if value <= Decimal::ZERO {
        return Err(DomainError::InvalidSalary(format!(
            "Salary must be greater than zero, got {value}"
        )));
    }
    if value > MAX_SALARY {
        return Err(DomainError::SalaryOutOfRange(value.to_string()));
    }
    Ok(())
}

/// Trims a required text field and rejects it if nothing is left.
///
/// # Errors
///
/// Returns [`DomainError::EmptyField`] if the value is blank.
pub fn validate_required_text(field: &'static str, value: &str) -> Result<String, DomainError> {
    let trimmed: &str = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::EmptyField { field });
    }
    Ok(trimmed.to_string())
}

/// Trims an optional note, treating blank notes as absent.
#[must_use]
pub fn normalize_note(note: Option<&str>) -> Option<String> {
    note.map(str::trim)
        .filter(|n| !n.is_empty())
        .map(ToString::to_string)
}

/// Validates a simulation name and returns it trimmed.
///
/// # Errors
///
/// Returns an error if the name is blank or longer than
/// [`MAX_SIMULATION_NAME_LEN`] characters.
pub fn validate_simulation_name(name: &str) -> Result<String, DomainError> {
    let trimmed: &str = name.trim();
    if trimmed.is_empty() {
        return Err(DomainError::InvalidSimulationName(String::from(
            "Name cannot be empty",
        )));
    }
    let len: usize = trimmed.chars().count();
    if len > MAX_SIMULATION_NAME_LEN {
        return Err(DomainError::InvalidSimulationName(format!(
            "Name must be at most {MAX_SIMULATION_NAME_LEN} characters, got {len}"
        )));
    }
    Ok(trimmed.to_string())
}

/// Validates the fields of an employee record before it is stored.
///
/// Returns the trimmed badge, name and title.
///
/// # Errors
///
/// Returns an error if the badge, name or title is blank, or the salary is
/// out of range.
pub fn validate_employee_fields(
    badge: &str,
    name: &str,
    title: &str,
    salary: Decimal,
) -> Result<(String, String, String), DomainError> {
    let badge: String = validate_required_text("badge", badge)?.to_uppercase();
    let name: String = validate_required_text("name", name)?;
    let title: String = validate_required_text("title", title)?;
    validate_salary(salary)?;
    Ok((badge, name, title))
}

/// Checks that an employee does not already take part in a chain.
///
/// Both origins and destinations count, including the initial exit.
///
/// # Errors
///
/// Returns [`DomainError::DuplicateEmployee`] if the reference is found.
pub fn validate_employee_unique_in_chain(
    reference: &EmployeeRef,
    events: &[MovementEvent],
) -> Result<(), DomainError> {
    let taken: bool = events.iter().any(|event| {
        &event.origin().reference == reference
            || event
                .destination()
                .is_some_and(|destination| &destination.reference == reference)
    });

    if taken {
        return Err(DomainError::DuplicateEmployee(reference.clone()));
    }
    Ok(())
}
