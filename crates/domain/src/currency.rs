// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Display formatting for Brazilian Real amounts and percentages.
//!
//! Amounts use `.` as thousands separator and `,` as decimal separator.
//! Rounding is always half away from zero.

use rust_decimal::{Decimal, RoundingStrategy};

const THOUSAND: Decimal = Decimal::from_parts(1_000, 0, 0, false, 0);
const MILLION: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);
const BILLION: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

fn round_to(value: Decimal, places: u32) -> Decimal {
    let rounded: Decimal =
        value.round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero);
    // Drop the sign of negative zero so it never renders as "-0,00".
    if rounded.is_zero() {
        Decimal::ZERO
    } else {
        rounded
    }
}

fn group_thousands(digits: &str) -> String {
    let mut grouped: String = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }
    grouped
}

/// Renders a non-negative value with the given number of decimals.
fn localized(abs_value: Decimal, places: usize) -> String {
    let plain: String = format!("{abs_value:.places$}");
    match plain.split_once('.') {
        Some((int_part, frac_part)) => format!("{},{frac_part}", group_thousands(int_part)),
        None => group_thousands(&plain),
    }
}

/// Formats an amount as `R$ 1.234,56`, or `-R$ 1.234,56` when negative.
#[must_use]
pub fn format_currency(amount: Decimal) -> String {
    let rounded: Decimal = round_to(amount, 2);
    let body: String = localized(rounded.abs(), 2);
    if rounded.is_sign_negative() {
        format!("-R$ {body}")
    } else {
        format!("R$ {body}")
    }
}

/// Formats an amount like [`format_currency`], with a leading `+` for
/// zero and positive values.
#[must_use]
pub fn format_currency_with_sign(amount: Decimal) -> String {
    let formatted: String = format_currency(amount);
    if amount >= Decimal::ZERO {
        format!("+{formatted}")
    } else {
        formatted
    }
}

/// Formats an amount in abbreviated form: `R$ 1,2 mil`, `R$ 3,5 mi`, `R$ 2 bi`.
///
/// Amounts below one thousand are formatted like [`format_currency`].
#[must_use]
pub fn format_currency_compact(amount: Decimal) -> String {
    let abs: Decimal = amount.abs();
    let (divisor, suffix): (Decimal, &str) = if abs >= BILLION {
        (BILLION, "bi")
    } else if abs >= MILLION {
        (MILLION, "mi")
    } else if abs >= THOUSAND {
        (THOUSAND, "mil")
    } else {
        return format_currency(amount);
    };

    let scaled: Decimal = round_to(abs / divisor, 1);
    let mut body: String = localized(scaled, 1);
    if let Some(stripped) = body.strip_suffix(",0") {
        body = stripped.to_string();
    }
    let sign: &str = if amount.is_sign_negative() { "-" } else { "" };
    format!("{sign}R$ {body} {suffix}")
}

/// Formats a percentage with one decimal digit, e.g. `-20,0%`.
#[must_use]
pub fn format_percent(value: Decimal) -> String {
    let rounded: Decimal = round_to(value, 1);
    let body: String = localized(rounded.abs(), 1);
    if rounded.is_sign_negative() {
        format!("-{body}%")
    } else {
        format!("{body}%")
    }
}
