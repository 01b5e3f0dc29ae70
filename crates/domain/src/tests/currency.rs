// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::Decimal;
use crate::currency::{
    format_currency, format_currency_compact, format_currency_with_sign, format_percent,
};

#[test]
fn test_format_currency_groups_thousands() {
    assert_eq!(format_currency(Decimal::new(123_456, 2)), "R$ 1.234,56");
    assert_eq!(format_currency(Decimal::from(1_000_000)), "R$ 1.000.000,00");
    assert_eq!(format_currency(Decimal::from(12)), "R$ 12,00");
    assert_eq!(format_currency(Decimal::ZERO), "R$ 0,00");
}

#[test]
fn test_format_currency_negative() {
    assert_eq!(format_currency(Decimal::from(-700)), "-R$ 700,00");
}

#[test]
fn test_format_currency_rounds_half_away_from_zero() {
    assert_eq!(format_currency(Decimal::new(10_005, 3)), "R$ 10,01");
    assert_eq!(format_currency(Decimal::new(-10_005, 3)), "-R$ 10,01");
}

#[test]
fn test_format_currency_with_sign() {
    assert_eq!(format_currency_with_sign(Decimal::from(800)), "+R$ 800,00");
    assert_eq!(format_currency_with_sign(Decimal::ZERO), "+R$ 0,00");
    assert_eq!(format_currency_with_sign(Decimal::from(-800)), "-R$ 800,00");
}

#[test]
fn test_format_currency_compact() {
    assert_eq!(format_currency_compact(Decimal::from(1_200)), "R$ 1,2 mil");
    assert_eq!(format_currency_compact(Decimal::from(3_500_000)), "R$ 3,5 mi");
    assert_eq!(
        format_currency_compact(Decimal::from(2_000_000_000_i64)),
        "R$ 2 bi"
    );
    assert_eq!(format_currency_compact(Decimal::from(-1_500)), "-R$ 1,5 mil");
    assert_eq!(format_currency_compact(Decimal::from(950)), "R$ 950,00");
}

#[test]
fn test_format_percent() {
    assert_eq!(format_percent(Decimal::from(-20)), "-20,0%");
    assert_eq!(format_percent(Decimal::new(205, 1)), "20,5%");
    assert_eq!(format_percent(Decimal::new(-4, 2)), "0,0%");
}
