// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Payroll impact of a movement chain.
//!
//! This module provides a pure, single-pass computation of the salary
//! totals before and after a chain takes effect, together with one detail
//! row per affected person.

use crate::types::{MovementEvent, MovementKind};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Classification of a detail row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImpactCategory {
    /// The departure that starts the chain.
    Exit,
    /// Internal promotion.
    Promotion,
    /// Internal lateral move.
    Lateral,
    /// Internal salary raise.
    Raise,
    /// External hire.
    Hire,
}

impl ImpactCategory {
    /// Returns the display label of this category.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Exit => "Exit",
            Self::Promotion => "Promotion",
            Self::Lateral => "Lateral",
            Self::Raise => "Raise",
            Self::Hire => "Hire",
        }
    }
}

impl From<MovementKind> for ImpactCategory {
    fn from(kind: MovementKind) -> Self {
        match kind {
            MovementKind::Promotion => Self::Promotion,
            MovementKind::Lateral => Self::Lateral,
            MovementKind::Raise => Self::Raise,
        }
    }
}

impl std::fmt::Display for ImpactCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Salary change of one affected person.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImpactRow {
    /// Badge code, or `(new)` for an external hire.
    pub badge: String,
    /// Person name, or `New hire`.
    pub name: String,
    /// Title before the chain.
    pub from_title: String,
    /// Title after the chain.
    pub to_title: String,
    /// Salary before the chain.
    pub from_salary: Decimal,
    /// Salary after the chain.
    pub to_salary: Decimal,
    /// `to_salary - from_salary`.
    pub delta: Decimal,
    /// Relative change in percent.
    pub percent: Decimal,
    /// Row classification.
    pub category: ImpactCategory,
}

/// Aggregate payroll impact of a chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImpactSummary {
    /// Sum of salaries of everyone affected, before the chain.
    pub total_before: Decimal,
    /// Sum of salaries of everyone affected, after the chain.
    pub total_after: Decimal,
    /// `total_after - total_before`.
    pub impact_total: Decimal,
    /// Relative impact in percent. Zero when `total_before` is zero.
    pub impact_percent: Decimal,
    /// Portion of `total_after` spent on external hires.
    pub new_hire_cost: Decimal,
    /// One row per affected person, in chain order.
    pub rows: Vec<ImpactRow>,
}

/// Number of events of each kind in a chain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventCounts {
    /// Initial exits.
    pub exits: usize,
    /// Internal substitutions.
    pub substitutions: usize,
    /// External hires.
    pub hires: usize,
    /// Closed positions.
    pub closures: usize,
}

fn relative_change(from: Decimal, to: Decimal) -> Decimal {
    if from > Decimal::ZERO {
        (to / from - Decimal::ONE) * HUNDRED
    } else {
        Decimal::ZERO
    }
}

/// Computes the payroll impact of a chain.
///
/// - An initial exit removes the leaver's salary.
/// - A substitution replaces the mover's old salary with the new one.
/// - A new hire adds the proposed salary.
/// - A closed position contributes nothing.
///
/// The chain does not need to be complete.
#[must_use]
pub fn compute_impact(events: &[MovementEvent]) -> ImpactSummary {
    let mut total_before: Decimal = Decimal::ZERO;
    let mut total_after: Decimal = Decimal::ZERO;
    let mut new_hire_cost: Decimal = Decimal::ZERO;
    let mut rows: Vec<ImpactRow> = Vec::new();

    for event in events {
        match event {
            MovementEvent::InitialExit { origin, .. } => {
                total_before += origin.salary;
                rows.push(ImpactRow {
                    badge: origin.badge.clone(),
                    name: origin.name.clone(),
                    from_title: origin.title.clone(),
                    to_title: String::from("(exit)"),
                    from_salary: origin.salary,
                    to_salary: Decimal::ZERO,
                    delta: -origin.salary,
                    percent: -HUNDRED,
                    category: ImpactCategory::Exit,
                });
            }
            MovementEvent::InternalSubstitution {
                destination,
                new_title,
                new_salary,
                movement_kind,
                ..
            } => {
                total_before += destination.salary;
                total_after += *new_salary;
                rows.push(ImpactRow {
                    badge: destination.badge.clone(),
                    name: destination.name.clone(),
                    from_title: destination.title.clone(),
                    to_title: new_title.clone(),
                    from_salary: destination.salary,
                    to_salary: *new_salary,
                    delta: *new_salary - destination.salary,
                    percent: relative_change(destination.salary, *new_salary),
                    category: ImpactCategory::from(*movement_kind),
                });
            }
            MovementEvent::NewHire {
                title,
                proposed_salary,
                ..
            } => {
                total_after += *proposed_salary;
                new_hire_cost += *proposed_salary;
                rows.push(ImpactRow {
                    badge: String::from("(new)"),
                    name: String::from("New hire"),
                    from_title: String::from("-"),
                    to_title: title.clone(),
                    from_salary: Decimal::ZERO,
                    to_salary: *proposed_salary,
                    delta: *proposed_salary,
                    percent: HUNDRED,
                    category: ImpactCategory::Hire,
                });
            }
            MovementEvent::PositionClosed { .. } => {}
        }
    }

    ImpactSummary {
        total_before,
        total_after,
        impact_total: total_after - total_before,
        impact_percent: relative_change(total_before, total_after),
        new_hire_cost,
        rows,
    }
}

/// Counts the events of each kind in a chain.
#[must_use]
pub fn count_events(events: &[MovementEvent]) -> EventCounts {
    events
        .iter()
        .fold(EventCounts::default(), |mut counts, event| {
            match event {
                MovementEvent::InitialExit { .. } => counts.exits += 1,
                MovementEvent::InternalSubstitution { .. } => counts.substitutions += 1,
                MovementEvent::NewHire { .. } => counts.hires += 1,
                MovementEvent::PositionClosed { .. } => counts.closures += 1,
            }
            counts
        })
}
