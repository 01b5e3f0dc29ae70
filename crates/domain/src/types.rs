// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Identity of an employee as seen by the movement chain.
///
/// Employees either live in the persisted store (and can be referenced by
/// foreign key) or come from the read-only external HR system, in which case
/// only their snapshot is durable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "source", content = "key", rename_all = "snake_case")]
pub enum EmployeeRef {
    /// A row in the persisted employee table.
    Persisted(i64),
    /// An employee synthesized from the external HR system, keyed by badge.
    External(String),
}

impl EmployeeRef {
    /// Returns the persisted-store identifier, if this reference has one.
    #[must_use]
    pub const fn persisted_id(&self) -> Option<i64> {
        match self {
            Self::Persisted(id) => Some(*id),
            Self::External(_) => None,
        }
    }
}

impl std::fmt::Display for EmployeeRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Persisted(id) => write!(f, "employee #{id}"),
            Self::External(key) => write!(f, "external employee {key}"),
        }
    }
}

/// An employee record as read from a data source.
///
/// The movement chain never mutates employees; it only captures snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Where this employee comes from.
    pub reference: EmployeeRef,
    /// Human-readable badge code.
    pub badge: String,
    /// Full name.
    pub name: String,
    /// Current job title.
    pub title: String,
    /// Current monthly salary.
    pub salary: Decimal,
    /// Whether the employee is active.
    pub active: bool,
}

impl Employee {
    /// Creates a new active employee.
    #[must_use]
    pub fn new(
        reference: EmployeeRef,
        badge: &str,
        name: &str,
        title: &str,
        salary: Decimal,
    ) -> Self {
        Self {
            reference,
            badge: badge.trim().to_uppercase(),
            name: name.trim().to_string(),
            title: title.trim().to_string(),
            salary,
            active: true,
        }
    }

    /// Captures the current state of this employee as an immutable snapshot.
    #[must_use]
    pub fn snapshot(&self) -> EmployeeSnapshot {
        EmployeeSnapshot {
            reference: self.reference.clone(),
            badge: self.badge.clone(),
            name: self.name.clone(),
            title: self.title.clone(),
            salary: self.salary,
        }
    }
}

/// Point-in-time copy of an employee's identity, title and salary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeSnapshot {
    /// Identity of the employee at capture time.
    pub reference: EmployeeRef,
    /// Badge code.
    pub badge: String,
    /// Full name.
    pub name: String,
    /// Job title held at capture time.
    pub title: String,
    /// Monthly salary at capture time.
    pub salary: Decimal,
}

/// Why the employee starting a chain is leaving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExitReason {
    /// Voluntary resignation.
    Resignation,
    /// Termination by the employer.
    Termination,
    /// Retirement.
    Retirement,
    /// Transfer out of the modeled scope.
    Transfer,
    /// Anything else.
    Other,
}

impl ExitReason {
    /// Returns the storage representation of this reason.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Resignation => "resignation",
            Self::Termination => "termination",
            Self::Retirement => "retirement",
            Self::Transfer => "transfer",
            Self::Other => "other",
        }
    }

    /// Returns a human-readable label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Resignation => "Voluntary resignation",
            Self::Termination => "Termination",
            Self::Retirement => "Retirement",
            Self::Transfer => "Transfer",
            Self::Other => "Other",
        }
    }
}

impl FromStr for ExitReason {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "resignation" => Ok(Self::Resignation),
            "termination" => Ok(Self::Termination),
            "retirement" => Ok(Self::Retirement),
            "transfer" => Ok(Self::Transfer),
            "other" => Ok(Self::Other),
            _ => Err(DomainError::InvalidExitReason(s.to_string())),
        }
    }
}

impl std::fmt::Display for ExitReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The nature of an internal substitution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementKind {
    /// Move into a higher position.
    Promotion,
    /// Move into an equivalent position.
    Lateral,
    /// Salary adjustment.
    Raise,
}

impl MovementKind {
    /// Returns the storage representation of this kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Promotion => "promotion",
            Self::Lateral => "lateral",
            Self::Raise => "raise",
        }
    }
}

impl FromStr for MovementKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "promotion" => Ok(Self::Promotion),
            "lateral" => Ok(Self::Lateral),
            "raise" => Ok(Self::Raise),
            _ => Err(DomainError::InvalidMovementKind(s.to_string())),
        }
    }
}

impl std::fmt::Display for MovementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Lifecycle state of a simulation.
///
/// Valid transitions are:
/// - Draft → `Finalized`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SimulationStatus {
    /// Being edited.
    #[default]
    Draft,
    /// Locked as a reference scenario.
    Finalized,
}

impl SimulationStatus {
    /// Converts this status to its storage representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Finalized => "finalized",
        }
    }

    /// Checks if a transition from this status to another is valid.
    #[must_use]
    pub const fn can_transition_to(&self, target: Self) -> bool {
        matches!((self, target), (Self::Draft, Self::Finalized))
    }
}

impl FromStr for SimulationStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "finalized" => Ok(Self::Finalized),
            _ => Err(DomainError::InvalidSimulationStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for SimulationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Discriminator of a movement event, used for storage and counting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// The employee whose departure starts the chain.
    InitialExit,
    /// An employee moved into an open position.
    InternalSubstitution,
    /// An open position filled from outside.
    NewHire,
    /// An open position removed from the payroll.
    PositionClosed,
}

impl EventKind {
    /// Converts this kind to its storage representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::InitialExit => "initial_exit",
            Self::InternalSubstitution => "internal_substitution",
            Self::NewHire => "new_hire",
            Self::PositionClosed => "position_closed",
        }
    }
}

impl FromStr for EventKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "initial_exit" => Ok(Self::InitialExit),
            "internal_substitution" => Ok(Self::InternalSubstitution),
            "new_hire" => Ok(Self::NewHire),
            "position_closed" => Ok(Self::PositionClosed),
            _ => Err(DomainError::InvalidEventKind(s.to_string())),
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One link of a movement chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MovementEvent {
    /// The employee whose departure starts the chain.
    InitialExit {
        /// The departing employee.
        origin: EmployeeSnapshot,
        /// Why they leave.
        exit_reason: ExitReason,
    },
    /// An existing employee moves into an open position.
    InternalSubstitution {
        /// The vacancy being filled.
        origin: EmployeeSnapshot,
        /// The employee moving in, as they were before the move.
        destination: EmployeeSnapshot,
        /// Title after the move.
        new_title: String,
        /// Salary after the move.
        new_salary: Decimal,
        /// Nature of the move.
        movement_kind: MovementKind,
        /// Free-text note.
        note: Option<String>,
    },
    /// The open position is filled from outside.
    NewHire {
        /// The vacancy being filled.
        vacancy: EmployeeSnapshot,
        /// Title of the new position.
        title: String,
        /// Proposed monthly salary.
        proposed_salary: Decimal,
        /// Free-text note.
        note: Option<String>,
    },
    /// The open position is eliminated.
    PositionClosed {
        /// The vacancy being closed.
        origin: EmployeeSnapshot,
        /// Free-text note.
        note: Option<String>,
    },
}

impl MovementEvent {
    /// Returns the discriminator of this event.
    #[must_use]
    pub const fn kind(&self) -> EventKind {
        match self {
            Self::InitialExit { .. } => EventKind::InitialExit,
            Self::InternalSubstitution { .. } => EventKind::InternalSubstitution,
            Self::NewHire { .. } => EventKind::NewHire,
            Self::PositionClosed { .. } => EventKind::PositionClosed,
        }
    }

    /// Returns the snapshot of the position this event vacates or fills.
    #[must_use]
    pub const fn origin(&self) -> &EmployeeSnapshot {
        match self {
            Self::InitialExit { origin, .. }
            | Self::InternalSubstitution { origin, .. }
            | Self::PositionClosed { origin, .. } => origin,
            Self::NewHire { vacancy, .. } => vacancy,
        }
    }

    /// Returns the snapshot of the employee moving in, for substitutions.
    #[must_use]
    pub const fn destination(&self) -> Option<&EmployeeSnapshot> {
        match self {
            Self::InternalSubstitution { destination, .. } => Some(destination),
            _ => None,
        }
    }

    /// Returns the free-text note attached to this event.
    #[must_use]
    pub fn note(&self) -> Option<&str> {
        match self {
            Self::InitialExit { .. } => None,
            Self::InternalSubstitution { note, .. }
            | Self::NewHire { note, .. }
            | Self::PositionClosed { note, .. } => note.as_deref(),
        }
    }
}

/// A position left open in a chain under construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingVacancy {
    /// The employee who vacated the position, as they were when they left it.
    pub source: EmployeeSnapshot,
}

impl PendingVacancy {
    /// Creates a vacancy left by the given employee snapshot.
    #[must_use]
    pub const fn new(source: EmployeeSnapshot) -> Self {
        Self { source }
    }

    /// Identity of the employee who left the position.
    #[must_use]
    pub const fn source_ref(&self) -> &EmployeeRef {
        &self.source.reference
    }
}

/// A named, ordered movement chain and its lifecycle state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Simulation {
    /// Persisted identifier. `None` before the simulation is stored.
    pub simulation_id: Option<i64>,
    /// Display name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Lifecycle state.
    pub status: SimulationStatus,
    /// Events in confirmation order. The order number of an event is its index plus one.
    pub events: Vec<MovementEvent>,
}

impl Simulation {
    /// Iterates events paired with their 1-based order number.
    pub fn numbered_events(&self) -> impl Iterator<Item = (u32, &MovementEvent)> {
        (1_u32..).zip(self.events.iter())
    }
}
