// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::apply::apply;
use crate::command::{Command, Resolution};
use crate::error::CoreError;
use paysim_domain::{Employee, EmployeeRef, ExitReason, MovementEvent, PendingVacancy};
use serde::{Deserialize, Serialize};

/// A movement chain under construction.
///
/// Holds the confirmed events in confirmation order and the positions still
/// waiting to be resolved. Builders are values: every transition produces a
/// new builder and leaves the original untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainBuilder {
    pub(crate) events: Vec<MovementEvent>,
    pub(crate) pending: Vec<PendingVacancy>,
}

impl ChainBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            events: Vec::new(),
            pending: Vec::new(),
        }
    }

    /// Confirmed events, in order. The order number of an event is its index plus one.
    #[must_use]
    pub fn events(&self) -> &[MovementEvent] {
        &self.events
    }

    /// Positions still waiting to be resolved, oldest first.
    #[must_use]
    pub fn pending(&self) -> &[PendingVacancy] {
        &self.pending
    }

    /// Whether the chain has an initial exit.
    #[must_use]
    pub fn is_started(&self) -> bool {
        !self.events.is_empty()
    }

    /// Whether the chain has events and no open positions.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.pending.is_empty() && !self.events.is_empty()
    }

    /// Finds the pending vacancy left by the given employee.
    #[must_use]
    pub fn find_pending(&self, source: &EmployeeRef) -> Option<&PendingVacancy> {
        self.pending.iter().find(|v| v.source_ref() == source)
    }

    /// Consumes the builder and returns its events.
    #[must_use]
    pub fn into_events(self) -> Vec<MovementEvent> {
        self.events
    }

    /// Starts the chain with an employee's departure.
    ///
    /// # Errors
    ///
    /// Returns an error if the chain has already been started.
    pub fn start_chain(
        &self,
        exiting_employee: Employee,
        exit_reason: ExitReason,
    ) -> Result<Self, CoreError> {
        apply(
            self,
            Command::StartChain {
                exiting_employee,
                exit_reason,
            },
        )
    }

    /// Resolves the vacancy left by `vacancy`.
    ///
    /// # Errors
    ///
    /// Returns an error if the vacancy is not pending or the resolution
    /// violates a domain rule. The builder is never partially modified.
    pub fn resolve_vacancy(
        &self,
        vacancy: EmployeeRef,
        resolution: Resolution,
    ) -> Result<Self, CoreError> {
        apply(
            self,
            Command::ResolveVacancy {
                vacancy,
                resolution,
            },
        )
    }
}
