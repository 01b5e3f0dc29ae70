// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use paysim_domain::{Employee, EmployeeRef, ExitReason, MovementKind};

/// How an open position gets filled or eliminated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// An existing employee moves into the position.
    InternalSubstitution {
        /// The employee moving in, in their current state.
        destination: Employee,
        /// Title after the move.
        new_title: String,
        /// Salary after the move, as typed by the user.
        new_salary: String,
        /// Nature of the move.
        movement_kind: MovementKind,
        /// Optional note.
        note: Option<String>,
    },
    /// The position is filled by an external hire.
    NewHire {
        /// Title of the position.
        title: String,
        /// Proposed salary, as typed by the user.
        proposed_salary: String,
        /// Optional note.
        note: Option<String>,
    },
    /// The position is eliminated.
    ClosePosition {
        /// Optional note.
        note: Option<String>,
    },
}

/// A command represents user intent as data only.
///
/// Commands are the only way to request changes to a chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Start the chain with an employee's departure.
    StartChain {
        /// The departing employee.
        exiting_employee: Employee,
        /// Why they leave.
        exit_reason: ExitReason,
    },
    /// Resolve the vacancy left by an employee.
    ResolveVacancy {
        /// The employee whose former position is open.
        vacancy: EmployeeRef,
        /// How the position is resolved.
        resolution: Resolution,
    },
}
