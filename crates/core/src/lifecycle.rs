// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Simulation lifecycle transitions.

use crate::error::CoreError;
use paysim_domain::{DomainError, Simulation, SimulationStatus};

/// Suffix appended to the name of a duplicated simulation.
pub const COPY_SUFFIX: &str = " (copy)";

/// Checks that a simulation may move from `from` to `to`.
///
/// # Errors
///
/// Returns [`DomainError::InvalidStatusTransition`] for any transition other
/// than draft to finalized.
pub fn validate_status_transition(
    from: SimulationStatus,
    to: SimulationStatus,
) -> Result<(), CoreError> {
    if !from.can_transition_to(to) {
        return Err(CoreError::DomainViolation(
            DomainError::InvalidStatusTransition { from, to },
        ));
    }
    Ok(())
}

/// Returns a finalized copy of the simulation.
///
/// # Errors
///
/// Returns an error if the simulation is already finalized.
pub fn finalize(simulation: &Simulation) -> Result<Simulation, CoreError> {
    validate_status_transition(simulation.status, SimulationStatus::Finalized)?;
    Ok(Simulation {
        status: SimulationStatus::Finalized,
        ..simulation.clone()
    })
}

/// Returns a new, unsaved draft carrying a copy of every event.
#[must_use]
pub fn duplicate(simulation: &Simulation) -> Simulation {
    Simulation {
        simulation_id: None,
        name: copy_name(&simulation.name),
        description: simulation.description.clone(),
        status: SimulationStatus::Draft,
        events: simulation.events.clone(),
    }
}

/// Name given to a copy of a simulation called `name`.
#[must_use]
pub fn copy_name(name: &str) -> String {
    format!("{name}{COPY_SUFFIX}")
}
