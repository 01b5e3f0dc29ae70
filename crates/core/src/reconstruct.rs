// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::CoreError;
use crate::state::ChainBuilder;
use paysim_domain::{MovementEvent, PendingVacancy, validate_employee_unique_in_chain};

/// Rebuilds a chain from a stored, ordered list of events.
///
/// Pending vacancies are recomputed by replaying the events, so an
/// incomplete chain can keep being resolved after it is loaded. Salaries and
/// titles are taken as stored; only the chain structure is checked.
///
/// # Errors
///
/// Returns [`CoreError::Reconstruction`] if:
/// - The first event is not an initial exit, or a later one is
/// - An event resolves a position that is not open at that point
/// - A substitution brings in an employee already part of the chain
pub fn reconstruct_from(events: Vec<MovementEvent>) -> Result<ChainBuilder, CoreError> {
    let mut builder: ChainBuilder = ChainBuilder::new();

    for (index, event) in events.into_iter().enumerate() {
        let order: usize = index + 1;

        if matches!(event, MovementEvent::InitialExit { .. }) {
            if order != 1 {
                return Err(CoreError::Reconstruction(format!(
                    "event {order} is a second initial exit"
                )));
            }
            builder
                .pending
                .push(PendingVacancy::new(event.origin().clone()));
            builder.events.push(event);
            continue;
        }

        if order == 1 {
            return Err(CoreError::Reconstruction(format!(
                "chain starts with {} instead of an initial exit",
                event.kind()
            )));
        }

        let source = &event.origin().reference;
        let Some(position) = builder
            .pending
            .iter()
            .position(|v| v.source_ref() == source)
        else {
            return Err(CoreError::Reconstruction(format!(
                "event {order} resolves {source}, whose position is not open"
            )));
        };

        if let Some(destination) = event.destination() {
            validate_employee_unique_in_chain(&destination.reference, &builder.events).map_err(
                |err| CoreError::Reconstruction(format!("event {order}: {err}")),
            )?;
            let follow_up: PendingVacancy = PendingVacancy::new(destination.clone());
            builder.pending.remove(position);
            builder.pending.push(follow_up);
        } else {
            builder.pending.remove(position);
        }
        builder.events.push(event);
    }

    Ok(builder)
}
