// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::{Command, Resolution};
use crate::error::CoreError;
use crate::state::ChainBuilder;
use paysim_domain::{
    Decimal, DomainError, EmployeeRef, MovementEvent, PendingVacancy, normalize_note,
    parse_salary, validate_employee_unique_in_chain, validate_required_text,
};

/// Applies a command to a chain, producing a new chain.
///
/// This function is pure: the input builder is never modified, and on error
/// no partial result exists.
///
/// # Arguments
///
/// * `builder` - The current chain (immutable)
/// * `command` - The command to apply
///
/// # Errors
///
/// Returns an error if:
/// - The chain is started twice, or resolved before it is started
/// - The vacancy is not pending
/// - The destination is inactive or already part of the chain
/// - A title is blank or a salary is invalid
pub fn apply(builder: &ChainBuilder, command: Command) -> Result<ChainBuilder, CoreError> {
    match command {
        Command::StartChain {
            exiting_employee,
            exit_reason,
        } => {
            if builder.is_started() {
                return Err(CoreError::DomainViolation(
                    DomainError::ChainAlreadyStarted,
                ));
            }

            let origin = exiting_employee.snapshot();
            Ok(ChainBuilder {
                events: vec![MovementEvent::InitialExit {
                    origin: origin.clone(),
                    exit_reason,
                }],
                pending: vec![PendingVacancy::new(origin)],
            })
        }
        Command::ResolveVacancy {
            vacancy,
            resolution,
        } => {
            if !builder.is_started() {
                return Err(CoreError::DomainViolation(DomainError::ChainNotStarted));
            }

            let index: usize = pending_index(builder, &vacancy)?;
            let open: &PendingVacancy = &builder.pending[index];

            let (event, follow_up): (MovementEvent, Option<PendingVacancy>) = match resolution {
                Resolution::InternalSubstitution {
                    destination,
                    new_title,
                    new_salary,
                    movement_kind,
                    note,
                } => {
                    if !destination.active {
                        return Err(CoreError::DomainViolation(
                            DomainError::InactiveEmployee(destination.reference),
                        ));
                    }
                    validate_employee_unique_in_chain(&destination.reference, &builder.events)?;
                    let new_title: String = validate_required_text("new_title", &new_title)?;
                    let new_salary: Decimal = parse_salary(&new_salary)?;

                    // The seat the destination leaves keeps their pre-move data.
                    let destination = destination.snapshot();
                    let event = MovementEvent::InternalSubstitution {
                        origin: open.source.clone(),
                        destination: destination.clone(),
                        new_title,
                        new_salary,
                        movement_kind,
                        note: normalize_note(note.as_deref()),
                    };
                    (event, Some(PendingVacancy::new(destination)))
                }
                Resolution::NewHire {
                    title,
                    proposed_salary,
                    note,
                } => {
                    let title: String = validate_required_text("title", &title)?;
                    let proposed_salary: Decimal = parse_salary(&proposed_salary)?;
                    let event = MovementEvent::NewHire {
                        vacancy: open.source.clone(),
                        title,
                        proposed_salary,
                        note: normalize_note(note.as_deref()),
                    };
                    (event, None)
                }
                Resolution::ClosePosition { note } => {
                    let event = MovementEvent::PositionClosed {
                        origin: open.source.clone(),
                        note: normalize_note(note.as_deref()),
                    };
                    (event, None)
                }
            };

            let mut new_builder: ChainBuilder = builder.clone();
            new_builder.events.push(event);
            new_builder.pending.remove(index);
            if let Some(vacancy) = follow_up {
                new_builder.pending.push(vacancy);
            }
            Ok(new_builder)
        }
    }
}

/// Replays a sequence of commands from an empty chain.
///
/// # Errors
///
/// Returns the first error produced by [`apply`]. Commands after the
/// failing one are not applied.
pub fn replay<I>(commands: I) -> Result<ChainBuilder, CoreError>
where
    I: IntoIterator<Item = Command>,
{
    commands
        .into_iter()
        .try_fold(ChainBuilder::new(), |builder, command| apply(&builder, command))
}

fn pending_index(builder: &ChainBuilder, vacancy: &EmployeeRef) -> Result<usize, CoreError> {
    builder
        .pending
        .iter()
        .position(|v| v.source_ref() == vacancy)
        .ok_or_else(|| CoreError::DomainViolation(DomainError::VacancyNotPending(vacancy.clone())))
}
