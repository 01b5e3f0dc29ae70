// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Movement-chain builder for the payroll movement simulator.
//!
//! A chain starts with one employee leaving and grows as each open
//! position is resolved. [`ChainBuilder`] holds the events and the positions
//! still pending; every transition returns a new builder or an error, and a
//! failed transition leaves the previous builder untouched.
//!
//! [`replay`] rebuilds a chain from a list of [`Command`]s and
//! [`reconstruct_from`] validates a stored event list. Simulation status
//! rules live in [`lifecycle`].

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod apply;
mod command;
mod error;
pub mod lifecycle;
mod reconstruct;
mod state;

#[cfg(test)]
mod tests;

// Re-export public types and functions
pub use apply::{apply, replay};
pub use command::{Command, Resolution};
pub use error::CoreError;
pub use reconstruct::reconstruct_from;
pub use state::ChainBuilder;
