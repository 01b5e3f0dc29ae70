// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use paysim_domain::{Decimal, Simulation, SimulationStatus};
use serde::{Deserialize, Serialize};

/// Stored simulation header, without its events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationRecord {
    pub simulation_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub status: SimulationStatus,
    pub created_at: String,
    pub updated_at: String,
}

/// A simulation loaded together with its reconstructed chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredSimulation {
    pub simulation: Simulation,
    pub created_at: String,
    pub updated_at: String,
}

/// Simulation list entry with computed payroll figures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationSummary {
    pub simulation_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub status: SimulationStatus,
    pub movement_count: usize,
    pub impact_total: Decimal,
    pub created_at: String,
    pub updated_at: String,
}
