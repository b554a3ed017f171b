//! Quantities collected at sampling instants and over a whole run.
//!
//! `SampleRecord` is what the recorder writes to its sinks; `RunSummary`
//! aggregates the run for logging and JSON export.

use serde::{Deserialize, Serialize};

use crate::physics::ForceComponents;

/// Position and velocity of one mode
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhasePoint {
    pub position: f64,
    pub velocity: f64,
}

/// Everything computed at one sampling instant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleRecord {
    /// Simulation time
    pub time: f64,
    /// Harmonic energy of the whole chain
    pub total_energy: f64,
    /// Displacement of particle N/3
    pub probe_displacement: f64,
    /// Energy of modes 1..=M
    pub mode_energies: Vec<f64>,
    /// Position of modes 1..=M
    pub mode_positions: Vec<f64>,
    /// Particle the force decomposition was evaluated at
    pub force_probe: usize,
    /// Force split into linear/quadratic/cubic parts
    pub force: ForceComponents,
    /// Phase point of the phase mode
    pub phase_point: PhasePoint,
    /// Whether the crossing mode changed sign over the last step
    pub crossing: bool,
}

impl SampleRecord {
    /// Sum of the tracked mode energies
    pub fn tracked_mode_energy(&self) -> f64 {
        self.mode_energies.iter().sum()
    }
}

/// Aggregate statistics for a finished run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Integration steps taken
    pub steps: u64,
    /// Sampling instants recorded
    pub samples: u64,
    /// Samples that also went to the crossing-gated phase portrait
    pub crossing_samples: u64,
    /// Time at which the run stopped
    pub final_time: f64,
    /// Harmonic energy of the initial profile
    pub initial_energy: f64,
    /// Harmonic energy at the last sample
    pub final_energy: f64,
    /// Largest |E(t) - E(0)| / E(0) over all samples
    pub max_relative_energy_drift: f64,
    /// Energy including the alpha/beta potential, at the start
    pub initial_anharmonic_energy: f64,
    /// Energy including the alpha/beta potential, at the end
    pub final_anharmonic_energy: f64,
    /// Tracked mode energies at the last sample
    pub final_mode_energies: Vec<f64>,
}

impl RunSummary {
    /// Fold one sample into the running statistics
    pub fn observe(&mut self, record: &SampleRecord) {
        self.samples += 1;
        if record.crossing {
            self.crossing_samples += 1;
        }
        self.final_energy = record.total_energy;
        if self.initial_energy > 0.0 {
            let drift = ((record.total_energy - self.initial_energy) / self.initial_energy).abs();
            if drift > self.max_relative_energy_drift || drift.is_nan() {
                self.max_relative_energy_drift = drift;
            }
        }
        self.final_mode_energies.clone_from(&record.mode_energies);
    }
}
