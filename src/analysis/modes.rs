//! Per-mode observables built on the projection coefficients.
//!
//! With norm = sqrt(2/(N+1)) and ω_k = 2 sin(kπ / (2(N+1))):
//!
//!   Q_k = 0.5 (a + a_prev) norm
//!   P_k = (a - a_prev) norm / dt
//!   E_k = 0.5 (P_k² + ω_k² Q_k²)

use std::f64::consts::PI;

use super::projector::{ModeCoefficients, ModeProjector, ModeSpectrum, Refresh};
use crate::physics::ChainConstants;
use crate::state::{ChainState, PhasePoint};

/// Energy, position, velocity and sign crossings of normal modes
#[derive(Debug, Clone)]
pub struct ModeAnalyzer {
    particle_count: usize,
    dt: f64,
    normalization: f64,
    projector: ModeProjector,
}

impl ModeAnalyzer {
    pub fn new(constants: &ChainConstants) -> Self {
        Self {
            particle_count: constants.particle_count,
            dt: constants.dt,
            normalization: constants.normalization,
            projector: ModeProjector::new(),
        }
    }

    /// Linear eigenfrequency of mode `k`
    pub fn frequency(&self, k: usize) -> f64 {
        2.0 * (PI * k as f64 / (2 * (self.particle_count + 1)) as f64).sin()
    }

    pub fn position_of(&self, c: ModeCoefficients) -> f64 {
        0.5 * (c.current + c.previous) * self.normalization
    }

    pub fn velocity_of(&self, c: ModeCoefficients) -> f64 {
        (c.current - c.previous) * self.normalization / self.dt
    }

    /// Harmonic-oscillator energy of mode `k` given its coefficients
    pub fn energy_of(&self, k: usize, c: ModeCoefficients) -> f64 {
        let p = self.velocity_of(c);
        let q = self.frequency(k) * self.position_of(c);
        0.5 * (p * p + q * q)
    }

    /// True when the mode amplitude changed sign or touched zero over the step
    pub fn crosses_zero(c: ModeCoefficients) -> bool {
        c.current * c.previous <= 0.0
    }

    pub fn phase_point_of(&self, c: ModeCoefficients) -> PhasePoint {
        PhasePoint {
            position: self.position_of(c),
            velocity: self.velocity_of(c),
        }
    }

    /// Energy of mode `k`, projecting through the single-slot cache
    pub fn mode_energy(&mut self, state: &ChainState, k: usize, refresh: Refresh) -> f64 {
        let c = self.projector.project(state, k, refresh);
        self.energy_of(k, c)
    }

    pub fn mode_position(&mut self, state: &ChainState, k: usize, refresh: Refresh) -> f64 {
        let c = self.projector.project(state, k, refresh);
        self.position_of(c)
    }

    pub fn mode_velocity(&mut self, state: &ChainState, k: usize, refresh: Refresh) -> f64 {
        let c = self.projector.project(state, k, refresh);
        self.velocity_of(c)
    }

    pub fn mode_crosses(&mut self, state: &ChainState, k: usize, refresh: Refresh) -> bool {
        Self::crosses_zero(self.projector.project(state, k, refresh))
    }

    /// Mode index currently held by the single-slot cache
    pub fn cached_mode(&self) -> Option<usize> {
        self.projector.cached_mode()
    }

    /// Coefficients of several modes for the current instant
    pub fn spectrum<I>(&self, state: &ChainState, modes: I) -> ModeSpectrum
    where
        I: IntoIterator<Item = usize>,
    {
        ModeProjector::spectrum(state, modes)
    }

    /// Energies of modes 1..=N
    pub fn all_energies(&self, state: &ChainState) -> Vec<f64> {
        (1..=self.particle_count)
            .map(|k| self.energy_of(k, ModeProjector::coefficients(state, k)))
            .collect()
    }
}
