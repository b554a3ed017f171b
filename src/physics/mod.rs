//! Physics of the FPU chain.
//!
//! This module implements:
//! - Central-difference (leapfrog) time integration of the nonlinear chain
//! - Decomposition of the spring force into linear/quadratic/cubic parts
//! - Harmonic and anharmonic energy of the chain
//!
//! The force on particle i, with right stretch X = x[i+1] - x[i] and left
//! stretch Y = x[i] - x[i-1], is
//!
//!   F_i = (X - Y) + alpha (X² - Y²) + beta (X³ - Y³)
//!
//! References:
//! - Fermi, Pasta, Ulam, Los Alamos report LA-1940 (1955)
//! - Giordano & Nakanishi, Computational Physics, 2nd ed., ch. 7

pub mod energy;
pub mod force;
pub mod integrator;

pub use energy::{anharmonic_energy, total_energy};
pub use force::ForceComponents;
pub use integrator::LeapfrogIntegrator;

use crate::config::ChainParameters;

/// Constants derived once from the chain parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChainConstants {
    /// Number of movable particles (N)
    pub particle_count: usize,
    /// Time step
    pub dt: f64,
    /// Quadratic coefficient
    pub alpha: f64,
    /// Cubic coefficient
    pub beta: f64,
    /// dt²
    pub r2: f64,
    /// alpha * dt²
    pub alpha_prime: f64,
    /// beta * dt²
    pub beta_prime: f64,
    /// sqrt(2 / (N + 1)), normalizes the sine basis
    pub normalization: f64,
}

impl ChainConstants {
    pub fn new(particle_count: usize, dt: f64, alpha: f64, beta: f64) -> Self {
        let r2 = dt * dt;
        Self {
            particle_count,
            dt,
            alpha,
            beta,
            r2,
            alpha_prime: alpha * r2,
            beta_prime: beta * r2,
            normalization: (2.0 / (particle_count + 1) as f64).sqrt(),
        }
    }

    pub fn from_parameters(params: &ChainParameters) -> Self {
        Self::new(params.particle_count, params.time_step, params.alpha, params.beta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_constants() {
        let c = ChainConstants::new(32, 0.05, 0.25, 2.0);
        assert!((c.r2 - 0.0025).abs() < 1e-15);
        assert!((c.alpha_prime - 0.000625).abs() < 1e-15);
        assert!((c.beta_prime - 0.005).abs() < 1e-15);
        assert!((c.normalization - (2.0_f64 / 33.0).sqrt()).abs() < 1e-15);
    }

    #[test]
    fn test_from_parameters() {
        let params = ChainParameters::default();
        let c = ChainConstants::from_parameters(&params);
        assert_eq!(c.particle_count, params.particle_count);
        assert_eq!(c.dt, params.time_step);
        assert_eq!(c.beta, params.beta);
    }
}
