//! Time integration for the chain.
//!
//! Implements the three-level central-difference scheme
//!
//!   x_i(t + dt) = dt² F_i(t) + 2 x_i(t) - x_i(t - dt)
//!
//! with F_i the nonlinear spring force. It is explicit and second-order
//! accurate, and only conditionally stable: choosing dt is the caller's
//! responsibility, and a diverging run is not detected.

use super::ChainConstants;
use crate::state::ChainState;

/// Leapfrog integrator for the FPU chain
#[derive(Debug, Clone)]
pub struct LeapfrogIntegrator {
    /// Derived constants
    pub constants: ChainConstants,
    /// Number of steps taken
    pub step_count: u64,
    /// Scratch buffer for x(t + dt)
    next: Vec<f64>,
}

impl LeapfrogIntegrator {
    /// Create a new integrator
    pub fn new(constants: ChainConstants) -> Self {
        Self {
            constants,
            step_count: 0,
            next: vec![0.0; constants.particle_count + 2],
        }
    }

    /// Advance the chain from t to t + dt
    ///
    /// After the step the previous level holds x(t) and the current level
    /// holds x(t + dt). Boundary entries are never written.
    pub fn step(&mut self, state: &mut ChainState) {
        let n = state.particle_count();
        if self.next.len() != n + 2 {
            self.next.resize(n + 2, 0.0);
        }
        let c = &self.constants;

        for i in 1..=n {
            let (right, left) = state.spring_stretches(i);
            let r2 = right * right;
            let l2 = left * left;
            self.next[i] = c.r2 * (right - left)
                + c.alpha_prime * (r2 - l2)
                + c.beta_prime * (r2 * right - l2 * left)
                + 2.0 * state.displacement[i]
                - state.previous_displacement[i];
        }

        for i in 1..=n {
            state.previous_displacement[i] = state.displacement[i];
            state.displacement[i] = self.next[i];
        }

        self.step_count += 1;
    }

    /// Take `n_steps` steps
    pub fn run(&mut self, state: &mut ChainState, n_steps: usize) {
        for _ in 0..n_steps {
            self.step(state);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rest_state_stays_at_rest() {
        let mut state = ChainState::at_rest(16);
        let mut integrator = LeapfrogIntegrator::new(ChainConstants::new(16, 0.05, 0.3, 1.0));

        integrator.run(&mut state, 100);

        assert!(state.displacement().iter().all(|&x| x == 0.0));
        assert_eq!(integrator.step_count, 100);
    }

    #[test]
    fn test_single_particle_oscillator() {
        // One particle between two walls: effective spring constant 2,
        // so x(t) = A cos(sqrt(2) t) in the continuum limit.
        let dt = 0.001;
        let mut state = ChainState::at_rest(1);
        state.displacement[1] = 1.0;
        state.previous_displacement[1] = (2.0_f64.sqrt() * dt).cos();
        let mut integrator = LeapfrogIntegrator::new(ChainConstants::new(1, dt, 0.0, 0.0));

        let steps = 1000;
        integrator.run(&mut state, steps);

        let t = steps as f64 * dt;
        let expected = (2.0_f64.sqrt() * t).cos();
        assert!(
            (state.displacement_at(1) - expected).abs() < 1e-4,
            "got {}, expected {}",
            state.displacement_at(1),
            expected
        );
    }

    #[test]
    fn test_step_shifts_buffers() {
        let mut state = ChainState::single_mode(8, 2, 1.0);
        let before = state.displacement().to_vec();
        let mut integrator = LeapfrogIntegrator::new(ChainConstants::new(8, 0.05, 0.0, 0.5));

        integrator.step(&mut state);

        assert_eq!(state.previous_displacement(), before.as_slice());
        assert_ne!(state.displacement(), before.as_slice());
    }

    #[test]
    fn test_quadratic_term_breaks_symmetry() {
        // With alpha the force is not odd in the displacement
        let constants = ChainConstants::new(4, 0.1, 0.5, 0.0);
        let mut up = ChainState::single_mode(4, 1, 1.0);
        let mut down = ChainState::single_mode(4, 1, -1.0);
        let mut integrator = LeapfrogIntegrator::new(constants);

        integrator.run(&mut up, 10);
        integrator.run(&mut down, 10);

        let asymmetry: f64 = up
            .displacement()
            .iter()
            .zip(down.displacement())
            .map(|(a, b)| (a + b).abs())
            .sum();
        assert!(asymmetry > 1e-8);
    }

    #[test]
    fn test_boundaries_never_move() {
        let mut state = ChainState::single_mode(12, 1, 5.0);
        let mut integrator = LeapfrogIntegrator::new(ChainConstants::new(12, 0.05, 0.25, 1.0));

        for _ in 0..500 {
            integrator.step(&mut state);
            assert!(state.boundaries_clamped());
        }
    }
}
