//! Displacement state of the chain.

use std::f64::consts::PI;

/// Displacements of the chain at the current and previous time levels
///
/// Both buffers hold `N + 2` entries. Entries `0` and `N + 1` are the clamped
/// end points and stay zero for the lifetime of the state.
#[derive(Debug, Clone, PartialEq)]
pub struct ChainState {
    /// Displacement at time t
    pub(crate) displacement: Vec<f64>,
    /// Displacement at time t - dt
    pub(crate) previous_displacement: Vec<f64>,
}

impl ChainState {
    /// A chain of `particle_count` movable particles, all at rest at zero
    pub fn at_rest(particle_count: usize) -> Self {
        Self {
            displacement: vec![0.0; particle_count + 2],
            previous_displacement: vec![0.0; particle_count + 2],
        }
    }

    /// A chain at rest in the shape of a single normal mode
    ///
    /// x_i = A * sqrt(2/(N+1)) * sin(pi * i * mode / (N+1)), which puts a
    /// mode coordinate of exactly `amplitude` into `mode`.
    pub fn single_mode(particle_count: usize, mode: usize, amplitude: f64) -> Self {
        let mut state = Self::at_rest(particle_count);
        let n1 = (particle_count + 1) as f64;
        let scale = amplitude * (2.0 / n1).sqrt();

        for i in 1..=particle_count {
            let x = scale * (PI * i as f64 * mode as f64 / n1).sin();
            state.displacement[i] = x;
            state.previous_displacement[i] = x;
        }
        state
    }

    /// Number of movable particles (N)
    pub fn particle_count(&self) -> usize {
        self.displacement.len() - 2
    }

    /// Current displacements including both boundary points
    pub fn displacement(&self) -> &[f64] {
        &self.displacement
    }

    /// Displacements one step back, including both boundary points
    pub fn previous_displacement(&self) -> &[f64] {
        &self.previous_displacement
    }

    /// Current displacement of particle `i` (0 and N+1 are the walls)
    pub fn displacement_at(&self, i: usize) -> f64 {
        self.displacement[i]
    }

    /// Whether both end points are still exactly zero
    pub fn boundaries_clamped(&self) -> bool {
        let last = self.displacement.len() - 1;
        self.displacement[0] == 0.0
            && self.displacement[last] == 0.0
            && self.previous_displacement[0] == 0.0
            && self.previous_displacement[last] == 0.0
    }

    /// Stretches of the springs to the right and left of particle `i`
    pub fn spring_stretches(&self, i: usize) -> (f64, f64) {
        let x = &self.displacement;
        (x[i + 1] - x[i], x[i] - x[i - 1])
    }
}
