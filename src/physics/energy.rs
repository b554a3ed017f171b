//! Energy of the chain.
//!
//! Velocities are backward differences (x(t) - x(t-dt)) / dt and spring
//! stretches are averaged over the same two levels, so both live at t - dt/2.

use crate::state::ChainState;

/// Harmonic energy: kinetic plus linear spring potential
///
/// For alpha = beta = 0 this equals the sum of all N mode energies.
pub fn total_energy(state: &ChainState, dt: f64) -> f64 {
    spring_sum(state, dt, |d| 0.5 * d * d)
}

/// Energy including the quadratic and cubic potential terms
///
/// Each spring contributes d²/2 + alpha d³/3 + beta d⁴/4, the potential
/// whose derivative gives the integrated force.
pub fn anharmonic_energy(state: &ChainState, dt: f64, alpha: f64, beta: f64) -> f64 {
    spring_sum(state, dt, |d| {
        let d2 = d * d;
        0.5 * d2 + alpha * d2 * d / 3.0 + beta * d2 * d2 / 4.0
    })
}

fn spring_sum<F>(state: &ChainState, dt: f64, potential: F) -> f64
where
    F: Fn(f64) -> f64,
{
    let x = state.displacement();
    let x_old = state.previous_displacement();
    let mut sum = 0.0;

    for i in 1..x.len() {
        let v = (x[i] - x_old[i]) / dt;
        let dx = 0.5 * (x[i] + x_old[i] - (x[i - 1] + x_old[i - 1]));
        sum += 0.5 * v * v + potential(dx);
    }
    sum
}
