//! Spring force on a single particle, split by order.

use serde::{Deserialize, Serialize};

use crate::state::ChainState;

/// Linear, quadratic and cubic parts of the force on one particle
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ForceComponents {
    /// X - Y
    pub linear: f64,
    /// alpha (X² - Y²)
    pub quadratic: f64,
    /// beta (X³ - Y³)
    pub cubic: f64,
}

impl ForceComponents {
    /// Evaluate the force on interior particle `i` of the current displacement
    pub fn at(state: &ChainState, i: usize, alpha: f64, beta: f64) -> Self {
        let (x, y) = state.spring_stretches(i);
        Self {
            linear: x - y,
            quadratic: alpha * (x * x - y * y),
            cubic: beta * (x * x * x - y * y * y),
        }
    }

    pub fn total(&self) -> f64 {
        self.linear + self.quadratic + self.cubic
    }
}
