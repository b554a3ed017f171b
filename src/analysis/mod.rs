//! Normal-mode analysis of the chain.
//!
//! The normal modes of the linear fixed-end chain are sine patterns; they are
//! used as the analysis basis for the nonlinear chain as well.

mod modes;
mod projector;

pub use modes::ModeAnalyzer;
pub use projector::{ModeCoefficients, ModeProjector, ModeSpectrum, Refresh};
