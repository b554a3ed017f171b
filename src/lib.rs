//! FPU Chain - Fermi-Pasta-Ulam chain simulation with normal-mode analysis
//!
//! A chain of N unit masses joined by unit springs, clamped at both ends,
//! with small quadratic (alpha) and cubic (beta) corrections to the spring
//! force. The chain starts in a single normal mode; the recorder integrates
//! it with a central-difference scheme and tracks how energy spreads across
//! the modes of the linear chain.

pub mod analysis;
pub mod config;
pub mod error;
pub mod export;
pub mod physics;
pub mod simulation;
pub mod state;

pub use analysis::{ModeAnalyzer, ModeCoefficients, ModeProjector, ModeSpectrum, Refresh};
pub use config::{CoefficientScope, Parameters};
pub use error::{ConfigError, SimulationError, SinkOpenFailure};
pub use export::{MemorySink, RowSink, SinkKind, SinkSet};
pub use physics::{ChainConstants, ForceComponents, LeapfrogIntegrator};
pub use simulation::{Recorder, RecorderPhase};
pub use state::{ChainState, RunSummary, SampleRecord};
