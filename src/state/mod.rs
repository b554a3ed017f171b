//! State management for the chain simulation.
//!
//! Contains the displacement state of the chain and the records produced
//! while sampling it.

mod chain;
mod metrics;

pub use chain::ChainState;
pub use metrics::{PhasePoint, RunSummary, SampleRecord};
