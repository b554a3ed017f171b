//! Orchestration of a full simulation run.

mod recorder;

pub use recorder::{force_probe_index, Recorder, RecorderPhase};
