//! Configuration module for loading simulation parameters.
//!
//! Defaults reproduce the classic FPU run: 32 particles, all energy in mode 1.

mod parameters;

pub use parameters::{
    ChainParameters, CoefficientScope, OutputParameters, Parameters, SamplingParameters,
    DEFAULT_PARAMETER_FILE,
};
