//! Error types for the simulation library.

use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::export::SinkKind;

/// Problems with the parameter set or the file it came from
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read parameter file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot parse parameter file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid parameters: {0}")]
    Invalid(String),
}

/// One output destination that could not be opened
#[derive(Debug, Error)]
#[error("cannot open {sink} sink at {path:?}: {source}")]
pub struct SinkOpenFailure {
    pub sink: SinkKind,
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

/// All sink failures found while opening the full set
#[derive(Debug)]
pub struct SinkOpenFailures(pub Vec<SinkOpenFailure>);

impl SinkOpenFailures {
    /// Names of the sinks that failed, in the order they were attempted
    pub fn sinks(&self) -> Vec<SinkKind> {
        self.0.iter().map(|f| f.sink).collect()
    }
}

impl fmt::Display for SinkOpenFailures {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self.0.iter().map(|e| e.sink.to_string()).collect();
        write!(f, "{}", names.join(", "))
    }
}

/// Errors surfaced by the recorder
#[derive(Debug, Error)]
pub enum SimulationError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("some output sinks could not be opened: {0}")]
    SinkOpen(SinkOpenFailures),
    #[error("failed writing to {sink} sink: {source}")]
    SinkWrite {
        sink: SinkKind,
        #[source]
        source: io::Error,
    },
}

impl From<SinkOpenFailures> for SimulationError {
    fn from(failures: SinkOpenFailures) -> Self {
        SimulationError::SinkOpen(failures)
    }
}
