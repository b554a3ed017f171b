//! The named set of output sinks used by the recorder.

use std::fmt;

use super::tsv_export::{RowSink, TsvSink};
use crate::config::OutputParameters;
use crate::error::{SimulationError, SinkOpenFailure, SinkOpenFailures};

/// The output series a run produces
///
/// Discriminants are positions in [`SinkKind::ALL`] and in the sink table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SinkKind {
    TotalEnergy = 0,
    Displacement = 1,
    Force = 2,
    PhasePortrait = 3,
    PhaseCrossings = 4,
    Profile = 5,
    ModeEnergy = 6,
    ModePosition = 7,
}

impl SinkKind {
    /// Every sink, in the order they are opened
    pub const ALL: [SinkKind; 8] = [
        SinkKind::TotalEnergy,
        SinkKind::Displacement,
        SinkKind::Force,
        SinkKind::PhasePortrait,
        SinkKind::PhaseCrossings,
        SinkKind::Profile,
        SinkKind::ModeEnergy,
        SinkKind::ModePosition,
    ];

    /// Configured file name for this sink
    pub fn file_name(self, output: &OutputParameters) -> &str {
        match self {
            SinkKind::TotalEnergy => &output.total_energy,
            SinkKind::Displacement => &output.displacement,
            SinkKind::Force => &output.force,
            SinkKind::PhasePortrait => &output.phase_portrait,
            SinkKind::PhaseCrossings => &output.phase_crossings,
            SinkKind::Profile => &output.profile,
            SinkKind::ModeEnergy => &output.mode_energy,
            SinkKind::ModePosition => &output.mode_position,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for SinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SinkKind::TotalEnergy => "total-energy",
            SinkKind::Displacement => "displacement",
            SinkKind::Force => "force",
            SinkKind::PhasePortrait => "phase-portrait",
            SinkKind::PhaseCrossings => "phase-crossings",
            SinkKind::Profile => "profile",
            SinkKind::ModeEnergy => "mode-energy",
            SinkKind::ModePosition => "mode-position",
        };
        f.write_str(name)
    }
}

/// One sink per [`SinkKind`]
///
/// Sinks are released when the set is dropped.
pub struct SinkSet {
    sinks: Vec<Box<dyn RowSink>>,
}

impl SinkSet {
    /// Open a file sink for every kind
    ///
    /// Every sink is attempted even after a failure, and each failure is
    /// logged by name as it is found. Returns all failures together.
    pub fn open(output: &OutputParameters) -> Result<Self, SinkOpenFailures> {
        if let Err(e) = std::fs::create_dir_all(&output.directory) {
            log::warn!(
                "Cannot create output directory {}: {}",
                output.directory.display(),
                e
            );
        }

        let mut sinks: Vec<Box<dyn RowSink>> = Vec::with_capacity(SinkKind::ALL.len());
        let mut failures = Vec::new();

        for kind in SinkKind::ALL {
            let path = output.resolve(kind.file_name(output));
            match TsvSink::create(&path) {
                Ok(sink) => sinks.push(Box::new(sink)),
                Err(source) => {
                    log::error!("Cannot open {} sink at {}: {}", kind, path.display(), source);
                    failures.push(SinkOpenFailure { sink: kind, path, source });
                }
            }
        }

        if failures.is_empty() {
            log::info!("Opened {} output sinks in {}", sinks.len(), output.directory.display());
            Ok(Self { sinks })
        } else {
            Err(SinkOpenFailures(failures))
        }
    }

    /// Build a set from caller-supplied sinks, e.g. in-memory ones for tests
    pub fn from_fn<F>(mut make: F) -> Self
    where
        F: FnMut(SinkKind) -> Box<dyn RowSink>,
    {
        Self {
            sinks: SinkKind::ALL.iter().map(|&kind| make(kind)).collect(),
        }
    }

    /// Write one row to the sink of the given kind
    pub fn write(&mut self, kind: SinkKind, fields: &[f64]) -> Result<(), SimulationError> {
        self.sinks[kind.index()]
            .write_row(fields)
            .map_err(|source| SimulationError::SinkWrite { sink: kind, source })
    }

    /// Flush every sink
    pub fn flush(&mut self) -> Result<(), SimulationError> {
        for kind in SinkKind::ALL {
            self.sinks[kind.index()]
                .flush()
                .map_err(|source| SimulationError::SinkWrite { sink: kind, source })?;
        }
        Ok(())
    }
}

impl fmt::Debug for SinkSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SinkSet").field("sinks", &self.sinks.len()).finish()
    }
}
