//! The simulation loop and fixed-interval sampling.
//!
//! Each step advances the chain by dt and counts down the sampling timer.
//! When the timer reaches zero the recorder samples the chain, writes one
//! row to each series and resets the timer. The run ends once simulation
//! time reaches the configured maximum.

use crate::analysis::{ModeAnalyzer, Refresh};
use crate::config::{CoefficientScope, Parameters};
use crate::error::SimulationError;
use crate::export::{SinkKind, SinkSet};
use crate::physics::{
    anharmonic_energy, total_energy, ChainConstants, ForceComponents, LeapfrogIntegrator,
};
use crate::state::{ChainState, PhasePoint, RunSummary, SampleRecord};

/// Where the recorder is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecorderPhase {
    /// Stepping between samples
    Running,
    /// Computing and writing a sample
    Sampling,
    /// Maximum time reached; further calls do nothing
    Done,
}

/// Owns the chain, the integrator, the analyzer and the output sinks
#[derive(Debug)]
pub struct Recorder {
    params: Parameters,
    constants: ChainConstants,
    state: ChainState,
    integrator: LeapfrogIntegrator,
    analyzer: ModeAnalyzer,
    sinks: SinkSet,
    /// Simulation time
    time: f64,
    /// Time left until the next sample
    countdown: f64,
    /// Time between samples
    sample_interval: f64,
    phase: RecorderPhase,
    summary: RunSummary,
}

impl Recorder {
    /// Validate the parameters and open file sinks in the output directory
    ///
    /// If any sink fails to open, every failure is reported and no recorder
    /// is built, so the loop cannot run.
    pub fn open(params: Parameters) -> Result<Self, SimulationError> {
        params.validate()?;
        let sinks = SinkSet::open(&params.output)?;
        Self::build(params, sinks)
    }

    /// Build a recorder around caller-supplied sinks
    ///
    /// Writes the initial displacement profile immediately.
    pub fn with_sinks(params: Parameters, sinks: SinkSet) -> Result<Self, SimulationError> {
        params.validate()?;
        Self::build(params, sinks)
    }

    fn build(params: Parameters, sinks: SinkSet) -> Result<Self, SimulationError> {
        let chain = &params.chain;
        let constants = ChainConstants::from_parameters(chain);
        let state = ChainState::single_mode(chain.particle_count, chain.initial_mode, chain.amplitude);
        let sample_interval = f64::from(params.sampling.interval_steps) * constants.dt;

        let initial_anharmonic_energy =
            anharmonic_energy(&state, constants.dt, constants.alpha, constants.beta);
        let summary = RunSummary {
            initial_energy: total_energy(&state, constants.dt),
            initial_anharmonic_energy,
            final_anharmonic_energy: initial_anharmonic_energy,
            ..Default::default()
        };

        let phase = if chain.max_time > 0.0 {
            RecorderPhase::Running
        } else {
            RecorderPhase::Done
        };

        let mut recorder = Self {
            integrator: LeapfrogIntegrator::new(constants),
            analyzer: ModeAnalyzer::new(&constants),
            params,
            constants,
            state,
            sinks,
            time: 0.0,
            countdown: sample_interval,
            sample_interval,
            phase,
            summary,
        };
        recorder.write_profile()?;

        log::info!(
            "FPU chain: {} particles, mode {} amplitude {}, alpha = {}, beta = {}",
            recorder.constants.particle_count,
            recorder.params.chain.initial_mode,
            recorder.params.chain.amplitude,
            recorder.constants.alpha,
            recorder.constants.beta
        );
        Ok(recorder)
    }

    fn write_profile(&mut self) -> Result<(), SimulationError> {
        for (i, &x) in self.state.displacement().iter().enumerate() {
            self.sinks.write(SinkKind::Profile, &[i as f64, x])?;
        }
        Ok(())
    }

    /// Take one integration step, sampling if the timer has run out
    ///
    /// Returns the sample when one was taken. Once the maximum time is
    /// reached this does nothing and returns `None`.
    pub fn advance(&mut self) -> Result<Option<SampleRecord>, SimulationError> {
        if self.phase == RecorderPhase::Done {
            return Ok(None);
        }

        self.integrator.step(&mut self.state);
        self.time += self.constants.dt;
        self.countdown -= self.constants.dt;

        let record = if self.countdown <= 0.0 {
            self.phase = RecorderPhase::Sampling;
            self.countdown = self.sample_interval;
            let record = self.sample();
            self.emit(&record)?;
            self.summary.observe(&record);
            Some(record)
        } else {
            None
        };

        if self.time >= self.params.chain.max_time {
            self.phase = RecorderPhase::Done;
            self.finish_summary();
        } else {
            self.phase = RecorderPhase::Running;
        }
        Ok(record)
    }

    /// Fill in the end-of-run fields once the maximum time is reached
    fn finish_summary(&mut self) {
        self.summary.steps = self.integrator.step_count;
        self.summary.final_time = self.time;
        self.summary.final_anharmonic_energy = anharmonic_energy(
            &self.state,
            self.constants.dt,
            self.constants.alpha,
            self.constants.beta,
        );
    }

    /// Run until the maximum time and return the run statistics
    pub fn run(&mut self) -> Result<RunSummary, SimulationError> {
        let dt = self.constants.dt;
        let expected_steps = (self.params.chain.max_time / dt).ceil().max(1.0) as u64;
        let report_every = (expected_steps / 10).max(1);

        log::info!(
            "Running to t = {} ({} steps, sampling every {} steps)",
            self.params.chain.max_time,
            expected_steps,
            self.params.sampling.interval_steps
        );

        while self.phase != RecorderPhase::Done {
            self.advance()?;
            if self.integrator.step_count % report_every == 0 {
                log::debug!(
                    "t = {:.2}: energy = {:.6}, drift = {:.3e}",
                    self.time,
                    self.summary.final_energy,
                    self.summary.max_relative_energy_drift
                );
            }
        }
        self.sinks.flush()?;

        log::info!(
            "Run finished: {} steps, {} samples ({} crossings), max energy drift {:.3e}",
            self.summary.steps,
            self.summary.samples,
            self.summary.crossing_samples,
            self.summary.max_relative_energy_drift
        );
        Ok(self.summary.clone())
    }

    /// Compute every sampled quantity for the current state
    ///
    /// Does not touch the sinks or the timer.
    pub fn sample(&mut self) -> SampleRecord {
        let n = self.constants.particle_count;
        let sampling = &self.params.sampling;
        let tracked = sampling.tracked_modes;

        let mut mode_energies = Vec::with_capacity(tracked);
        let mut mode_positions = Vec::with_capacity(tracked);

        let (phase_point, crossing) = match sampling.coefficient_scope {
            CoefficientScope::PerInstant => {
                let modes = (1..=tracked).chain([sampling.phase_mode, sampling.crossing_mode]);
                let spectrum = self.analyzer.spectrum(&self.state, modes);
                for k in 1..=tracked {
                    mode_energies.push(self.analyzer.energy_of(k, spectrum[k]));
                    mode_positions.push(self.analyzer.position_of(spectrum[k]));
                }
                (
                    self.analyzer.phase_point_of(spectrum[sampling.phase_mode]),
                    ModeAnalyzer::crosses_zero(spectrum[sampling.crossing_mode]),
                )
            }
            CoefficientScope::SingleSlot => {
                for k in 1..=tracked {
                    mode_energies.push(self.analyzer.mode_energy(&self.state, k, Refresh::Recompute));
                    mode_positions.push(self.analyzer.mode_position(&self.state, k, Refresh::Reuse));
                }
                // These reuse the pair of the last tracked mode
                let position = self
                    .analyzer
                    .mode_position(&self.state, sampling.phase_mode, Refresh::Reuse);
                let velocity = self
                    .analyzer
                    .mode_velocity(&self.state, sampling.phase_mode, Refresh::Reuse);
                let crossing = self
                    .analyzer
                    .mode_crosses(&self.state, sampling.crossing_mode, Refresh::Reuse);
                (PhasePoint { position, velocity }, crossing)
            }
        };

        let force_probe = force_probe_index(tracked, n);

        SampleRecord {
            time: self.time,
            total_energy: total_energy(&self.state, self.constants.dt),
            probe_displacement: self.state.displacement_at(n / 3),
            mode_energies,
            mode_positions,
            force_probe,
            force: ForceComponents::at(
                &self.state,
                force_probe,
                self.constants.alpha,
                self.constants.beta,
            ),
            phase_point,
            crossing,
        }
    }

    fn emit(&mut self, record: &SampleRecord) -> Result<(), SimulationError> {
        let t = record.time;
        self.sinks.write(SinkKind::TotalEnergy, &[t, record.total_energy])?;
        self.sinks.write(SinkKind::Displacement, &[t, record.probe_displacement])?;

        let mut row = Vec::with_capacity(record.mode_energies.len() + 1);
        row.push(t);
        row.extend_from_slice(&record.mode_energies);
        self.sinks.write(SinkKind::ModeEnergy, &row)?;

        row.truncate(1);
        row.extend_from_slice(&record.mode_positions);
        self.sinks.write(SinkKind::ModePosition, &row)?;

        let f = record.force;
        self.sinks.write(SinkKind::Force, &[t, f.linear, f.quadratic, f.cubic])?;

        let p = record.phase_point;
        self.sinks.write(SinkKind::PhasePortrait, &[p.position, p.velocity])?;
        if record.crossing {
            self.sinks.write(SinkKind::PhaseCrossings, &[p.position, p.velocity])?;
        }
        Ok(())
    }

    pub fn state(&self) -> &ChainState {
        &self.state
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn phase(&self) -> RecorderPhase {
        self.phase
    }

    pub fn steps(&self) -> u64 {
        self.integrator.step_count
    }

    pub fn parameters(&self) -> &Parameters {
        &self.params
    }

    /// Statistics gathered so far
    pub fn summary(&self) -> &RunSummary {
        &self.summary
    }
}

/// Particle the force decomposition is evaluated at
///
/// This is the index a loop over modes 1..=M leaves behind, M + 1, kept
/// inside the chain when every mode is tracked.
pub fn force_probe_index(tracked_modes: usize, particle_count: usize) -> usize {
    (tracked_modes + 1).min(particle_count)
}
