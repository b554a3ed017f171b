//! Parameter structures for the FPU chain simulation.
//!
//! Every field has a default, so a JSON file only needs to name the values
//! it changes.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default location of the parameter file
pub const DEFAULT_PARAMETER_FILE: &str = "data/parameters/fpu.json";

/// Top-level parameters container
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Parameters {
    /// Physical chain and integration settings
    pub chain: ChainParameters,
    /// What is sampled and how often
    pub sampling: SamplingParameters,
    /// Output destinations
    pub output: OutputParameters,
}

impl Parameters {
    /// Load parameters from the default JSON file, or use defaults if it doesn't exist
    pub fn load_or_default() -> Self {
        Self::load_or_default_from(DEFAULT_PARAMETER_FILE)
    }

    /// Load from a JSON file, falling back to defaults on any failure
    pub fn load_or_default_from<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(params) => {
                    log::info!("Loaded chain parameters from {:?}", path);
                    params
                }
                Err(e) => {
                    log::warn!("Failed to parse chain parameters: {}, using defaults", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Chain parameters file not found, using defaults");
                Self::default()
            }
        }
    }

    /// Load from a JSON file that the caller asked for explicitly
    ///
    /// Unlike [`Parameters::load_or_default_from`], a missing or malformed
    /// file is an error here.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let params = serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Loaded chain parameters from {:?}", path);
        Ok(params)
    }

    /// Check that the parameter set describes a runnable simulation
    pub fn validate(&self) -> Result<(), ConfigError> {
        let n = self.chain.particle_count;
        if n == 0 {
            return Err(ConfigError::Invalid("particle_count must be at least 1".into()));
        }
        let check_mode = |name: &str, k: usize| {
            if k == 0 || k > n {
                Err(ConfigError::Invalid(format!(
                    "{} = {} is outside the mode range 1..={}",
                    name, k, n
                )))
            } else {
                Ok(())
            }
        };
        check_mode("initial_mode", self.chain.initial_mode)?;
        check_mode("tracked_modes", self.sampling.tracked_modes)?;
        check_mode("phase_mode", self.sampling.phase_mode)?;
        check_mode("crossing_mode", self.sampling.crossing_mode)?;

        if !(self.chain.time_step.is_finite() && self.chain.time_step > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "time_step must be positive and finite, got {}",
                self.chain.time_step
            )));
        }
        if self.chain.max_time.is_nan() || self.chain.max_time < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "max_time must be non-negative, got {}",
                self.chain.max_time
            )));
        }
        if self.sampling.interval_steps == 0 {
            return Err(ConfigError::Invalid("interval_steps must be at least 1".into()));
        }
        Ok(())
    }
}

/// Physical parameters of the chain
///
/// Masses and linear spring constants are both 1, so only the nonlinear
/// coefficients appear here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChainParameters {
    /// Number of movable particles (N); the two end points are clamped
    pub particle_count: usize,
    /// Normal mode that holds all of the initial energy (1 is the lowest)
    pub initial_mode: usize,
    /// Amplitude of the initial mode coordinate
    pub amplitude: f64,
    /// Integration time step (dt)
    pub time_step: f64,
    /// Simulation stops once time reaches this value
    pub max_time: f64,
    /// Quadratic force coefficient (alpha)
    pub alpha: f64,
    /// Cubic force coefficient (beta)
    pub beta: f64,
}

impl Default for ChainParameters {
    fn default() -> Self {
        Self {
            particle_count: 32,
            initial_mode: 1,
            amplitude: 10.0,
            time_step: 0.05,
            max_time: 100_000.0,
            alpha: 0.0,
            beta: 0.3,
        }
    }
}

/// How projection coefficients are shared between queries in one sampling instant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoefficientScope {
    /// Every mode queried at an instant gets its own coefficient pair
    #[default]
    PerInstant,
    /// One cached pair, overwritten by each recomputation. Phase-portrait
    /// queries then see the last tracked mode instead of the mode they name.
    SingleSlot,
}

/// Sampling schedule and mode selection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingParameters {
    /// Number of integration steps between samples
    pub interval_steps: u32,
    /// Modes 1..=tracked_modes are written to the mode series
    pub tracked_modes: usize,
    /// Mode whose (position, velocity) forms the phase portraits
    pub phase_mode: usize,
    /// Mode whose sign crossing gates the second phase portrait
    pub crossing_mode: usize,
    /// Coefficient sharing policy
    pub coefficient_scope: CoefficientScope,
}

impl Default for SamplingParameters {
    fn default() -> Self {
        Self {
            interval_steps: 20,
            tracked_modes: 10,
            phase_mode: 1,
            crossing_mode: 3,
            coefficient_scope: CoefficientScope::default(),
        }
    }
}

/// Output file names, resolved against `directory`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputParameters {
    pub directory: PathBuf,
    pub total_energy: String,
    pub displacement: String,
    pub force: String,
    pub phase_portrait: String,
    pub phase_crossings: String,
    pub mode_energy: String,
    pub mode_position: String,
    pub profile: String,
    /// JSON run summary; `None` disables it
    pub summary: Option<String>,
}

impl Default for OutputParameters {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            total_energy: "total_e".into(),
            displacement: "x_t".into(),
            force: "force_t".into(),
            phase_portrait: "phase_plot_1".into(),
            phase_crossings: "phase_plot_2".into(),
            mode_energy: "mode".into(),
            mode_position: "x_mode".into(),
            profile: "prof.junk".into(),
            summary: Some("summary.json".into()),
        }
    }
}

impl OutputParameters {
    /// Full path of a file inside the output directory
    pub fn resolve(&self, file_name: &str) -> PathBuf {
        self.directory.join(file_name)
    }
}
