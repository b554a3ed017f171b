//! FPU Chain - Entry point
//!
//! Simulates the Fermi-Pasta-Ulam chain and writes energy, mode and
//! phase-portrait series as tab-separated files.
//!
//! CLI Usage:
//!   cargo run --release                           # Default run (see data/parameters/fpu.json)
//!   cargo run --release -- --beta 1.0 -t 5000     # Override parameters
//!   cargo run --release -- --config my_run.json -o out/

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use fpu_chain::{
    config::{CoefficientScope, Parameters},
    export::export_summary_json,
    Recorder, SimulationError,
};

/// Exit code when an output file cannot be opened
const EXIT_SINK_FAILURE: i32 = 2;

/// Command-line overrides on top of the parameter file
#[derive(Debug, Default)]
struct CliOptions {
    config: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    max_time: Option<f64>,
    time_step: Option<f64>,
    alpha: Option<f64>,
    beta: Option<f64>,
    particles: Option<usize>,
    initial_mode: Option<usize>,
    tracked_modes: Option<usize>,
    single_slot: bool,
}

impl CliOptions {
    fn apply(&self, params: &mut Parameters) {
        if let Some(dir) = &self.output_dir {
            params.output.directory = dir.clone();
        }
        if let Some(t) = self.max_time {
            params.chain.max_time = t;
        }
        if let Some(dt) = self.time_step {
            params.chain.time_step = dt;
        }
        if let Some(alpha) = self.alpha {
            params.chain.alpha = alpha;
        }
        if let Some(beta) = self.beta {
            params.chain.beta = beta;
        }
        if let Some(n) = self.particles {
            params.chain.particle_count = n;
        }
        if let Some(k) = self.initial_mode {
            params.chain.initial_mode = k;
        }
        if let Some(m) = self.tracked_modes {
            params.sampling.tracked_modes = m;
        }
        if self.single_slot {
            params.sampling.coefficient_scope = CoefficientScope::SingleSlot;
        }
    }
}

/// Parse the value following a flag, warning if it is missing or malformed
fn parse_value<T: std::str::FromStr>(args: &[String], i: &mut usize, flag: &str) -> Option<T> {
    *i += 1;
    match args.get(*i).map(|s| s.parse()) {
        Some(Ok(v)) => Some(v),
        _ => {
            log::warn!("Ignoring {}: missing or invalid value", flag);
            None
        }
    }
}

/// Parse CLI arguments
fn parse_args() -> CliOptions {
    let args: Vec<String> = std::env::args().collect();
    let mut opts = CliOptions::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-c" | "--config" => opts.config = parse_value(&args, &mut i, "--config"),
            "-o" | "--output-dir" => opts.output_dir = parse_value(&args, &mut i, "--output-dir"),
            "-t" | "--t-max" => opts.max_time = parse_value(&args, &mut i, "--t-max"),
            "--dt" => opts.time_step = parse_value(&args, &mut i, "--dt"),
            "-a" | "--alpha" => opts.alpha = parse_value(&args, &mut i, "--alpha"),
            "-b" | "--beta" => opts.beta = parse_value(&args, &mut i, "--beta"),
            "-n" | "--particles" => opts.particles = parse_value(&args, &mut i, "--particles"),
            "-k" | "--mode" => opts.initial_mode = parse_value(&args, &mut i, "--mode"),
            "-m" | "--modes" => opts.tracked_modes = parse_value(&args, &mut i, "--modes"),
            "--single-slot" => opts.single_slot = true,
            "--help" | "-h" => {
                println!("FPU Chain");
                println!();
                println!("Usage: fpu-chain [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --config FILE      Parameter file (default: data/parameters/fpu.json)");
                println!("  -o, --output-dir DIR   Directory for output series");
                println!("  -t, --t-max T          Simulation length");
                println!("      --dt DT            Time step");
                println!("  -a, --alpha A          Quadratic force coefficient");
                println!("  -b, --beta B           Cubic force coefficient");
                println!("  -n, --particles N      Number of movable particles");
                println!("  -k, --mode K           Initially excited mode");
                println!("  -m, --modes M          Number of modes to track");
                println!("      --single-slot      Share one coefficient pair per sample (legacy output)");
                println!("  --help, -h             Show this help");
                std::process::exit(0);
            }
            other => log::warn!("Ignoring unknown argument {}", other),
        }
        i += 1;
    }

    opts
}

fn main() -> Result<()> {
    env_logger::init();

    let opts = parse_args();

    let mut params = match &opts.config {
        Some(path) => Parameters::load(path)?,
        None => Parameters::load_or_default(),
    };
    opts.apply(&mut params);

    let mut recorder = match Recorder::open(params.clone()) {
        Ok(recorder) => recorder,
        Err(SimulationError::SinkOpen(failures)) => {
            for failure in &failures.0 {
                eprintln!("fpu-chain: cannot open file {}", failure.path.display());
            }
            eprintln!("Some output file(s) could not be created; the simulation will not run.");
            std::process::exit(EXIT_SINK_FAILURE);
        }
        Err(e) => return Err(e).context("cannot start the simulation"),
    };

    let start_time = Instant::now();
    let summary = recorder.run()?;
    let elapsed = start_time.elapsed();

    log::info!(
        "Elapsed {:.2?} ({:.0} steps/s)",
        elapsed,
        summary.steps as f64 / elapsed.as_secs_f64().max(1e-9)
    );

    if let Some(path) = export_summary_json(&params, &summary)? {
        println!("Summary written to {}", path.display());
    }
    println!(
        "Energy: {:.6} -> {:.6} (max drift {:.3e}) over {} samples",
        summary.initial_energy, summary.final_energy, summary.max_relative_energy_drift, summary.samples
    );

    Ok(())
}
