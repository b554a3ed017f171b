//! Integration tests for the chain dynamics
//!
//! Tests verify that:
//! - The clamped ends never move
//! - The linear chain conserves energy and keeps it in the excited mode
//! - A cubic nonlinearity moves energy into other modes
//! - Runs are exactly reproducible

use fpu_chain::{
    physics::total_energy, ChainConstants, ChainState, LeapfrogIntegrator, MemorySink,
    ModeAnalyzer, Parameters, Recorder, RowSink, SampleRecord, SinkSet,
};

/// Parameters for the classic 32-particle chain
fn chain_params(alpha: f64, beta: f64, max_time: f64) -> Parameters {
    let mut params = Parameters::default();
    params.chain.particle_count = 32;
    params.chain.initial_mode = 1;
    params.chain.amplitude = 10.0;
    params.chain.time_step = 0.05;
    params.chain.max_time = max_time;
    params.chain.alpha = alpha;
    params.chain.beta = beta;
    params
}

/// Run to completion against in-memory sinks, collecting every sample
fn run_collecting(params: Parameters) -> (Recorder, Vec<SampleRecord>) {
    let sinks = SinkSet::from_fn(|_| Box::new(MemorySink::new()) as Box<dyn RowSink>);
    let mut recorder = Recorder::with_sinks(params, sinks).unwrap();
    let mut samples = Vec::new();
    while let Some(record) = next_sample(&mut recorder) {
        samples.push(record);
    }
    (recorder, samples)
}

fn next_sample(recorder: &mut Recorder) -> Option<SampleRecord> {
    while recorder.phase() != fpu_chain::RecorderPhase::Done {
        if let Some(record) = recorder.advance().unwrap() {
            return Some(record);
        }
    }
    None
}

/// Boundary points stay exactly zero through a long nonlinear run
#[test]
fn test_boundaries_stay_clamped() {
    let constants = ChainConstants::new(32, 0.05, 0.25, 1.0);
    let mut state = ChainState::single_mode(32, 1, 10.0);
    let mut integrator = LeapfrogIntegrator::new(constants);

    for _ in 0..20_000 {
        integrator.step(&mut state);
        assert_eq!(state.displacement()[0], 0.0);
        assert_eq!(state.displacement()[33], 0.0);
    }
}

/// Linear chain: total energy at every sample within 1e-3 of the start
#[test]
fn test_linear_energy_conservation() {
    let (recorder, samples) = run_collecting(chain_params(0.0, 0.0, 2000.0));
    let initial = recorder.summary().initial_energy;

    assert!(initial > 0.0);
    assert!(samples.len() > 1000);
    for record in &samples {
        let drift = (record.total_energy - initial).abs() / initial;
        assert!(
            drift < 1e-3,
            "energy drifted by {} at t = {}",
            drift,
            record.time
        );
    }
}

/// Linear chain: all energy stays in the excited mode
#[test]
fn test_linear_mode_energy_partition() {
    let mut params = chain_params(0.0, 0.0, 1000.0);
    params.chain.initial_mode = 2;
    params.sampling.tracked_modes = 32;
    params.sampling.phase_mode = 2;

    let (_, samples) = run_collecting(params);
    assert!(!samples.is_empty());

    for record in &samples {
        let sum = record.tracked_mode_energy();
        assert!(
            (sum - record.total_energy).abs() < 1e-9 * record.total_energy,
            "mode sum {} vs total {} at t = {}",
            sum,
            record.total_energy,
            record.time
        );
        for (index, &energy) in record.mode_energies.iter().enumerate() {
            if index + 1 != 2 {
                assert!(energy < 1e-12, "mode {} picked up {}", index + 1, energy);
            }
        }
    }
}

/// Cubic nonlinearity: energy leaves mode 1 for some other tracked mode
#[test]
fn test_nonlinear_energy_sharing() {
    let (recorder, samples) = run_collecting(chain_params(0.0, 1.0, 1000.0));
    let initial = recorder.summary().initial_energy;

    let max_other = samples
        .iter()
        .flat_map(|r| r.mode_energies.iter().skip(1).copied())
        .fold(0.0_f64, f64::max);

    // At least 1% of the initial energy reaches another mode
    assert!(
        max_other > 1e-2 * initial,
        "no energy shared out of mode 1 (max other mode energy {} of {})",
        max_other,
        initial
    );
}

/// Quadratic nonlinearity also shares energy, into the even modes
#[test]
fn test_alpha_chain_excites_mode_two() {
    let (recorder, samples) = run_collecting(chain_params(0.25, 0.0, 1000.0));
    let initial = recorder.summary().initial_energy;

    let max_mode_two = samples
        .iter()
        .map(|r| r.mode_energies[1])
        .fold(0.0_f64, f64::max);
    assert!(
        max_mode_two > 1e-2 * initial,
        "mode 2 energy stayed at {} of {}",
        max_mode_two,
        initial
    );
}

/// Same parameters, same trajectory, bit for bit
#[test]
fn test_runs_are_deterministic() {
    let params = chain_params(0.25, 1.0, 200.0);
    let (first, first_samples) = run_collecting(params.clone());
    let (second, second_samples) = run_collecting(params);

    assert_eq!(first.state(), second.state());
    assert_eq!(first_samples, second_samples);
}

/// Mode energies computed directly agree with the harmonic total
#[test]
fn test_direct_mode_sum_matches_total() {
    let constants = ChainConstants::new(32, 0.05, 0.0, 0.0);
    let analyzer = ModeAnalyzer::new(&constants);
    let mut state = ChainState::single_mode(32, 3, 2.0);
    let mut integrator = LeapfrogIntegrator::new(constants);
    integrator.run(&mut state, 1234);

    let sum: f64 = analyzer.all_energies(&state).iter().sum();
    let total = total_energy(&state, constants.dt);
    assert!((sum - total).abs() < 1e-9 * total);
}
