//! Chain benchmarks

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use fpu_chain::{ChainConstants, ChainState, LeapfrogIntegrator, ModeAnalyzer, ModeProjector};

fn bench_integrator_step(c: &mut Criterion) {
    let constants = ChainConstants::new(32, 0.05, 0.0, 0.3);
    let mut integrator = LeapfrogIntegrator::new(constants);
    let mut state = ChainState::single_mode(32, 1, 10.0);

    c.bench_function("integrator_step_32", |b| {
        b.iter(|| integrator.step(black_box(&mut state)))
    });
}

fn bench_large_chain_step(c: &mut Criterion) {
    let constants = ChainConstants::new(1024, 0.05, 0.25, 0.3);
    let mut integrator = LeapfrogIntegrator::new(constants);
    let mut state = ChainState::single_mode(1024, 1, 10.0);

    c.bench_function("integrator_step_1024", |b| {
        b.iter(|| integrator.step(black_box(&mut state)))
    });
}

fn bench_mode_spectrum(c: &mut Criterion) {
    let state = ChainState::single_mode(32, 1, 10.0);

    c.bench_function("mode_spectrum_10", |b| {
        b.iter(|| ModeProjector::spectrum(black_box(&state), 1..=10))
    });
}

fn bench_all_mode_energies(c: &mut Criterion) {
    let constants = ChainConstants::new(32, 0.05, 0.0, 0.3);
    let analyzer = ModeAnalyzer::new(&constants);
    let state = ChainState::single_mode(32, 1, 10.0);

    c.bench_function("all_mode_energies_32", |b| {
        b.iter(|| analyzer.all_energies(black_box(&state)))
    });
}

criterion_group!(
    benches,
    bench_integrator_step,
    bench_large_chain_step,
    bench_mode_spectrum,
    bench_all_mode_energies
);
criterion_main!(benches);
