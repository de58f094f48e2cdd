use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rkck45::problems::{Daisyworld, HarmonicOscillator, Lorenz};
use rkck45::{rkck_step, sweep_adaptive, AdaptVars, IntegratorConfig, Rkck45, TimeVars};

fn bench_single_step_lorenz(c: &mut Criterion) {
    let sys = Lorenz::default();
    let y = [5.0, 5.0, 5.0];

    c.bench_function("single_step_lorenz", |b| {
        b.iter(|| rkck_step(&sys, black_box(&y), 0.0, 0.01))
    });
}

fn bench_harmonic_oscillator_1period(c: &mut Criterion) {
    let sys = HarmonicOscillator::default();
    let y0 = [1.0, 0.0];
    let period = 2.0 * std::f64::consts::PI;
    let config = IntegratorConfig::new(TimeVars::new(0.0, period, 0.1))
        .with_adaptvars(AdaptVars::with_tolerances(1e-10, 1e-10));

    c.bench_function("harmonic_oscillator_1period_adaptive", |b| {
        b.iter(|| {
            let mut solver = Rkck45::new(config);
            solver.run_adaptive(&sys, black_box(&y0)).unwrap()
        })
    });

    c.bench_function("harmonic_oscillator_1period_fixed", |b| {
        b.iter(|| {
            let mut solver = Rkck45::new(config);
            solver.run_fixed(&sys, black_box(&y0))
        })
    });
}

fn bench_lorenz_20(c: &mut Criterion) {
    let sys = Lorenz::default();
    let y0 = [5.0, 5.0, 5.0];
    let config = IntegratorConfig::new(TimeVars::new(0.0, 20.0, 0.01));

    c.bench_function("lorenz_20_adaptive", |b| {
        b.iter(|| {
            let mut solver = Rkck45::new(config);
            solver.run_adaptive(&sys, black_box(&y0)).unwrap()
        })
    });

    c.bench_function("lorenz_20_fixed", |b| {
        b.iter(|| {
            let mut solver = Rkck45::new(config);
            solver.run_fixed(&sys, black_box(&y0))
        })
    });
}

fn bench_daisyworld_sweep(c: &mut Criterion) {
    let config = IntegratorConfig::new(TimeVars::new(0.0, 40.0, 0.01));
    let luminosities: Vec<f64> = (0..64).map(|i| 0.6 + 0.0125 * i as f64).collect();

    c.bench_function("daisyworld_luminosity_sweep_64", |b| {
        b.iter(|| {
            sweep_adaptive(black_box(&luminosities), &[0.2, 0.7], &config, |&l| {
                Daisyworld {
                    l,
                    ..Daisyworld::default()
                }
            })
        })
    });
}

criterion_group!(
    benches,
    bench_single_step_lorenz,
    bench_harmonic_oscillator_1period,
    bench_lorenz_20,
    bench_daisyworld_sweep
);
criterion_main!(benches);
